// ============================================================================
// Document : abstraction minimale du DOM
// ============================================================================
// Le dashboard n'a besoin que de quelques opérations :
// - trouver un élément par id ou par classe
// - lire un attribut data-*
// - écrire le texte d'un élément
// - ajouter une classe (animation fade-in)
//
// CONCEPTS RUST :
// 1. Traits objets : Arc<dyn Element> pour partager un élément entre tâches
// 2. Send + Sync : les éléments sont modifiés depuis des tâches tokio
// 3. Mutabilité intérieure : Mutex, car les méthodes prennent &self
// ============================================================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Un élément de la page
pub trait Element: Send + Sync {
    /// Identifiant de l'élément (attribut id)
    fn id(&self) -> Option<&str>;

    /// Valeur de l'attribut data-<name> (équivalent de element.dataset[name])
    fn data_attribute(&self, name: &str) -> Option<String>;

    /// Contenu texte actuel
    fn text(&self) -> String;

    /// Remplace le contenu texte
    fn set_text(&self, text: &str);

    /// Ajoute une classe (sans doublon, comme classList.add)
    fn add_class(&self, class: &str);

    /// Vérifie la présence d'une classe
    fn has_class(&self, class: &str) -> bool;
}

/// Une page : recherche d'éléments
pub trait Document: Send + Sync {
    /// Premier élément portant cet id
    fn element_by_id(&self, id: &str) -> Option<Arc<dyn Element>>;

    /// Tous les éléments portant cette classe, dans l'ordre du document
    fn elements_by_class(&self, class: &str) -> Vec<Arc<dyn Element>>;
}

// ============================================================================
// Implémentation en mémoire
// ============================================================================

/// État mutable d'un élément
#[derive(Debug, Default)]
struct ElementState {
    text: String,
    classes: Vec<String>,
    text_writes: usize,
}

/// Élément en mémoire (terminal et tests)
///
/// CONCEPT : Builder pattern
/// - MemoryElement::new().with_id("saldo-mes").with_class("card")
/// - Chaque méthode consomme self et le retourne
#[derive(Debug, Default)]
pub struct MemoryElement {
    id: Option<String>,
    data: HashMap<String, String>,
    state: Mutex<ElementState>,
}

impl MemoryElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Ajoute un attribut data-<name>
    pub fn with_data(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if !state.classes.contains(&class) {
            state.classes.push(class);
        }
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner).text = text.into();
        self
    }

    /// Nombre d'écritures du texte depuis la création
    pub fn text_writes(&self) -> usize {
        self.state().text_writes
    }

    /// Classes actuelles, dans l'ordre d'ajout
    pub fn classes(&self) -> Vec<String> {
        self.state().classes.clone()
    }

    /// Verrouille l'état, même si une tâche a paniqué en le tenant
    fn state(&self) -> MutexGuard<'_, ElementState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Element for MemoryElement {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn data_attribute(&self, name: &str) -> Option<String> {
        self.data.get(name).cloned()
    }

    fn text(&self) -> String {
        self.state().text.clone()
    }

    fn set_text(&self, text: &str) {
        let mut state = self.state();
        state.text.clear();
        state.text.push_str(text);
        state.text_writes += 1;
    }

    fn add_class(&self, class: &str) {
        let mut state = self.state();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.state().classes.iter().any(|c| c == class)
    }
}

/// Document en mémoire : liste ordonnée d'éléments
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: Vec<Arc<MemoryElement>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute un élément à la fin du document (builder)
    pub fn with_element(mut self, element: MemoryElement) -> Self {
        self.push(element);
        self
    }

    /// Ajoute un élément et retourne un handle partagé
    pub fn push(&mut self, element: MemoryElement) -> Arc<MemoryElement> {
        let element = Arc::new(element);
        self.elements.push(Arc::clone(&element));
        element
    }

    /// Version concrète de element_by_id (accès à text_writes, classes…)
    pub fn memory_element(&self, id: &str) -> Option<Arc<MemoryElement>> {
        self.elements
            .iter()
            .find(|element| element.id.as_deref() == Some(id))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Document for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<Arc<dyn Element>> {
        self.memory_element(id).map(|element| element as Arc<dyn Element>)
    }

    fn elements_by_class(&self, class: &str) -> Vec<Arc<dyn Element>> {
        self.elements
            .iter()
            .filter(|element| element.has_class(class))
            .map(|element| Arc::clone(element) as Arc<dyn Element>)
            .collect()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let element = MemoryElement::new()
            .with_id("receitas-mes")
            .with_data("valor", "1000")
            .with_class("card")
            .with_class("card")
            .with_text("R$ 0,00");

        assert_eq!(element.id(), Some("receitas-mes"));
        assert_eq!(element.data_attribute("valor").as_deref(), Some("1000"));
        assert_eq!(element.data_attribute("outro"), None);
        assert_eq!(element.classes(), vec!["card"]);
        assert_eq!(element.text(), "R$ 0,00");
        assert_eq!(element.text_writes(), 0);
    }

    #[test]
    fn test_set_text_counts_writes() {
        let element = MemoryElement::new();
        element.set_text("a");
        element.set_text("b");

        assert_eq!(element.text(), "b");
        assert_eq!(element.text_writes(), 2);
    }

    #[test]
    fn test_add_class_without_duplicates() {
        let element = MemoryElement::new().with_class("card");
        element.add_class("fade-in");
        element.add_class("fade-in");

        assert!(element.has_class("fade-in"));
        assert_eq!(element.classes(), vec!["card", "fade-in"]);
    }

    #[test]
    fn test_document_lookup() {
        let document = MemoryDocument::new()
            .with_element(MemoryElement::new().with_id("a").with_class("card"))
            .with_element(MemoryElement::new().with_id("b"))
            .with_element(MemoryElement::new().with_id("c").with_class("card"));

        assert_eq!(document.len(), 3);
        assert!(document.element_by_id("b").is_some());
        assert!(document.element_by_id("zzz").is_none());

        let cards = document.elements_by_class("card");
        let ids: Vec<_> = cards.iter().filter_map(|card| card.id().map(str::to_string)).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_shared_element_sees_updates() {
        let mut document = MemoryDocument::new();
        let handle = document.push(MemoryElement::new().with_id("saldo-mes"));

        let element = document.element_by_id("saldo-mes").unwrap();
        element.set_text("R$ 600,00");

        assert_eq!(handle.text(), "R$ 600,00");
    }
}
