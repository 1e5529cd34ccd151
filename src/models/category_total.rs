// ============================================================================
// Structure : CategoryTotal
// ============================================================================
// Total agrégé d'une catégorie de dépenses (ou de recettes) sur une période
//
// CONCEPTS RUST :
// 1. #[serde(rename = "...")] : le serveur sérialise les champs avec les noms
//    de la requête ORM ("categoria__nome"), on garde des noms Rust lisibles
// 2. Données éphémères : une valeur n'existe que le temps d'un rendu
// ============================================================================

use serde::{Deserialize, Serialize};

/// Total d'une catégorie, tel qu'embarqué dans la page par le serveur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Nom de la catégorie (ex: "Alimentação")
    #[serde(rename = "categoria__nome")]
    pub category_name: String,

    /// Montant total de la catégorie
    pub total: f64,
}

impl CategoryTotal {
    /// Crée un total de catégorie
    ///
    /// CONCEPT RUST : impl Into<String>
    /// - Accepte &str ou String sans conversion explicite à l'appel
    pub fn new(category_name: impl Into<String>, total: f64) -> Self {
        Self {
            category_name: category_name.into(),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_server_keys() {
        let json = r#"[{"categoria__nome": "Food", "total": 100.0},
                       {"categoria__nome": "Rent", "total": 300}]"#;

        let totals: Vec<CategoryTotal> = serde_json::from_str(json).unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0], CategoryTotal::new("Food", 100.0));
        assert_eq!(totals[1].total, 300.0);
    }
}
