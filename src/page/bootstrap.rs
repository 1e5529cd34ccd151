// ============================================================================
// Initialisation de la page
// ============================================================================
// Au chargement :
// 1. chaque carte de résumé (recettes, dépenses, solde) lance son compteur
//    animé vers la valeur de son attribut data-valor
// 2. chaque élément .card reçoit la classe fade-in, décalée de
//    index × 100 ms pour un effet en cascade
//
// CONCEPTS RUST :
// 1. filter_map : élément absent = ignoré silencieusement
// 2. tokio::spawn + sleep : équivalent de setTimeout
// 3. Struct de handles : l'appelant possède toutes les tâches lancées
// ============================================================================

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::page::counter::{animate_counter_with, CounterAnimation, CounterHandle};
use crate::page::dom::Document;

/// Tâches lancées par bootstrap()
#[derive(Debug)]
pub struct Bootstrap {
    counters: Vec<CounterHandle>,
    fades: Vec<JoinHandle<()>>,
}

impl Bootstrap {
    /// Nombre de compteurs démarrés
    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }

    /// Nombre de fade-in programmés
    pub fn fade_count(&self) -> usize {
        self.fades.len()
    }

    /// true quand tous les compteurs et tous les fade-in sont terminés
    pub fn is_finished(&self) -> bool {
        self.counters.iter().all(CounterHandle::is_finished)
            && self.fades.iter().all(JoinHandle::is_finished)
    }

    /// Annule toutes les animations en cours
    pub fn cancel(&self) {
        self.counters.iter().for_each(CounterHandle::cancel);
        self.fades.iter().for_each(JoinHandle::abort);
    }

    /// Attend la fin de toutes les animations
    pub async fn finished(self) -> Result<()> {
        for counter in self.counters {
            counter.finished().await?;
        }

        for fade in self.fades {
            match fade.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => return Err(e).context("La tâche de fade-in a paniqué"),
            }
        }

        Ok(())
    }
}

/// Lance les animations de chargement de la page
///
/// Doit être appelée depuis un runtime tokio.
pub fn bootstrap(document: &dyn Document, config: &DashboardConfig) -> Bootstrap {
    let frame_interval = config.frame_interval();

    // Compteurs des cartes de résumé
    let counters: Vec<CounterHandle> = config
        .summary_ids
        .all()
        .into_iter()
        .filter_map(|id| {
            let Some(element) = document.element_by_id(id) else {
                debug!(element = id, "Summary element missing, skipping animation");
                return None;
            };

            let raw = element.data_attribute(&config.value_attribute);
            let value = parse_float_or_zero(raw.as_deref());

            let animation = CounterAnimation::with_frame_interval(
                value,
                config.counter_duration(),
                frame_interval,
            );
            Some(animate_counter_with(element, animation, frame_interval))
        })
        .collect();

    // Fade-in en cascade, dans l'ordre du document
    let stagger = config.fade_stagger();
    let fades: Vec<JoinHandle<()>> = document
        .elements_by_class(&config.card_class)
        .into_iter()
        .enumerate()
        .map(|(index, card)| {
            let delay = stagger.saturating_mul(index as u32);
            let fade_class = config.fade_class.clone();

            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                card.add_class(&fade_class);
            })
        })
        .collect();

    info!(
        counters = counters.len(),
        cards = fades.len(),
        "Dashboard page bootstrapped"
    );

    Bootstrap { counters, fades }
}

/// Convertit un attribut en nombre, comme parseFloat(valeur || 0)
///
/// CONCEPT : Préfixe numérique
/// - Les espaces en tête sont ignorés
/// - Le plus long préfixe décimal valide est lu ("12.5abc" -> 12.5)
/// - Absent, vide, illisible ou non fini : 0
pub fn parse_float_or_zero(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };

    numeric_prefix(raw.trim_start())
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Plus long préfixe de la forme [+-]chiffres[.chiffres][e[+-]chiffres]
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_end = digits_from(end);
    let mut digit_count = integer_end - end;
    end = integer_end;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_from(end + 1);
        digit_count += fraction_end - (end + 1);
        if digit_count > 0 {
            end = fraction_end;
        }
    }

    if digit_count == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_end = digits_from(exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }

    &text[..end]
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::page::dom::{Element, MemoryDocument, MemoryElement};

    fn summary(id: &str, value: &str) -> MemoryElement {
        MemoryElement::new().with_id(id).with_data("valor", value)
    }

    #[test]
    fn test_parse_float_or_zero() {
        assert_eq!(parse_float_or_zero(Some("1000")), 1000.0);
        assert_eq!(parse_float_or_zero(Some("-400.5")), -400.5);
        assert_eq!(parse_float_or_zero(Some("  12.5abc")), 12.5);
        assert_eq!(parse_float_or_zero(Some(".5")), 0.5);
        assert_eq!(parse_float_or_zero(Some("5.")), 5.0);
        assert_eq!(parse_float_or_zero(Some("1e3")), 1000.0);
        assert_eq!(parse_float_or_zero(Some("2e")), 2.0);
        assert_eq!(parse_float_or_zero(Some("1.234,56")), 1.234);
    }

    #[test]
    fn test_parse_float_fallbacks_to_zero() {
        assert_eq!(parse_float_or_zero(None), 0.0);
        assert_eq!(parse_float_or_zero(Some("")), 0.0);
        assert_eq!(parse_float_or_zero(Some("abc")), 0.0);
        assert_eq!(parse_float_or_zero(Some("-")), 0.0);
        assert_eq!(parse_float_or_zero(Some(".")), 0.0);
        assert_eq!(parse_float_or_zero(Some("1e400")), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bootstrap_starts_counters_and_staggers_cards() {
        let mut document = MemoryDocument::new()
            .with_element(summary("receitas-mes", "1000"))
            .with_element(summary("despesas-mes", "400"))
            .with_element(summary("saldo-mes", "600"));
        let first_card = document.push(MemoryElement::new().with_class("card"));
        let second_card = document.push(MemoryElement::new().with_class("card"));

        let config = DashboardConfig::default();
        let page = bootstrap(&document, &config);

        assert_eq!(page.counter_count(), 3);
        assert_eq!(page.fade_count(), 2);

        // t = 50 ms : seule la première carte est visible
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(first_card.has_class("fade-in"));
        assert!(!second_card.has_class("fade-in"));

        // t = 150 ms : les deux cartes sont visibles
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(second_card.has_class("fade-in"));

        page.finished().await.unwrap();

        let text = |id: &str| document.memory_element(id).unwrap().text();
        assert_eq!(text("receitas-mes"), "R$\u{a0}1.000,00");
        assert_eq!(text("despesas-mes"), "R$\u{a0}400,00");
        assert_eq!(text("saldo-mes"), "R$\u{a0}600,00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_summary_elements_are_skipped() {
        let document = MemoryDocument::new().with_element(summary("saldo-mes", "600"));

        let page = bootstrap(&document, &DashboardConfig::default());

        assert_eq!(page.counter_count(), 1);
        assert_eq!(page.fade_count(), 0);
        page.finished().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_unparseable_value_animates_to_zero() {
        let document = MemoryDocument::new()
            .with_element(summary("receitas-mes", "abc"))
            .with_element(MemoryElement::new().with_id("despesas-mes"));

        bootstrap(&document, &DashboardConfig::default())
            .finished()
            .await
            .unwrap();

        for id in ["receitas-mes", "despesas-mes"] {
            let element = document.memory_element(id).unwrap();
            assert_eq!(element.text(), "R$\u{a0}0,00");
            assert_eq!(element.text_writes(), 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_first_tick() {
        let mut document = MemoryDocument::new().with_element(summary("saldo-mes", "600"));
        let card = document.push(MemoryElement::new().with_class("card"));

        let page = bootstrap(&document, &DashboardConfig::default());
        page.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(page.is_finished());
        assert!(!card.has_class("fade-in"));
        assert_eq!(document.memory_element("saldo-mes").unwrap().text_writes(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_classes_and_attribute() {
        let mut document = MemoryDocument::new()
            .with_element(MemoryElement::new().with_id("receitas-mes").with_data("value", "10"));
        let tile = document.push(MemoryElement::new().with_class("tile"));

        let config = DashboardConfig {
            value_attribute: "value".to_string(),
            card_class: "tile".to_string(),
            fade_class: "visible".to_string(),
            ..DashboardConfig::default()
        };

        bootstrap(&document, &config).finished().await.unwrap();

        assert!(tile.has_class("visible"));
        assert_eq!(
            document.memory_element("receitas-mes").unwrap().text(),
            "R$\u{a0}10,00"
        );
    }
}
