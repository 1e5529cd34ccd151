// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Composition : App possède le document, les graphiques et les animations
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Le rendu lit depuis App (document + graphiques)
// - Les tâches tokio écrivent dans les éléments du document
// - Toutes les autres modifications passent par les méthodes de App
// ============================================================================

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::charts::{create_category_chart, create_trend_chart, ChartRegistry};
use crate::config::DashboardConfig;
use crate::currency::format_brl;
use crate::models::DashboardSnapshot;
use crate::page::{bootstrap, Bootstrap, MemoryDocument, MemoryElement};
use crate::refresh::refresh_dashboard;

/// Titres des cartes de résumé, dans l'ordre recettes, dépenses, solde
pub const SUMMARY_TITLES: [&str; 3] = ["Receitas do Mês", "Despesas do Mês", "Saldo do Mês"];

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false (quit réel)
    /// - N'importe quelle autre touche : confirm_quit = false (annulation)
    pub confirm_quit: bool,

    pub config: DashboardConfig,

    /// Données affichées (fournies par le serveur ou la démo)
    pub snapshot: DashboardSnapshot,

    /// Page en mémoire : cartes de résumé et cartes des graphiques
    pub document: MemoryDocument,

    /// Graphiques attachés à leurs canvas
    pub charts: ChartRegistry,

    /// Nombre de rafraîchissements demandés
    pub refresh_count: u64,

    /// Date du dernier rafraîchissement manuel
    pub last_refresh: Option<DateTime<Local>>,

    /// Animations lancées au démarrage (None avant start_animations)
    animations: Option<Bootstrap>,
}

impl App {
    /// Construit la page et les graphiques à partir du snapshot
    ///
    /// CONCEPT : Construction synchrone
    /// - Aucun runtime nécessaire ici
    /// - Les animations démarrent ensuite avec start_animations()
    pub fn new(config: DashboardConfig, snapshot: DashboardSnapshot) -> Result<Self> {
        let document = build_document(&config, &snapshot);

        let mut charts = ChartRegistry::new([
            config.category_canvas_id.as_str(),
            config.trend_canvas_id.as_str(),
        ]);
        create_category_chart(
            &mut charts,
            &config.category_canvas_id,
            &snapshot.categories,
            &snapshot.category_title,
        )?;
        create_trend_chart(&mut charts, &config.trend_canvas_id, &snapshot.trend)?;

        debug!(elements = document.len(), "Dashboard document built");

        Ok(Self {
            running: true,
            confirm_quit: false,
            config,
            snapshot,
            document,
            charts,
            refresh_count: 0,
            last_refresh: None,
            animations: None,
        })
    }

    /// Lance les compteurs et le fade-in des cartes
    ///
    /// Doit être appelée depuis un runtime tokio.
    pub fn start_animations(&mut self) {
        if let Some(previous) = self.animations.take() {
            previous.cancel();
        }
        self.animations = Some(bootstrap(&self.document, &self.config));
    }

    /// Vérifie si des animations tournent encore
    pub fn is_animating(&self) -> bool {
        self.animations
            .as_ref()
            .map(|animations| !animations.is_finished())
            .unwrap_or(false)
    }

    /// Éléments des cartes de résumé avec leur titre
    ///
    /// CONCEPT RUST : Option dans un tuple
    /// - Un id absent du document donne None (carte affichée vide)
    pub fn summary_cards(&self) -> Vec<(&'static str, Option<Arc<MemoryElement>>)> {
        SUMMARY_TITLES
            .into_iter()
            .zip(self.config.summary_ids.all())
            .map(|(title, id)| (title, self.document.memory_element(id)))
            .collect()
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
        if let Some(animations) = &self.animations {
            animations.cancel();
        }
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// Libère les handles d'animation une fois tout terminé.
    pub fn tick(&mut self) {
        if self.animations.as_ref().is_some_and(Bootstrap::is_finished) {
            debug!("Startup animations finished");
            self.animations = None;
        }
    }

    /// Rafraîchissement manuel (touche 'r')
    pub fn refresh(&mut self) {
        refresh_dashboard();
        self.refresh_count += 1;
        self.last_refresh = Some(Local::now());
        info!(count = self.refresh_count, "Manual refresh requested");
    }

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

/// Construit la page : trois cartes de résumé puis les deux cartes graphiques
///
/// CONCEPT : data-valor
/// - La valeur finale est écrite en attribut, comme le ferait le serveur
/// - Le texte initial est zéro, le compteur l'anime ensuite
fn build_document(config: &DashboardConfig, snapshot: &DashboardSnapshot) -> MemoryDocument {
    let summary = snapshot.summary;
    let values = [summary.income, summary.expense, summary.balance];

    let mut document = MemoryDocument::new();

    for (id, value) in config.summary_ids.all().into_iter().zip(values) {
        document.push(
            MemoryElement::new()
                .with_id(id)
                .with_class(config.card_class.as_str())
                .with_data(config.value_attribute.as_str(), value.to_string())
                .with_text(format_brl(0.0)),
        );
    }

    for canvas_id in [&config.category_canvas_id, &config.trend_canvas_id] {
        document.push(
            MemoryElement::new()
                .with_id(canvas_id.as_str())
                .with_class(config.card_class.as_str()),
        );
    }

    document
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Document, Element};
    use chrono::NaiveDate;

    fn demo_app() -> App {
        let snapshot = DashboardSnapshot::demo(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        App::new(DashboardConfig::default(), snapshot).unwrap()
    }

    #[test]
    fn test_app_creation() {
        let app = demo_app();

        assert!(app.is_running());
        assert!(!app.is_animating());
        assert_eq!(app.document.len(), 5);
        assert_eq!(app.document.elements_by_class("card").len(), 5);
        assert!(app.charts.chart("grafico-categorias").is_some());
        assert!(app.charts.chart("grafico-evolucao").is_some());
    }

    #[test]
    fn test_summary_elements_carry_values() {
        let app = demo_app();
        let income = app.document.element_by_id("receitas-mes").unwrap();

        assert_eq!(
            income.data_attribute("valor"),
            Some(app.snapshot.summary.income.to_string())
        );
        assert_eq!(income.text(), "R$\u{a0}0,00");

        let cards = app.summary_cards();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2].0, "Saldo do Mês");
        assert!(cards.iter().all(|(_, element)| element.is_some()));
    }

    #[test]
    fn test_app_quit_two_step() {
        let mut app = demo_app();

        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());

        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_refresh_counts() {
        let mut app = demo_app();
        app.refresh();
        app.refresh();

        assert_eq!(app.refresh_count, 2);
        assert!(app.last_refresh.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_animations_runs_to_completion() {
        let mut app = demo_app();
        app.start_animations();
        assert!(app.is_animating());

        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
        app.tick();

        assert!(!app.is_animating());
        let balance = app.document.memory_element("saldo-mes").unwrap();
        assert_eq!(balance.text(), format_brl(app.snapshot.summary.balance));
        assert!(app
            .document
            .elements_by_class("card")
            .iter()
            .all(|card| card.has_class("fade-in")));
    }
}
