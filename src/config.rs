// ============================================================================
// Configuration du dashboard
// ============================================================================
// Paramètres des animations, identifiants des éléments de la page et
// rafraîchissement automatique (désactivé par défaut).
//
// Ordre de recherche du fichier :
// 1. variable d'environnement LAZYBUDGET_CONFIG
// 2. <config_dir>/lazybudget/config.json (~/.config/ sur Linux)
// 3. valeurs par défaut si aucun fichier
//
// CONCEPTS RUST :
// 1. #[serde(default)] : un fichier partiel complète avec Default
// 2. Option<PathBuf> : dirs peut ne pas trouver de répertoire de config
// ============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Variable d'environnement pointant vers un fichier de config
pub const CONFIG_ENV_VAR: &str = "LAZYBUDGET_CONFIG";

/// Identifiants des trois cartes de résumé
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryIds {
    pub income: String,
    pub expense: String,
    pub balance: String,
}

impl Default for SummaryIds {
    fn default() -> Self {
        Self {
            income: "receitas-mes".to_string(),
            expense: "despesas-mes".to_string(),
            balance: "saldo-mes".to_string(),
        }
    }
}

impl SummaryIds {
    /// Les trois ids dans l'ordre recettes, dépenses, solde
    pub fn all(&self) -> [&str; 3] {
        [
            self.income.as_str(),
            self.expense.as_str(),
            self.balance.as_str(),
        ]
    }
}

/// Configuration complète
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Durée d'animation des compteurs
    pub counter_duration_ms: u64,

    /// Période entre deux images d'un compteur
    pub frame_interval_ms: u64,

    /// Décalage entre les fade-in de deux cartes successives
    pub fade_stagger_ms: u64,

    /// Période de la boucle d'événements du terminal
    pub tick_rate_ms: u64,

    pub summary_ids: SummaryIds,

    /// Nom de l'attribut data-* portant la valeur finale (data-valor)
    pub value_attribute: String,

    /// Classe des cartes animées
    pub card_class: String,

    /// Classe ajoutée pour déclencher le fade-in
    pub fade_class: String,

    pub category_canvas_id: String,
    pub trend_canvas_id: String,

    /// Rafraîchissement automatique (None : désactivé)
    pub auto_refresh_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            counter_duration_ms: 1000,
            frame_interval_ms: 16,
            fade_stagger_ms: 100,
            tick_rate_ms: 16,
            summary_ids: SummaryIds::default(),
            value_attribute: "valor".to_string(),
            card_class: "card".to_string(),
            fade_class: "fade-in".to_string(),
            category_canvas_id: "grafico-categorias".to_string(),
            trend_canvas_id: "grafico-evolucao".to_string(),
            auto_refresh_secs: None,
        }
    }
}

impl DashboardConfig {
    /// Charge la configuration (env, puis répertoire de config, puis défauts)
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => match default_config_path() {
                Some(path) => Self::load_from(&path),
                None => {
                    debug!("No config directory available, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Charge un fichier précis ; absent = valeurs par défaut
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire la config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Config JSON invalide : {}", path.display()))?;

        info!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    /// Période des compteurs (au moins 1 ms, tokio refuse zéro)
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn fade_stagger(&self) -> Duration {
        Duration::from_millis(self.fade_stagger_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    /// Période de rafraîchissement automatique, si activée
    pub fn auto_refresh_period(&self) -> Option<Duration> {
        self.auto_refresh_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

/// Chemin par défaut : <config_dir>/lazybudget/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lazybudget").join("config.json"))
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();

        assert_eq!(config.counter_duration(), Duration::from_millis(1000));
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert_eq!(config.fade_stagger(), Duration::from_millis(100));
        assert_eq!(config.summary_ids.all(), ["receitas-mes", "despesas-mes", "saldo-mes"]);
        assert_eq!(config.value_attribute, "valor");
        assert_eq!(config.auto_refresh_period(), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"fade_stagger_ms": 250, "summary_ids": {"balance": "saldo"}}"#;
        let config: DashboardConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.fade_stagger(), Duration::from_millis(250));
        assert_eq!(config.summary_ids.balance, "saldo");
        assert_eq!(config.summary_ids.income, "receitas-mes");
        assert_eq!(config.card_class, "card");
    }

    #[test]
    fn test_zero_periods_are_clamped() {
        let config = DashboardConfig {
            frame_interval_ms: 0,
            tick_rate_ms: 0,
            auto_refresh_secs: Some(0),
            ..DashboardConfig::default()
        };

        assert_eq!(config.frame_interval(), Duration::from_millis(1));
        assert_eq!(config.tick_rate(), Duration::from_millis(1));
        assert_eq!(config.auto_refresh_period(), None);
    }

    #[test]
    fn test_load_from_missing_file() {
        let config = DashboardConfig::load_from(Path::new("/nonexistent/lazybudget.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_load_from_invalid_file() {
        let path = std::env::temp_dir().join(format!("lazybudget-bad-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let result = DashboardConfig::load_from(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("lazybudget-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"auto_refresh_secs": 300}"#).unwrap();

        let config = DashboardConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.auto_refresh_period(), Some(Duration::from_secs(300)));
    }
}
