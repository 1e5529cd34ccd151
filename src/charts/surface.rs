// ============================================================================
// Surface de rendu
// ============================================================================
// Interface minimale entre les constructeurs de graphiques et le moteur
// qui dessine réellement (navigateur, terminal, tests).
//
// CONCEPTS RUST :
// 1. Trait : contrat commun à toutes les surfaces
// 2. Handle opaque : l'appelant ne voit qu'un identifiant
// 3. Generics avec IntoIterator : ChartRegistry::new(["a", "b"])
// ============================================================================

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::charts::config::ChartConfig;

/// Surface capable d'afficher un graphique dans un canvas identifié
pub trait RenderSurface {
    /// Attache un graphique au canvas `canvas_id`
    ///
    /// Échoue si le canvas n'existe pas sur cette surface.
    fn attach(&mut self, canvas_id: &str, config: ChartConfig) -> Result<ChartHandle>;
}

/// Handle opaque d'un graphique attaché
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartHandle {
    id: u64,
    canvas_id: String,
}

impl ChartHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }
}

/// Un canvas et le graphique qui l'occupe
#[derive(Debug)]
struct Canvas {
    id: String,
    chart: Option<(ChartHandle, ChartConfig)>,
}

/// Surface en mémoire : garde les configurations par canvas
///
/// CONCEPT : Séparation construction / rendu
/// - Les constructeurs attachent des ChartConfig ici
/// - L'interface terminal lit ensuite les configurations pour dessiner
/// - Les tests inspectent directement ce qui a été attaché
#[derive(Debug, Default)]
pub struct ChartRegistry {
    canvases: Vec<Canvas>,
    next_id: u64,
}

impl ChartRegistry {
    /// Crée une surface avec les canvas donnés (ordre conservé)
    pub fn new<I, S>(canvas_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            canvases: canvas_ids
                .into_iter()
                .map(|id| Canvas { id: id.into(), chart: None })
                .collect(),
            next_id: 1,
        }
    }

    /// Configuration du graphique attaché au canvas, s'il y en a un
    pub fn chart(&self, canvas_id: &str) -> Option<&ChartConfig> {
        self.canvases
            .iter()
            .find(|canvas| canvas.id == canvas_id)
            .and_then(|canvas| canvas.chart.as_ref())
            .map(|(_, config)| config)
    }

    /// Handle du graphique attaché au canvas
    pub fn handle(&self, canvas_id: &str) -> Option<&ChartHandle> {
        self.canvases
            .iter()
            .find(|canvas| canvas.id == canvas_id)
            .and_then(|canvas| canvas.chart.as_ref())
            .map(|(handle, _)| handle)
    }

    /// Identifiants des canvas, dans l'ordre de création
    pub fn canvas_ids(&self) -> impl Iterator<Item = &str> {
        self.canvases.iter().map(|canvas| canvas.id.as_str())
    }
}

impl RenderSurface for ChartRegistry {
    fn attach(&mut self, canvas_id: &str, config: ChartConfig) -> Result<ChartHandle> {
        let Some(canvas) = self.canvases.iter_mut().find(|canvas| canvas.id == canvas_id) else {
            bail!("Canvas introuvable : {}", canvas_id);
        };

        // Un canvas ne porte qu'un graphique : le nouveau remplace l'ancien
        if let Some((previous, _)) = canvas.chart.take() {
            warn!(canvas_id = %canvas_id, previous = previous.id, "Replacing chart on canvas");
        }

        let handle = ChartHandle {
            id: self.next_id,
            canvas_id: canvas_id.to_string(),
        };
        self.next_id += 1;

        info!(canvas_id = %canvas_id, chart_id = handle.id, kind = ?config.kind, "Chart attached");
        canvas.chart = Some((handle.clone(), config));
        Ok(handle)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::build_trend_chart;

    #[test]
    fn test_attach_and_lookup() {
        let mut registry = ChartRegistry::new(["a", "b"]);
        assert!(registry.chart("a").is_none());

        let handle = registry.attach("b", build_trend_chart(&[])).unwrap();

        assert_eq!(handle.canvas_id(), "b");
        assert!(registry.chart("b").is_some());
        assert_eq!(registry.handle("b"), Some(&handle));
        assert!(registry.chart("a").is_none());
        assert_eq!(registry.canvas_ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_attach_unknown_canvas() {
        let mut registry = ChartRegistry::new(["a"]);
        let err = registry.attach("zzz", build_trend_chart(&[])).unwrap_err();
        assert!(err.to_string().contains("zzz"));
    }

    #[test]
    fn test_attach_replaces_previous_chart() {
        let mut registry = ChartRegistry::new(["a"]);

        let first = registry.attach("a", build_trend_chart(&[])).unwrap();
        let second = registry.attach("a", build_trend_chart(&[])).unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(registry.handle("a"), Some(&second));
    }
}
