// ============================================================================
// Configuration de graphique (forme Chart.js)
// ============================================================================
// Décrit un graphique indépendamment de la surface qui le dessine :
// type, labels, séries et options (titre, légende, tooltip, axes).
//
// La forme sérialisée (serde, camelCase) est celle qu'attend Chart.js.
// Les callbacks JavaScript (label du tooltip, ticks de l'axe Y) deviennent
// des pointeurs de fonction Rust, non sérialisés, évalués par la surface.
//
// CONCEPTS RUST :
// 1. #[serde(rename_all = "camelCase")] : noms JSON différents des noms Rust
// 2. #[serde(untagged)] : une couleur OU une palette dans le même champ
// 3. fn(...) -> String : pointeurs de fonction pour remplacer les callbacks
// ============================================================================

use serde::Serialize;

/// Type de graphique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Anneau (proportions)
    Doughnut,
    /// Lignes (séries temporelles)
    Line,
}

/// Configuration complète d'un graphique
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Labels (axe X ou parts) et séries
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Une série de valeurs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: Colors,
    pub border_color: Colors,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

/// Couleur unique ou palette cyclique
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colors {
    Single(String),
    Palette(Vec<String>),
}

impl Colors {
    /// Couleur du point `index`
    ///
    /// CONCEPT : Palette cyclique
    /// - Une palette plus courte que les données est répétée (index % len)
    /// - None seulement pour une palette vide
    pub fn at(&self, index: usize) -> Option<&str> {
        match self {
            Colors::Single(color) => Some(color.as_str()),
            Colors::Palette(palette) if palette.is_empty() => None,
            Colors::Palette(palette) => Some(palette[index % palette.len()].as_str()),
        }
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Plugins {
    pub title: TitleOptions,
    pub legend: LegendOptions,
    pub tooltip: TooltipOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
    pub font: FontSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontSpec {
    pub size: u32,
    pub weight: FontWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendOptions {
    pub position: LegendPosition,
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub padding: u32,
    pub use_point_style: bool,
}

/// Contexte passé au callback du tooltip
///
/// CONCEPT RUST : Lifetime 'a
/// - Le contexte emprunte les données de la configuration
/// - Aucune copie des séries pour calculer un label
#[derive(Debug, Clone, Copy)]
pub struct TooltipContext<'a> {
    /// Label du point (catégorie ou mois)
    pub label: &'a str,
    /// Label de la série (None pour l'anneau)
    pub dataset_label: Option<&'a str>,
    /// Valeur du point survolé
    pub value: f64,
    /// Valeurs actuelles de toute la série
    pub dataset_values: &'a [f64],
}

/// Callback de label du tooltip
pub type TooltipLabelFn = fn(&TooltipContext<'_>) -> String;

/// Callback de label des ticks d'un axe
pub type TickLabelFn = fn(f64) -> String;

#[derive(Debug, Clone, Serialize)]
pub struct TooltipOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<InteractionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersect: Option<bool>,
    #[serde(skip)]
    pub label: Option<TooltipLabelFn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Tous les points partageant la même position X
    Index,
    /// Le point le plus proche
    Nearest,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scales {
    pub x: AxisOptions,
    pub y: AxisOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisOptions {
    pub display: bool,
    pub title: AxisTitle,
    #[serde(skip)]
    pub tick_label: Option<TickLabelFn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Interaction {
    pub mode: InteractionMode,
    pub axis: InteractionAxis,
    pub intersect: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionAxis {
    X,
    Y,
}

// ============================================================================
// Évaluation des callbacks
// ============================================================================

impl ChartConfig {
    /// Label du tooltip pour un point d'une série
    ///
    /// CONCEPT RUST : Option chaining avec ?
    /// - Série ou point hors limites : None
    /// - Sans callback : format par défaut "label: valeur"
    pub fn tooltip_label(&self, dataset: usize, index: usize) -> Option<String> {
        let series = self.data.datasets.get(dataset)?;
        let value = *series.data.get(index)?;
        let label = self.data.labels.get(index).map(String::as_str).unwrap_or("");

        let context = TooltipContext {
            label,
            dataset_label: series.label.as_deref(),
            value,
            dataset_values: &series.data,
        };

        Some(match self.options.plugins.tooltip.label {
            Some(callback) => callback(&context),
            None => format!("{}: {}", context.dataset_label.unwrap_or(label), value),
        })
    }

    /// Lignes du tooltip affiché au survol du point `index` de `dataset`
    ///
    /// En mode Index, toutes les séries à cette position sont affichées ensemble.
    pub fn tooltip_at(&self, dataset: usize, index: usize) -> Vec<String> {
        match self.options.plugins.tooltip.mode {
            Some(InteractionMode::Index) => (0..self.data.datasets.len())
                .filter_map(|d| self.tooltip_label(d, index))
                .collect(),
            _ => self.tooltip_label(dataset, index).into_iter().collect(),
        }
    }

    /// Label d'un tick de l'axe Y
    pub fn y_tick_label(&self, value: f64) -> String {
        match self.options.scales.as_ref().and_then(|s| s.y.tick_label) {
            Some(callback) => callback(value),
            None => value.to_string(),
        }
    }

    /// Titre affiché au-dessus du graphique (None si masqué)
    pub fn title(&self) -> Option<&str> {
        let title = &self.options.plugins.title;
        title.display.then_some(title.text.as_str())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
