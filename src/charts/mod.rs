// ============================================================================
// Module : charts
// ============================================================================
// Constructeurs de graphiques du dashboard
//
// Les données déjà agrégées deviennent des ChartConfig, attachées ensuite
// à une RenderSurface (terminal, navigateur ou tests).
// ============================================================================

pub mod config;   // Configuration forme Chart.js + callbacks
pub mod category; // Anneau des catégories
pub mod trend;    // Courbe d'évolution mensuelle
pub mod surface;  // Trait RenderSurface et surface en mémoire

// Re-exports pour simplifier les imports
pub use category::{build_category_chart, create_category_chart, CATEGORY_PALETTE};
pub use config::{ChartConfig, ChartKind};
pub use surface::{ChartHandle, ChartRegistry, RenderSurface};
pub use trend::{build_trend_chart, create_trend_chart, TREND_TITLE};
