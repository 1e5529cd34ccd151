// ============================================================================
// Graphique des catégories (anneau)
// ============================================================================
// Transforme une liste de CategoryTotal en graphique de proportions :
// - une part par catégorie, dans l'ordre reçu
// - palette fixe de 8 couleurs, répétée si nécessaire
// - légende en bas, titre en gras au-dessus
// - tooltip : "<catégorie>: <montant> (<pourcentage>%)"
// ============================================================================

use anyhow::Result;
use tracing::{debug, instrument};

use crate::charts::config::{
    ChartConfig, ChartData, ChartKind, ChartOptions, Colors, Dataset, FontSpec, FontWeight,
    LegendLabels, LegendOptions, LegendPosition, Plugins, TitleOptions, TooltipContext,
    TooltipOptions,
};
use crate::charts::surface::{ChartHandle, RenderSurface};
use crate::currency::{format_brl, to_fixed};
use crate::models::CategoryTotal;

/// Palette des parts (la première couleur revient en 7e position)
pub const CATEGORY_PALETTE: [&str; 8] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#FF6384", "#C9CBCF",
];

/// Construit la configuration du graphique des catégories
///
/// CONCEPT RUST : Iterator chaining
/// - .iter().map() deux fois : labels puis valeurs, même ordre
/// - Aucune validation : les données arrivent déjà agrégées
pub fn build_category_chart(data: &[CategoryTotal], title: &str) -> ChartConfig {
    let labels = data.iter().map(|item| item.category_name.clone()).collect();
    let values = data.iter().map(|item| item.total).collect();

    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: None,
                data: values,
                background_color: Colors::Palette(
                    CATEGORY_PALETTE.iter().map(|c| c.to_string()).collect(),
                ),
                border_color: Colors::Single("#fff".to_string()),
                border_width: 2,
                fill: None,
                tension: None,
            }],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins {
                title: TitleOptions {
                    display: true,
                    text: title.to_string(),
                    font: FontSpec { size: 16, weight: FontWeight::Bold },
                },
                legend: LegendOptions {
                    position: LegendPosition::Bottom,
                    labels: LegendLabels { padding: 20, use_point_style: true },
                },
                tooltip: TooltipOptions {
                    mode: None,
                    intersect: None,
                    label: Some(category_tooltip_label),
                },
            },
            scales: None,
            interaction: None,
        },
    }
}

/// Construit le graphique et l'attache à la surface
///
/// CONCEPT RUST : &mut dyn Trait
/// - N'importe quelle surface (terminal, navigateur, test) convient
/// - Le handle retourné peut être ignoré par l'appelant
#[instrument(skip(surface, data), fields(slices = data.len()))]
pub fn create_category_chart(
    surface: &mut dyn RenderSurface,
    canvas_id: &str,
    data: &[CategoryTotal],
    title: &str,
) -> Result<ChartHandle> {
    let config = build_category_chart(data, title);
    debug!("Attaching category chart");
    surface.attach(canvas_id, config)
}

/// Callback du tooltip : montant et part du total
///
/// CONCEPT : Pourcentage calculé à chaque appel
/// - La somme est refaite sur les valeurs actuelles de la série
/// - Total nul : division non protégée (NaN ou Infinity)
pub fn category_tooltip_label(context: &TooltipContext<'_>) -> String {
    let total: f64 = context.dataset_values.iter().sum();
    let percentage = to_fixed(context.value / total * 100.0, 1);

    format!(
        "{}: {} ({}%)",
        context.label,
        format_brl(context.value),
        percentage
    )
}

// ============================================================================
// Tests unitaires
// ============================================================================
