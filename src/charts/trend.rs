// ============================================================================
// Graphique d'évolution (six derniers mois)
// ============================================================================
// Trois séries sur le même axe X :
// - Receitas : vert, rempli
// - Despesas : rouge, rempli
// - Saldo    : bleu, non rempli
//
// L'axe X reprend les labels de mois dans l'ordre reçu (aucun tri).
// Axe Y et tooltips formatés en Real.
// ============================================================================

use anyhow::Result;
use tracing::{debug, instrument};

use crate::charts::config::{
    AxisOptions, AxisTitle, ChartConfig, ChartData, ChartKind, ChartOptions, Colors, Dataset,
    FontSpec, FontWeight, Interaction, InteractionAxis, InteractionMode, LegendLabels,
    LegendOptions, LegendPosition, Plugins, Scales, TitleOptions, TooltipContext, TooltipOptions,
};
use crate::charts::surface::{ChartHandle, RenderSurface};
use crate::currency::format_brl;
use crate::models::MonthlyRecord;

/// Titre fixe, quel que soit le nombre de mois reçus
pub const TREND_TITLE: &str = "Evolução Financeira (Últimos 6 Meses)";

/// Style d'une série de la courbe d'évolution
struct SeriesStyle {
    label: &'static str,
    border: &'static str,
    background: &'static str,
    fill: bool,
}

const INCOME_STYLE: SeriesStyle = SeriesStyle {
    label: "Receitas",
    border: "#28a745",
    background: "rgba(40, 167, 69, 0.1)",
    fill: true,
};

const EXPENSE_STYLE: SeriesStyle = SeriesStyle {
    label: "Despesas",
    border: "#dc3545",
    background: "rgba(220, 53, 69, 0.1)",
    fill: true,
};

const BALANCE_STYLE: SeriesStyle = SeriesStyle {
    label: "Saldo",
    border: "#17a2b8",
    background: "rgba(23, 162, 184, 0.1)",
    fill: false,
};

/// Construit la configuration du graphique d'évolution
///
/// CONCEPT RUST : Closure prenant une fonction d'extraction
/// - |r| r.income, |r| r.expense, … : même code pour les trois séries
pub fn build_trend_chart(data: &[MonthlyRecord]) -> ChartConfig {
    let series = |style: &SeriesStyle, value: fn(&MonthlyRecord) -> f64| Dataset {
        label: Some(style.label.to_string()),
        data: data.iter().map(value).collect(),
        background_color: Colors::Single(style.background.to_string()),
        border_color: Colors::Single(style.border.to_string()),
        border_width: 3,
        fill: Some(style.fill),
        tension: Some(0.4),
    };

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: data.iter().map(|record| record.month.clone()).collect(),
            datasets: vec![
                series(&INCOME_STYLE, |r| r.income),
                series(&EXPENSE_STYLE, |r| r.expense),
                series(&BALANCE_STYLE, |r| r.balance),
            ],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins {
                title: TitleOptions {
                    display: true,
                    text: TREND_TITLE.to_string(),
                    font: FontSpec { size: 16, weight: FontWeight::Bold },
                },
                legend: LegendOptions {
                    position: LegendPosition::Top,
                    labels: LegendLabels { padding: 20, use_point_style: true },
                },
                tooltip: TooltipOptions {
                    mode: Some(InteractionMode::Index),
                    intersect: Some(false),
                    label: Some(trend_tooltip_label),
                },
            },
            scales: Some(Scales {
                x: AxisOptions {
                    display: true,
                    title: AxisTitle { display: true, text: "Mês".to_string() },
                    tick_label: None,
                },
                y: AxisOptions {
                    display: true,
                    title: AxisTitle { display: true, text: "Valor (R$)".to_string() },
                    tick_label: Some(format_brl),
                },
            }),
            interaction: Some(Interaction {
                mode: InteractionMode::Nearest,
                axis: InteractionAxis::X,
                intersect: false,
            }),
        },
    }
}

/// Construit le graphique d'évolution et l'attache à la surface
#[instrument(skip(surface, data), fields(months = data.len()))]
pub fn create_trend_chart(
    surface: &mut dyn RenderSurface,
    canvas_id: &str,
    data: &[MonthlyRecord],
) -> Result<ChartHandle> {
    let config = build_trend_chart(data);
    debug!("Attaching trend chart");
    surface.attach(canvas_id, config)
}

/// Callback du tooltip : "<série>: <montant>"
pub fn trend_tooltip_label(context: &TooltipContext<'_>) -> String {
    format!(
        "{}: {}",
        context.dataset_label.unwrap_or_default(),
        format_brl(context.value)
    )
}

// ============================================================================
// Tests unitaires
// ============================================================================
