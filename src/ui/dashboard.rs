// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine la page du dashboard dans le terminal :
// - trois cartes de résumé (compteurs animés)
// - graphique des catégories (légende colorée + tooltips)
// - graphique d'évolution (trois courbes)
//
// Une carte reste grisée tant qu'elle n'a pas reçu la classe fade-in.
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. Chart widget : courbes à partir de points (x, y)
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::charts::ChartConfig;
use crate::page::Element;

/// Couleur d'une carte pas encore apparue
const HIDDEN_COLOR: Color = Color::DarkGray;

/// Couleurs de bordure des cartes de résumé (recettes, dépenses, solde)
const SUMMARY_COLORS: [Color; 3] = [Color::Green, Color::Red, Color::Cyan];

/// Dessine l'interface complète
///
/// # Arguments
/// * `frame` - Surface de dessin ratatui
/// * `app` - État de l'application
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Cartes de résumé
            Constraint::Min(10),   // Graphiques
            Constraint::Length(3), // Footer
        ])
        .split(frame.size())
        .to_vec();

    render_header(frame, chunks[0]);
    render_summary_cards(frame, app, chunks[1]);
    render_charts(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

// ============================================================================
// Header
// ============================================================================

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyBudget ")
        .title_alignment(Alignment::Center);

    let text = Line::from(Span::styled(
        "💰 Painel Financeiro",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Cartes de résumé
// ============================================================================

/// Dessine les trois compteurs côte à côte
///
/// CONCEPT : Lecture concurrente
/// - Les tâches tokio écrivent le texte des éléments
/// - Le rendu relit simplement le texte courant à chaque frame
fn render_summary_cards(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area)
        .to_vec();

    for (((title, element), color), column) in app
        .summary_cards()
        .into_iter()
        .zip(SUMMARY_COLORS)
        .zip(columns)
    {
        let visible = element
            .as_ref()
            .map(|e| e.has_class(&app.config.fade_class))
            .unwrap_or(false);
        let color = if visible { color } else { HIDDEN_COLOR };

        let value = element.map(|e| e.text()).unwrap_or_default();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", title));

        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(block)
        .alignment(Alignment::Center);

        frame.render_widget(paragraph, column);
    }
}

// ============================================================================
// Graphiques
// ============================================================================

fn render_charts(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area)
        .to_vec();

    let category_id = app.config.category_canvas_id.as_str();
    let trend_id = app.config.trend_canvas_id.as_str();

    match app.charts.chart(category_id) {
        Some(config) => render_category_chart(frame, config, is_visible(app, category_id), columns[0]),
        None => render_no_data(frame, columns[0], "Gráfico de categorias indisponível"),
    }

    match app.charts.chart(trend_id) {
        Some(config) => render_trend_chart(frame, config, is_visible(app, trend_id), columns[1]),
        None => render_no_data(frame, columns[1], "Gráfico de evolução indisponível"),
    }
}

/// La carte portant cet id a-t-elle reçu le fade-in ?
fn is_visible(app: &App, id: &str) -> bool {
    app.document
        .memory_element(id)
        .map(|card| card.has_class(&app.config.fade_class))
        .unwrap_or(false)
}

/// Dessine l'anneau des catégories sous forme de légende
///
/// CONCEPT : Légende = tooltip
/// - Une ligne par part, avec la couleur de la palette
/// - Le texte est le label du tooltip (montant + pourcentage)
fn render_category_chart(frame: &mut Frame, config: &ChartConfig, visible: bool, area: Rect) {
    let border = if visible { Color::White } else { HIDDEN_COLOR };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", config.title().unwrap_or_default()));

    let Some(dataset) = config.data.datasets.first() else {
        frame.render_widget(Paragraph::new("Sem dados").block(block), area);
        return;
    };

    let items: Vec<ListItem> = (0..dataset.data.len())
        .filter_map(|index| {
            let text = config.tooltip_label(0, index)?;
            let color = if visible {
                dataset
                    .background_color
                    .at(index)
                    .and_then(hex_color)
                    .unwrap_or(Color::White)
            } else {
                HIDDEN_COLOR
            };

            Some(ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::raw(text),
            ])))
        })
        .collect();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("Sem dados")
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    frame.render_widget(List::new(items).block(block), area);
}

/// Dessine les trois courbes d'évolution
///
/// CONCEPT RUST : Durée de vie des points
/// - Dataset emprunte ses points : on les calcule tous avant de créer le Chart
fn render_trend_chart(frame: &mut Frame, config: &ChartConfig, visible: bool, area: Rect) {
    let points: Vec<Vec<(f64, f64)>> = config
        .data
        .datasets
        .iter()
        .map(|dataset| {
            dataset
                .data
                .iter()
                .enumerate()
                .map(|(i, &value)| (i as f64, value))
                .collect()
        })
        .collect();

    let all_values = points.iter().flatten().map(|&(_, y)| y).filter(|y| y.is_finite());
    let Some((min, max)) = all_values.fold(None, |bounds: Option<(f64, f64)>, y| match bounds {
        None => Some((y, y)),
        Some((min, max)) => Some((min.min(y), max.max(y))),
    }) else {
        render_no_data(frame, area, "Sem dados de evolução");
        return;
    };

    // Marge de 5% pour que le graphique respire
    let margin = ((max - min) * 0.05).max(1.0);
    let (y_min, y_max) = (min - margin, max + margin);

    let datasets: Vec<Dataset> = config
        .data
        .datasets
        .iter()
        .zip(&points)
        .map(|(dataset, data)| {
            let color = if visible {
                dataset.border_color.at(0).and_then(hex_color).unwrap_or(Color::White)
            } else {
                HIDDEN_COLOR
            };

            Dataset::default()
                .name(dataset.label.clone().unwrap_or_default())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(data)
        })
        .collect();

    let labels = &config.data.labels;
    let x_labels: Vec<Span> = match labels.len() {
        0 => Vec::new(),
        1..=6 => labels.iter().map(|label| Span::raw(label.clone())).collect(),
        n => vec![Span::raw(labels[0].clone()), Span::raw(labels[n - 1].clone())],
    };

    let (x_title, y_title) = config
        .options
        .scales
        .as_ref()
        .map(|scales| (scales.x.title.text.clone(), scales.y.title.text.clone()))
        .unwrap_or_default();

    let x_axis = Axis::default()
        .title(x_title)
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, (labels.len().saturating_sub(1)).max(1) as f64])
        .labels(x_labels);

    let y_axis = Axis::default()
        .title(y_title)
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(config.y_tick_label(y_min)),
            Span::raw(config.y_tick_label((y_min + y_max) / 2.0)),
            Span::raw(config.y_tick_label(y_max)),
        ]);

    let border = if visible { Color::White } else { HIDDEN_COLOR };
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", config.title().unwrap_or_default())),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

// ============================================================================
// Footer : Instructions
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        let mut spans = vec![
            Span::styled("[q]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit  "),
            Span::styled("[r]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Refresh"),
        ];

        if let Some(at) = app.last_refresh {
            spans.push(Span::styled(
                format!("  (dernier : {})", at.format("%H:%M:%S")),
                Style::default().fg(Color::Gray),
            ));
        }

        Line::from(spans)
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Helpers
// ============================================================================

/// Affiche un message quand il n'y a pas de données à afficher
fn render_no_data(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" ⚠ ");

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
    ])
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Convertit une couleur CSS "#RRGGBB" en couleur ratatui
///
/// CONCEPT RUST : u8::from_str_radix
/// - Parse chaque paire hexadécimale
/// - .ok()? : early return None si invalide
fn hex_color(css: &str) -> Option<Color> {
    let hex = css.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::models::DashboardSnapshot;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#FF6384"), Some(Color::Rgb(0xFF, 0x63, 0x84)));
        assert_eq!(hex_color("#28a745"), Some(Color::Rgb(0x28, 0xa7, 0x45)));
        assert_eq!(hex_color("#fff"), None);
        assert_eq!(hex_color("rgba(40, 167, 69, 0.1)"), None);
    }

    #[test]
    fn test_render_demo_dashboard() {
        let snapshot = DashboardSnapshot::demo(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        let app = App::new(DashboardConfig::default(), snapshot).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("LazyBudget"));
        assert!(text.contains("Receitas do Mês"));
        assert!(text.contains("Moradia"));
        assert!(text.contains("Despesas por Categoria"));
    }

    #[test]
    fn test_render_empty_snapshot() {
        let snapshot = DashboardSnapshot {
            summary: Default::default(),
            categories: Vec::new(),
            category_title: "Vazio".to_string(),
            trend: Vec::new(),
        };
        let app = App::new(DashboardConfig::default(), snapshot).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Sem dados"));
    }
}
