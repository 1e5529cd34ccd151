// ============================================================================
// Structure : DashboardSnapshot
// ============================================================================
// Ensemble des données qu'une page de dashboard reçoit du serveur :
// - résumé du mois courant (recettes, dépenses, solde)
// - totaux par catégorie pour le graphique en anneau
// - six derniers mois pour le graphique d'évolution
//
// CONCEPTS RUST :
// 1. Composition : le snapshot contient les autres modèles
// 2. #[serde(default)] : champs optionnels dans le JSON
// 3. anyhow::Context : messages d'erreur lisibles pour l'I/O
// ============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{CategoryTotal, MonthlyRecord};

/// Abréviations des mois, telles que le serveur les écrit
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Titre par défaut du graphique des catégories
pub const DEFAULT_CATEGORY_TITLE: &str = "Despesas por Categoria";

/// Résumé du mois courant (les trois cartes du haut)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthSummary {
    #[serde(rename = "receitas")]
    pub income: f64,

    #[serde(rename = "despesas")]
    pub expense: f64,

    #[serde(rename = "saldo")]
    pub balance: f64,
}

/// Données complètes d'une page de dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Résumé du mois courant
    #[serde(rename = "resumo", default)]
    pub summary: MonthSummary,

    /// Totaux par catégorie (ordre conservé tel quel)
    #[serde(rename = "categorias", default)]
    pub categories: Vec<CategoryTotal>,

    /// Titre affiché au-dessus du graphique des catégories
    #[serde(rename = "titulo_categorias", default = "default_category_title")]
    pub category_title: String,

    /// Évolution mensuelle (six mois attendus, non imposé)
    #[serde(rename = "evolucao", default)]
    pub trend: Vec<MonthlyRecord>,
}

fn default_category_title() -> String {
    DEFAULT_CATEGORY_TITLE.to_string()
}

impl DashboardSnapshot {
    /// Construit un snapshot de démonstration pour les six mois précédant `today`
    ///
    /// CONCEPT : Données de démo déterministes
    /// - Les montants sont fixes, seuls les labels de mois dépendent de la date
    /// - Permet de lancer le TUI sans serveur
    pub fn demo(today: NaiveDate) -> Self {
        let incomes = [5200.0, 5200.0, 5450.0, 5200.0, 6100.0, 5800.0];
        let expenses = [3900.0, 4350.5, 3720.0, 4980.25, 4100.0, 3650.75];

        let trend = last_six_month_labels(today)
            .into_iter()
            .zip(incomes.iter().zip(expenses.iter()))
            .map(|(month, (&income, &expense))| {
                MonthlyRecord::new(month, income, expense, income - expense)
            })
            .collect::<Vec<_>>();

        let summary = trend
            .last()
            .map(|current| MonthSummary {
                income: current.income,
                expense: current.expense,
                balance: current.balance,
            })
            .unwrap_or_default();

        Self {
            summary,
            categories: vec![
                CategoryTotal::new("Moradia", 1500.0),
                CategoryTotal::new("Alimentação", 980.4),
                CategoryTotal::new("Transporte", 420.0),
                CategoryTotal::new("Saúde", 310.35),
                CategoryTotal::new("Lazer", 250.0),
                CategoryTotal::new("Educação", 190.0),
            ],
            category_title: default_category_title(),
            trend,
        }
    }
}

/// Charge un snapshot depuis un fichier JSON
///
/// CONCEPT RUST : Propagation d'erreurs avec contexte
/// - read_to_string() peut échouer (fichier absent, droits)
/// - from_str() peut échouer (JSON invalide)
/// - .with_context() ajoute le chemin au message d'erreur
pub fn load_snapshot(path: &Path) -> Result<DashboardSnapshot> {
    debug!(path = %path.display(), "Reading dashboard snapshot");

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire le snapshot {}", path.display()))?;

    let snapshot: DashboardSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Snapshot JSON invalide : {}", path.display()))?;

    info!(
        categories = snapshot.categories.len(),
        months = snapshot.trend.len(),
        "Dashboard snapshot loaded"
    );
    Ok(snapshot)
}

/// Labels "Mmm/AAAA" des six derniers mois, du plus ancien au mois courant
fn last_six_month_labels(today: NaiveDate) -> Vec<String> {
    let first_of_month = today.with_day(1).unwrap_or(today);

    (0..6u32)
        .rev()
        .filter_map(|offset| first_of_month.checked_sub_months(Months::new(offset)))
        .map(|date| format!("{}/{}", MONTH_LABELS[date.month0() as usize], date.year()))
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================
