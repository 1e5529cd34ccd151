// ============================================================================
// Structure : MonthlyRecord
// ============================================================================
// Un mois agrégé : recettes, dépenses et solde résultant
// Le label du mois est déjà formaté par le serveur ("Jan/2026", "Fev", …)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Un point de la série d'évolution mensuelle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Label du mois (axe X du graphique)
    #[serde(rename = "mes")]
    pub month: String,

    /// Total des recettes du mois
    #[serde(rename = "receitas")]
    pub income: f64,

    /// Total des dépenses du mois
    #[serde(rename = "despesas")]
    pub expense: f64,

    /// Solde du mois (recettes - dépenses, calculé côté serveur)
    #[serde(rename = "saldo")]
    pub balance: f64,
}

impl MonthlyRecord {
    pub fn new(month: impl Into<String>, income: f64, expense: f64, balance: f64) -> Self {
        Self {
            month: month.into(),
            income,
            expense,
            balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_server_keys() {
        let json = r#"{"mes": "Out/2026", "receitas": 5000, "despesas": 3200.5, "saldo": 1799.5}"#;

        let record: MonthlyRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record, MonthlyRecord::new("Out/2026", 5000.0, 3200.5, 1799.5));
    }
}
