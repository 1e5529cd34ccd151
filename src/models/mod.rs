// ============================================================================
// Module : models
// ============================================================================
// Ce module contient les structures de données agrégées par le serveur
// (totaux par catégorie, évolution mensuelle, résumé du mois courant)
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module public (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod category_total; // Total agrégé d'une catégorie
pub mod monthly_record; // Un mois de recettes / dépenses / solde
pub mod snapshot;       // Ensemble des données d'une page de dashboard

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazybudget::models::category_total::CategoryTotal;
// On peut faire : use lazybudget::models::CategoryTotal;
pub use category_total::CategoryTotal;
pub use monthly_record::MonthlyRecord;
pub use snapshot::{load_snapshot, DashboardSnapshot, MonthSummary};
