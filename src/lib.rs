// ============================================================================
// LazyBudget - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod currency;  // Formatage en réais (R$)
pub mod models;    // Structures de données
pub mod charts;    // Configuration des graphiques
pub mod page;      // Compteurs animés et initialisation de la page
pub mod refresh;   // Rafraîchissement du dashboard
pub mod config;    // Configuration utilisateur
pub mod app;       // État de l'application
pub mod ui;        // Interface utilisateur
