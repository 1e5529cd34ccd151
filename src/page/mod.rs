// ============================================================================
// Module : page
// ============================================================================
// Comportements de la page du dashboard : document abstrait, compteurs
// animés et initialisation au chargement
// ============================================================================

pub mod dom;       // Traits Document / Element + implémentation en mémoire
pub mod counter;   // Compteur animé (timer local annulable)
pub mod bootstrap; // Lancement des animations au chargement

// Re-exports pour simplifier les imports
pub use bootstrap::{bootstrap, parse_float_or_zero, Bootstrap};
pub use counter::{animate_counter, CounterAnimation, CounterHandle, DEFAULT_COUNTER_DURATION};
pub use dom::{Document, Element, MemoryDocument, MemoryElement};
