// ============================================================================
// Rafraîchissement du dashboard
// ============================================================================
// Point d'accroche pour une future mise à jour des données en temps réel.
// Pour l'instant refresh_dashboard() ne fait que journaliser l'appel.
//
// RefreshScheduler l'appelle périodiquement (ex: toutes les 5 minutes),
// mais rien ne le démarre par défaut : il faut auto_refresh_secs dans la
// configuration.
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

/// Période suggérée pour le rafraîchissement automatique
pub const SUGGESTED_REFRESH_PERIOD: Duration = Duration::from_secs(300);

/// Rafraîchit le dashboard (bouchon : journalise seulement)
pub fn refresh_dashboard() {
    info!("Refreshing dashboard...");
}

/// Appel périodique de refresh_dashboard()
///
/// CONCEPT RUST : Drop
/// - La tâche est arrêtée quand le scheduler est détruit
/// - Pas de timer qui survit à son propriétaire
#[derive(Debug)]
pub struct RefreshScheduler {
    task: JoinHandle<()>,
    count: Arc<AtomicU64>,
}

impl RefreshScheduler {
    /// Démarre le rafraîchissement ; premier appel après une période
    ///
    /// Doit être appelée depuis un runtime tokio.
    pub fn spawn(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let count = Arc::new(AtomicU64::new(0));
        let task_count = Arc::clone(&count);

        info!(period_secs = period.as_secs(), "Auto refresh enabled");

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                refresh_dashboard();
                task_count.fetch_add(1, Ordering::Relaxed);
            }
        });

        Self { task, count }
    }

    /// Nombre de rafraîchissements effectués
    pub fn refresh_count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
