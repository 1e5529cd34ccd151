// ============================================================================
// Compteur animé
// ============================================================================
// Fait défiler un montant de 0 jusqu'à sa valeur finale (~60 images/s),
// en écrivant la valeur formatée en Real dans l'élément à chaque image.
//
// Deux couches :
// 1. CounterAnimation : machine à états pure, testable sans horloge
// 2. animate_counter : tâche tokio qui rythme la machine toutes les 16 ms
//
// CONCEPTS RUST :
// 1. Ownership : la tâche possède son animation, aucun état global
// 2. JoinHandle : handle local pour annuler ou attendre l'animation
// 3. tokio::time::interval_at : premier tick après une période (setInterval)
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::currency::format_brl;
use crate::page::dom::Element;

/// Période entre deux images (≈ 60 fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Durée par défaut d'une animation de compteur
pub const DEFAULT_COUNTER_DURATION: Duration = Duration::from_millis(1000);

/// Une image de l'animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterFrame {
    /// Valeur à afficher
    pub value: f64,
    /// true pour la dernière image (valeur finale atteinte)
    pub is_final: bool,
}

/// Machine à états du compteur
///
/// CONCEPT : Incrément constant
/// - increment = final / (durée / période), soit final / 62.5 pour 1 s
/// - L'animation s'arrête dès que la valeur courante n'est plus sous la cible,
///   puis la valeur est ramenée exactement à la cible
///
/// Cible négative : l'incrément est négatif et la première image donne une
/// valeur déjà ≥ cible. Le compteur saute donc à la valeur finale en une image.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: f64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    /// Animation vers `target` sur `duration`, à la période par défaut
    pub fn new(target: f64, duration: Duration) -> Self {
        Self::with_frame_interval(target, duration, FRAME_INTERVAL)
    }

    /// Animation avec une période d'image personnalisée
    ///
    /// CONCEPT : Calcul en nanosecondes
    /// - 1 s / 16 ms = 62.5 exactement en f64
    /// - Durée nulle : incrément infini (ou NaN), terminé en une image
    pub fn with_frame_interval(target: f64, duration: Duration, frame_interval: Duration) -> Self {
        let frames = duration.as_nanos() as f64 / frame_interval.as_nanos().max(1) as f64;

        Self {
            target,
            increment: target / frames,
            current: 0.0,
            finished: false,
        }
    }

    /// Avance d'une image
    ///
    /// CONCEPT : Condition d'arrêt "pas sous la cible"
    /// - !(current < target) est vrai pour current >= target
    /// - Vrai aussi si une valeur est NaN : l'animation ne peut pas boucler
    pub fn step(&mut self) -> CounterFrame {
        if !self.finished {
            self.current += self.increment;

            if !(self.current < self.target) {
                self.current = self.target;
                self.finished = true;
            }
        }

        CounterFrame {
            value: self.current,
            is_final: self.finished,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Handle d'une animation en cours
///
/// CONCEPT RUST : Ownership du timer
/// - Le timer appartient à l'appelant, pas à un état global
/// - cancel() arrête les ticks, finished() attend la fin
/// - Lâcher le handle détache la tâche (elle va jusqu'au bout)
#[derive(Debug)]
pub struct CounterHandle {
    task: JoinHandle<()>,
}

impl CounterHandle {
    /// Arrête l'animation ; l'élément garde la dernière valeur écrite
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Attend la fin de l'animation (une annulation compte comme une fin)
    pub async fn finished(self) -> Result<()> {
        match self.task.await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(e).context("La tâche du compteur a paniqué"),
        }
    }
}

/// Lance l'animation d'un compteur vers `final_value`
///
/// Doit être appelée depuis un runtime tokio.
pub fn animate_counter(
    element: Arc<dyn Element>,
    final_value: f64,
    duration: Duration,
) -> CounterHandle {
    animate_counter_with(
        element,
        CounterAnimation::new(final_value, duration),
        FRAME_INTERVAL,
    )
}

/// Lance une animation déjà construite, rythmée par `frame_interval`
pub fn animate_counter_with(
    element: Arc<dyn Element>,
    mut animation: CounterAnimation,
    frame_interval: Duration,
) -> CounterHandle {
    // tokio refuse une période nulle
    let period = frame_interval.max(Duration::from_millis(1));

    debug!(
        element = element.id().unwrap_or("?"),
        target = animation.target(),
        increment = animation.increment(),
        "Starting counter animation"
    );

    let task = tokio::spawn(async move {
        // Comme setInterval : le premier tick arrive après une période
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let frame = animation.step();
            element.set_text(&format_brl(frame.value));

            if frame.is_final {
                trace!(element = element.id().unwrap_or("?"), value = frame.value, "Counter animation done");
                break;
            }
        }
    });

    CounterHandle { task }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::dom::MemoryElement;

    fn run_to_end(animation: &mut CounterAnimation) -> Vec<CounterFrame> {
        let mut frames = Vec::new();
        loop {
            let frame = animation.step();
            frames.push(frame);
            if frame.is_final {
                return frames;
            }
        }
    }

    #[test]
    fn test_animation_reaches_target() {
        let mut animation = CounterAnimation::new(500.0, DEFAULT_COUNTER_DURATION);
        assert_eq!(animation.increment(), 8.0);

        let frames = run_to_end(&mut animation);

        // 62 images de 8 (496), la 63e dépasse et est ramenée à 500
        assert_eq!(frames.len(), 63);
        assert_eq!(frames[0].value, 8.0);
        assert_eq!(frames[61].value, 496.0);
        assert_eq!(frames.last().unwrap().value, 500.0);
        assert!(frames.windows(2).all(|w| w[0].value <= w[1].value));
    }

    #[test]
    fn test_animation_is_stable_after_final_frame() {
        let mut animation = CounterAnimation::new(100.0, Duration::from_millis(160));
        run_to_end(&mut animation);

        let again = animation.step();
        assert!(again.is_final);
        assert_eq!(again.value, 100.0);
    }

    #[test]
    fn test_negative_target_snaps_in_one_frame() {
        let mut animation = CounterAnimation::new(-500.0, DEFAULT_COUNTER_DURATION);
        let frames = run_to_end(&mut animation);

        assert_eq!(frames, vec![CounterFrame { value: -500.0, is_final: true }]);
    }

    #[test]
    fn test_zero_target_and_zero_duration() {
        let mut zero = CounterAnimation::new(0.0, DEFAULT_COUNTER_DURATION);
        assert_eq!(run_to_end(&mut zero).len(), 1);

        let mut instant = CounterAnimation::new(100.0, Duration::ZERO);
        let frames = run_to_end(&mut instant);
        assert_eq!(frames, vec![CounterFrame { value: 100.0, is_final: true }]);

        let mut nan = CounterAnimation::new(0.0, Duration::ZERO);
        assert_eq!(run_to_end(&mut nan).last().unwrap().value, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_counter_to_500() {
        let element = Arc::new(MemoryElement::new().with_id("receitas-mes"));
        let start = Instant::now();

        let handle = animate_counter(element.clone(), 500.0, DEFAULT_COUNTER_DURATION);
        handle.finished().await.unwrap();

        assert_eq!(element.text(), "R$\u{a0}500,00");
        assert_eq!(element.text_writes(), 63);
        assert!(start.elapsed() >= Duration::from_millis(63 * 16));

        // Plus aucun tick après la valeur finale
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(element.text_writes(), 63);
        assert_eq!(element.text(), "R$\u{a0}500,00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let element = Arc::new(MemoryElement::new());
        let _handle = animate_counter(element.clone(), 500.0, DEFAULT_COUNTER_DURATION);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(element.text_writes(), 0);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(element.text_writes(), 1);
        assert_eq!(element.text(), "R$\u{a0}8,00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_negative_counter_single_tick() {
        let element = Arc::new(MemoryElement::new());

        animate_counter(element.clone(), -500.0, DEFAULT_COUNTER_DURATION)
            .finished()
            .await
            .unwrap();

        assert_eq!(element.text_writes(), 1);
        assert_eq!(element.text(), "-R$\u{a0}500,00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_updates() {
        let element = Arc::new(MemoryElement::new());
        let handle = animate_counter(element.clone(), 1000.0, DEFAULT_COUNTER_DURATION);

        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
        handle.finished().await.unwrap();

        let writes = element.text_writes();
        assert!(writes > 0 && writes < 63);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(element.text_writes(), writes);
        assert_ne!(element.text(), "R$\u{a0}1.000,00");
    }
}
