//! Timed driver for the breathing exercise.
//!
//! A spawned task sleeps through each phase and advances the shared
//! [`BreathingCycle`]. Every change is published on a `watch` channel, which
//! always holds the latest [`BreathingDisplay`].
//!
//! `stop` bumps the generation under the lock and aborts the task; the task
//! re-checks the generation before advancing, so nothing moves after a stop
//! even if the sleep had already elapsed.

use std::sync::Arc;

use mdvita_core::breathing::{BreathingCycle, BreathingState};
use mdvita_core::config::BreathingConfig;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::events::BreathingDisplay;

struct Sequencer {
    cycle: BreathingCycle,
    generation: u64,
}

/// A breathing exercise plus its phase timer.
pub struct BreathingSession {
    sequencer: Arc<Mutex<Sequencer>>,
    display: Arc<watch::Sender<BreathingDisplay>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl BreathingSession {
    /// An idle session over the configured pattern.
    #[must_use]
    pub fn new(config: &BreathingConfig) -> Self {
        let cycle = BreathingCycle::new(config.phases.clone(), config.cycles);
        let (display, _) = watch::channel(BreathingDisplay::of(&cycle));
        Self {
            sequencer: Arc::new(Mutex::new(Sequencer { cycle, generation: 0 })),
            display: Arc::new(display),
            task: Mutex::new(None),
        }
    }

    /// Follow display changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BreathingDisplay> {
        self.display.subscribe()
    }

    /// Current sequencer state.
    #[must_use]
    pub fn state(&self) -> BreathingState {
        self.sequencer.lock().cycle.state()
    }

    /// Begin from the first phase, restarting if already running. Must be
    /// called from within a Tokio runtime.
    pub fn start(&self) {
        let generation = {
            let mut seq = self.sequencer.lock();
            seq.generation += 1;
            seq.cycle.start();
            self.display.send_replace(BreathingDisplay::of(&seq.cycle));
            info!(
                generation = seq.generation,
                cycles = seq.cycle.cycles(),
                total_secs = seq.cycle.total_duration().as_secs(),
                "Breathing exercise started"
            );
            seq.generation
        };

        let task = tokio::spawn(run_phases(
            Arc::clone(&self.sequencer),
            Arc::clone(&self.display),
            generation,
        ));
        if let Some(previous) = self.task.lock().replace(task) {
            previous.abort();
        }
    }

    /// Abandon the exercise and return to the ready screen. Pending phase
    /// changes are cancelled.
    pub fn stop(&self) {
        {
            let mut seq = self.sequencer.lock();
            seq.generation += 1;
            seq.cycle.stop();
            self.display.send_replace(BreathingDisplay::of(&seq.cycle));
            info!(generation = seq.generation, "Breathing exercise stopped");
        }
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
    }
}

impl Drop for BreathingSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

async fn run_phases(
    sequencer: Arc<Mutex<Sequencer>>,
    display: Arc<watch::Sender<BreathingDisplay>>,
    generation: u64,
) {
    loop {
        let wait = {
            let seq = sequencer.lock();
            if seq.generation != generation {
                return;
            }
            match seq.cycle.current_phase() {
                Some(phase) => phase.duration(),
                None => return,
            }
        };

        tokio::time::sleep(wait).await;

        let mut seq = sequencer.lock();
        if seq.generation != generation {
            debug!(generation, "Dropping phase advance for a stopped exercise");
            return;
        }
        let state = seq.cycle.advance();
        display.send_replace(BreathingDisplay::of(&seq.cycle));
        if state == BreathingState::Complete {
            info!(generation, "Breathing exercise complete");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdvita_core::breathing::{BreathCue, BreathPhase};

    #[tokio::test(start_paused = true)]
    async fn empty_pattern_completes_immediately() {
        let session = BreathingSession::new(&BreathingConfig {
            cycles: 3,
            phases: Vec::new(),
        });
        session.start();
        assert_eq!(session.state(), BreathingState::Complete);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_resets_to_the_first_phase() {
        let session = BreathingSession::new(&BreathingConfig {
            cycles: 2,
            phases: vec![
                BreathPhase::new("In", BreathCue::Inhale, 100),
                BreathPhase::new("Out", BreathCue::Exhale, 100),
            ],
        });
        session.start();
        tokio::time::sleep(std::time::Duration::from_millis(150)).await;
        assert_eq!(session.state(), BreathingState::Running { cycle: 0, phase: 1 });

        session.start();
        assert_eq!(session.state(), BreathingState::Running { cycle: 0, phase: 0 });
    }
}
