//! Guided breathing: a fixed phase sequence repeated for a number of cycles.
//!
//! This module is the clock-free state machine. The timer that calls
//! [`BreathingCycle::advance`] after each phase's duration lives in the
//! application layer, so the machine can be stepped directly in tests.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Visual cue the breathing circle shows during a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathCue {
    /// Circle expands.
    Inhale,
    /// Circle holds at full size.
    Hold,
    /// Circle contracts.
    Exhale,
}

/// One timed step of the exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathPhase {
    /// Instruction text.
    pub label: String,
    /// Circle animation.
    pub cue: BreathCue,
    /// How long the phase lasts, in milliseconds.
    pub duration_ms: u64,
}

impl BreathPhase {
    /// Build a phase.
    #[must_use]
    pub fn new(label: impl Into<String>, cue: BreathCue, duration_ms: u64) -> Self {
        Self {
            label: label.into(),
            cue,
            duration_ms,
        }
    }

    /// Phase length.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Number of cycles in the stock exercise.
pub const DEFAULT_CYCLES: u32 = 5;

/// The 4-7-8 pattern with a one-second rest. The rest keeps the circle
/// contracted, so it reuses the exhale cue.
#[must_use]
pub fn default_phases() -> Vec<BreathPhase> {
    vec![
        BreathPhase::new("Inhale", BreathCue::Inhale, 4_000),
        BreathPhase::new("Hold", BreathCue::Hold, 7_000),
        BreathPhase::new("Exhale", BreathCue::Exhale, 8_000),
        BreathPhase::new("Hold", BreathCue::Exhale, 1_000),
    ]
}

/// Where the exercise is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreathingState {
    /// Not started, or stopped.
    Idle,
    /// In progress.
    Running {
        /// Zero-based cycle number.
        cycle: u32,
        /// Index into the phase list.
        phase: usize,
    },
    /// All cycles finished. Stays here until restarted.
    Complete,
}

/// Instruction shown before the exercise starts.
pub const READY_TEXT: &str = "Get Ready";
/// Instruction shown once all cycles are done.
pub const COMPLETE_TEXT: &str = "Exercise Complete!";

/// Phase sequencer.
#[derive(Debug, Clone)]
pub struct BreathingCycle {
    phases: Vec<BreathPhase>,
    cycles: u32,
    state: BreathingState,
}

impl Default for BreathingCycle {
    fn default() -> Self {
        Self::new(default_phases(), DEFAULT_CYCLES)
    }
}

impl BreathingCycle {
    /// A sequencer over `phases`, repeated `cycles` times.
    #[must_use]
    pub fn new(phases: Vec<BreathPhase>, cycles: u32) -> Self {
        Self {
            phases,
            cycles,
            state: BreathingState::Idle,
        }
    }

    /// Begin (or restart) at the first phase of the first cycle.
    pub fn start(&mut self) -> BreathingState {
        self.state = if self.phases.is_empty() || self.cycles == 0 {
            BreathingState::Complete
        } else {
            BreathingState::Running { cycle: 0, phase: 0 }
        };
        debug!(state = ?self.state, "Breathing exercise started");
        self.state
    }

    /// Move to the next phase. Does nothing unless running.
    pub fn advance(&mut self) -> BreathingState {
        if let BreathingState::Running { cycle, phase } = self.state {
            let next_phase = (phase + 1) % self.phases.len();
            let next_cycle = if next_phase == 0 { cycle + 1 } else { cycle };
            self.state = if next_cycle >= self.cycles {
                BreathingState::Complete
            } else {
                BreathingState::Running {
                    cycle: next_cycle,
                    phase: next_phase,
                }
            };
            debug!(state = ?self.state, "Breathing phase advanced");
        }
        self.state
    }

    /// Abandon the exercise.
    pub fn stop(&mut self) {
        self.state = BreathingState::Idle;
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> BreathingState {
        self.state
    }

    /// Phase being performed, if running.
    #[must_use]
    pub fn current_phase(&self) -> Option<&BreathPhase> {
        match self.state {
            BreathingState::Running { phase, .. } => self.phases.get(phase),
            _ => None,
        }
    }

    /// Text for the instruction line.
    #[must_use]
    pub fn instruction(&self) -> &str {
        match self.state {
            BreathingState::Idle => READY_TEXT,
            BreathingState::Complete => COMPLETE_TEXT,
            BreathingState::Running { .. } => {
                self.current_phase().map_or(READY_TEXT, |p| p.label.as_str())
            }
        }
    }

    /// Phases per cycle.
    #[must_use]
    pub fn phases(&self) -> &[BreathPhase] {
        &self.phases
    }

    /// Configured number of cycles.
    #[must_use]
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Length of a complete, uninterrupted exercise.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        let per_cycle: u64 = self.phases.iter().map(|p| p.duration_ms).sum();
        Duration::from_millis(per_cycle * u64::from(self.cycles))
    }
}
