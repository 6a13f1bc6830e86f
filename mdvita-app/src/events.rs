//! Notifications published by the timed sessions.
//!
//! A renderer subscribes to these instead of polling engine state.

use mdvita_core::breathing::{BreathCue, BreathingCycle, BreathingState};
use mdvita_core::memory_game::MemoryCard;
use serde::Serialize;

/// Something visible happened on the memory board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A fresh, face-down board was dealt.
    BoardDealt {
        /// Cards in grid order.
        cards: Vec<MemoryCard>,
    },
    /// A card was turned face up.
    CardRevealed {
        /// Grid index.
        index: usize,
        /// Its symbol.
        symbol: String,
    },
    /// Two revealed cards matched and stay up.
    PairMatched {
        /// First card of the pair.
        first: usize,
        /// Second card of the pair.
        second: usize,
    },
    /// Two revealed cards differed and were turned back down.
    PairMismatched {
        /// First card of the pair.
        first: usize,
        /// Second card of the pair.
        second: usize,
    },
    /// The board is cleared. Sent once per game, after the final
    /// `PairMatched`.
    GameWon {
        /// Moves taken.
        moves: u32,
    },
}

/// What the breathing screen should show right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreathingDisplay {
    /// Sequencer state.
    pub state: BreathingState,
    /// Instruction line ("Get Ready", "Inhale", ...).
    pub instruction: String,
    /// Circle animation to play, if a phase is running.
    pub cue: Option<BreathCue>,
    /// Length of the current phase in milliseconds.
    pub duration_ms: Option<u64>,
}

impl BreathingDisplay {
    /// Snapshot the sequencer.
    #[must_use]
    pub fn of(cycle: &BreathingCycle) -> Self {
        let phase = cycle.current_phase();
        Self {
            state: cycle.state(),
            instruction: cycle.instruction().to_string(),
            cue: phase.map(|p| p.cue),
            duration_ms: phase.map(|p| p.duration_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_tracks_the_cycle() {
        let mut cycle = BreathingCycle::default();
        let idle = BreathingDisplay::of(&cycle);
        assert_eq!(idle.instruction, "Get Ready");
        assert_eq!(idle.cue, None);

        cycle.start();
        let first = BreathingDisplay::of(&cycle);
        assert_eq!(first.instruction, "Inhale");
        assert_eq!(first.cue, Some(BreathCue::Inhale));
        assert_eq!(first.duration_ms, Some(4_000));
    }

    #[test]
    fn events_serialize_with_a_type_tag() {
        let json = serde_json::to_value(GameEvent::GameWon { moves: 9 }).expect("serialize");
        assert_eq!(json, serde_json::json!({"type": "game_won", "moves": 9}));
    }
}
