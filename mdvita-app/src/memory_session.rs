//! Timed driver for Memory Match.
//!
//! The engine itself is synchronous: a second flip leaves the pair face up
//! and waits for `resolve_pair`. This session schedules that call on a tokio
//! task after the configured delay, so the board stays responsive (and
//! rejects third flips) while the pair is on show.
//!
//! Dealing a new board bumps a generation counter and aborts the pending
//! task. The task re-checks the generation under the lock before touching
//! the game, so a resolution scheduled against an old board is dropped.
//!
//! The `pending` handle is only touched while the board lock is held, so
//! the board lock is always taken first.

use std::sync::Arc;
use std::time::Duration;

use mdvita_core::config::MemoryGameConfig;
use mdvita_core::memory_game::{FlipOutcome, MemoryGame, PairOutcome};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::events::GameEvent;

struct Board {
    game: MemoryGame,
    generation: u64,
}

/// A memory game plus its resolution timer.
pub struct MemoryGameSession {
    board: Arc<Mutex<Board>>,
    symbols: Vec<String>,
    delay: Duration,
    rng: Mutex<StdRng>,
    events: mpsc::UnboundedSender<GameEvent>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl MemoryGameSession {
    /// Deal a first board. Events for it (starting with `BoardDealt`) are
    /// delivered on the returned receiver.
    #[must_use]
    pub fn new(config: &MemoryGameConfig, rng: StdRng) -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let session = Self {
            board: Arc::new(Mutex::new(Board {
                game: MemoryGame::default(),
                generation: 0,
            })),
            symbols: config.symbols.clone(),
            delay: Duration::from_millis(config.resolve_delay_ms),
            rng: Mutex::new(rng),
            events,
            pending: Mutex::new(None),
        };
        session.new_game();
        (session, rx)
    }

    /// Same as [`new`](Self::new) with an entropy-seeded RNG.
    #[must_use]
    pub fn from_entropy(config: &MemoryGameConfig) -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        Self::new(config, StdRng::from_entropy())
    }

    /// Reshuffle and reset. Any pending pair resolution is discarded.
    pub fn new_game(&self) {
        let mut board = self.board.lock();
        board.generation += 1;
        if let Some(task) = self.pending.lock().take() {
            task.abort();
        }
        let mut rng = self.rng.lock();
        board.game.new_game(&self.symbols, &mut *rng);
        info!(generation = board.generation, cards = board.game.cards().len(), "Memory game dealt");
        self.publish(GameEvent::BoardDealt {
            cards: board.game.cards().to_vec(),
        });
    }

    /// Click a card.
    ///
    /// When this reveals the second card of a pair, resolution is scheduled
    /// after the configured delay; the call itself returns at once. Must be
    /// called from within a Tokio runtime.
    pub fn flip_card(&self, index: usize) -> FlipOutcome {
        let mut board = self.board.lock();
        let outcome = board.game.flip_card(index);

        match outcome {
            FlipOutcome::Ignored(reason) => {
                debug!(index, ?reason, "Flip ignored");
            }
            FlipOutcome::Revealed { index } => {
                self.publish_reveal(&board.game, index);
            }
            FlipOutcome::PairPending { second, .. } => {
                self.publish_reveal(&board.game, second);
                self.schedule_resolution(board.generation);
            }
        }
        outcome
    }

    /// Called with the board lock held, so a concurrent `new_game` cannot
    /// slip in between spawning the task and recording it.
    fn schedule_resolution(&self, generation: u64) {
        let board = Arc::clone(&self.board);
        let events = self.events.clone();
        let delay = self.delay;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let outcome = {
                let mut board = board.lock();
                if board.generation != generation {
                    debug!(generation, "Discarding resolution for a replaced board");
                    return;
                }
                board.game.resolve_pair()
            };

            for event in resolution_events(outcome) {
                let _ = events.send(event);
            }
        });

        if let Some(previous) = self.pending.lock().replace(task) {
            // Only reachable once the earlier pair has already resolved.
            previous.abort();
        }
    }

    fn publish_reveal(&self, game: &MemoryGame, index: usize) {
        if let Some(card) = game.card(index) {
            self.publish(GameEvent::CardRevealed {
                index,
                symbol: card.symbol.clone(),
            });
        }
    }

    fn publish(&self, event: GameEvent) {
        // A closed receiver just means nobody is rendering.
        let _ = self.events.send(event);
    }

    /// Copy of the current game state.
    #[must_use]
    pub fn snapshot(&self) -> MemoryGame {
        self.board.lock().game.clone()
    }

    /// Moves taken on the current board.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.board.lock().game.moves()
    }

    /// Whether the current board is cleared.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.board.lock().game.is_won()
    }

    /// Whether a revealed pair is waiting out the delay.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.board.lock().game.is_resolving()
    }
}

impl Drop for MemoryGameSession {
    fn drop(&mut self) {
        if let Some(task) = self.pending.get_mut().take() {
            task.abort();
        }
    }
}

fn resolution_events(outcome: Option<PairOutcome>) -> Vec<GameEvent> {
    match outcome {
        None => Vec::new(),
        Some(PairOutcome::Mismatched { first, second }) => {
            vec![GameEvent::PairMismatched { first, second }]
        }
        Some(PairOutcome::Matched { first, second }) => {
            vec![GameEvent::PairMatched { first, second }]
        }
        Some(PairOutcome::Won { first, second, moves }) => {
            info!(moves, "Memory game won");
            vec![GameEvent::PairMatched { first, second }, GameEvent::GameWon { moves }]
        }
    }
}
