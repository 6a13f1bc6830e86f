//! Memory Match: pair-matching game rules.
//!
//! Each card moves through a small state machine:
//!
//! ```text
//! FaceDown ──flip──▶ FaceUp ──match──▶ Matched
//!     ▲                │
//!     └───mismatch─────┘   (after the visible delay)
//! ```
//!
//! The engine is synchronous. When a flip completes a pair it reports
//! [`FlipOutcome::PairPending`]; the caller waits out the visible delay and
//! then calls [`MemoryGame::resolve_pair`]. Until that happens further flips
//! are rejected, which is what stops a third card from being turned over.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Symbols used by the stock game.
pub const DEFAULT_SYMBOLS: [&str; 8] = ["🌟", "🌙", "☀️", "🌈", "🌺", "🌸", "🍀", "🦋"];

/// Render state of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Hidden.
    FaceDown,
    /// Revealed, waiting for its partner.
    FaceUp,
    /// Permanently revealed.
    Matched,
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCard {
    /// Symbol on the face.
    pub symbol: String,
    /// Grid index.
    pub position: usize,
    /// Current state.
    pub state: CardState,
}

/// Why a flip was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipRejection {
    /// No card at that index.
    OutOfRange,
    /// The card is already showing.
    AlreadyFaceUp,
    /// The card was matched earlier.
    AlreadyMatched,
    /// Two cards are face up and have not been resolved yet.
    AwaitingResolution,
}

/// Result of [`MemoryGame::flip_card`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Nothing changed.
    Ignored(FlipRejection),
    /// First card of a pair is now face up.
    Revealed {
        /// Index that was flipped.
        index: usize,
    },
    /// Second card is face up and a move was counted; call
    /// [`MemoryGame::resolve_pair`] after the visible delay.
    PairPending {
        /// First card of the pair.
        first: usize,
        /// Second card of the pair.
        second: usize,
    },
}

impl FlipOutcome {
    /// Whether the flip changed the board.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// Result of [`MemoryGame::resolve_pair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// Symbols matched; both cards stay revealed.
    Matched {
        /// First card of the pair.
        first: usize,
        /// Second card of the pair.
        second: usize,
    },
    /// Symbols differ; both cards were turned back down.
    Mismatched {
        /// First card of the pair.
        first: usize,
        /// Second card of the pair.
        second: usize,
    },
    /// The final pair matched. Reported once per game.
    Won {
        /// First card of the pair.
        first: usize,
        /// Second card of the pair.
        second: usize,
        /// Moves taken to clear the board.
        moves: u32,
    },
}

/// Full game state: the deck plus the turn bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryGame {
    cards: Vec<MemoryCard>,
    flipped: Vec<usize>,
    moves: u32,
    matches: u32,
    symbol_count: u32,
}

impl MemoryGame {
    /// Start a game over `symbols`, shuffled with `rng`.
    #[must_use]
    pub fn new<S: AsRef<str>, R: Rng + ?Sized>(symbols: &[S], rng: &mut R) -> Self {
        let mut game = Self::default();
        game.new_game(symbols, rng);
        game
    }

    /// Throw away the current board and deal a fresh one.
    ///
    /// Every symbol is placed twice; repeated symbols in the input are
    /// collapsed so the pairing stays unambiguous. The deck is shuffled
    /// with Fisher–Yates, so every arrangement is equally likely.
    pub fn new_game<S: AsRef<str>, R: Rng + ?Sized>(&mut self, symbols: &[S], rng: &mut R) {
        let mut unique: Vec<&str> = Vec::with_capacity(symbols.len());
        for s in symbols {
            let s = s.as_ref();
            if !unique.contains(&s) {
                unique.push(s);
            }
        }

        let mut deck: Vec<&str> = unique.iter().chain(unique.iter()).copied().collect();
        deck.shuffle(rng);

        self.cards = deck
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| MemoryCard {
                symbol: symbol.to_string(),
                position,
                state: CardState::FaceDown,
            })
            .collect();
        self.flipped.clear();
        self.moves = 0;
        self.matches = 0;
        self.symbol_count = u32::try_from(unique.len()).unwrap_or(u32::MAX);

        debug!(cards = self.cards.len(), symbols = self.symbol_count, "Dealt new memory game");
    }

    /// Turn a card face up.
    pub fn flip_card(&mut self, index: usize) -> FlipOutcome {
        if self.flipped.len() >= 2 {
            return FlipOutcome::Ignored(FlipRejection::AwaitingResolution);
        }
        let Some(card) = self.cards.get_mut(index) else {
            return FlipOutcome::Ignored(FlipRejection::OutOfRange);
        };
        match card.state {
            CardState::FaceUp => return FlipOutcome::Ignored(FlipRejection::AlreadyFaceUp),
            CardState::Matched => return FlipOutcome::Ignored(FlipRejection::AlreadyMatched),
            CardState::FaceDown => {}
        }

        card.state = CardState::FaceUp;
        self.flipped.push(index);

        if let [first, second] = self.flipped[..] {
            self.moves += 1;
            debug!(first, second, moves = self.moves, "Pair revealed");
            FlipOutcome::PairPending { first, second }
        } else {
            FlipOutcome::Revealed { index }
        }
    }

    /// Settle the two face-up cards. Returns `None` if no pair is pending.
    ///
    /// A pending list that cannot be a pair on this board (as can come from
    /// a hand-edited snapshot) is discarded and its cards turned face down.
    pub fn resolve_pair(&mut self) -> Option<PairOutcome> {
        let [first, second] = self.flipped[..] else {
            if self.flipped.len() > 2 {
                self.discard_pending();
            }
            return None;
        };
        if first == second || first.max(second) >= self.cards.len() {
            self.discard_pending();
            return None;
        }
        self.flipped.clear();

        let same = self.cards[first].symbol == self.cards[second].symbol;
        let next = if same { CardState::Matched } else { CardState::FaceDown };
        self.cards[first].state = next;
        self.cards[second].state = next;

        if !same {
            debug!(first, second, "Pair mismatched");
            return Some(PairOutcome::Mismatched { first, second });
        }

        self.matches += 1;
        debug!(first, second, matches = self.matches, "Pair matched");
        if self.is_won() {
            Some(PairOutcome::Won { first, second, moves: self.moves })
        } else {
            Some(PairOutcome::Matched { first, second })
        }
    }

    fn discard_pending(&mut self) {
        warn!(flipped = ?self.flipped, "Discarding pending cards that are not a pair on this board");
        for index in std::mem::take(&mut self.flipped) {
            if let Some(card) = self.cards.get_mut(index).filter(|c| c.state == CardState::FaceUp) {
                card.state = CardState::FaceDown;
            }
        }
    }

    /// Moves taken (one per revealed pair).
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Pairs matched so far.
    #[must_use]
    pub fn matches(&self) -> u32 {
        self.matches
    }

    /// Number of distinct symbols in play.
    #[must_use]
    pub fn symbol_count(&self) -> u32 {
        self.symbol_count
    }

    /// The grid in position order.
    #[must_use]
    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    /// One card, if the index is valid.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&MemoryCard> {
        self.cards.get(index)
    }

    /// Indices currently face up and unresolved.
    #[must_use]
    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    /// Whether a pair is waiting for [`resolve_pair`](Self::resolve_pair).
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.flipped.len() == 2
    }

    /// All pairs found. An empty board is never won.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.symbol_count > 0 && self.matches == self.symbol_count
    }
}
