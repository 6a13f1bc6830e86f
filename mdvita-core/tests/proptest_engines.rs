//! Property-Based Tests for the MDVita engines.
//!
//! Uses `proptest` to check the game and sentiment invariants under random
//! inputs, plus a seeded statistical check that the deck shuffle is uniform.

use std::collections::HashMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use mdvita_core::memory_game::{CardState, FlipOutcome, MemoryGame, PairOutcome};
use mdvita_core::sentiment::{SentimentEngine, SentimentLabel};
use mdvita_core::suggestion::SuggestionEngine;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// 1–12 distinct short symbols.
fn arb_symbols() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,3}", 1..12).prop_map(|s| s.into_iter().collect())
}

fn arb_words() -> impl Strategy<Value = Vec<&'static str>> {
    let vocab = prop::sample::select(vec![
        "happy", "sad", "great", "upset", "the", "day", "was", "love", "anxious",
        "Blessed", "WORRIED", "joyful", "and", "fine", "sadness", "excited",
    ]);
    prop::collection::vec(vocab, 0..30)
}

// ---------------------------------------------------------------------------
// Property: a fresh deal has every symbol twice, all face down, zero counters
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn new_game_deck_shape(symbols in arb_symbols(), seed in any::<u64>()) {
        let game = MemoryGame::new(&symbols, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(game.cards().len(), 2 * symbols.len());
        for s in &symbols {
            prop_assert_eq!(game.cards().iter().filter(|c| &c.symbol == s).count(), 2);
        }
        prop_assert!(game.cards().iter().all(|c| c.state == CardState::FaceDown));
        prop_assert_eq!(game.moves(), 0);
        prop_assert_eq!(game.matches(), 0);
    }
}

// ---------------------------------------------------------------------------
// Property: invariants hold under arbitrary click sequences
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn random_clicks_keep_invariants(
        symbols in arb_symbols(),
        seed in any::<u64>(),
        clicks in prop::collection::vec(0..30usize, 0..200),
    ) {
        let mut game = MemoryGame::new(&symbols, &mut StdRng::seed_from_u64(seed));
        let mut wins = 0;

        for index in clicks {
            let before_moves = game.moves();
            let outcome = game.flip_card(index);
            match outcome {
                FlipOutcome::PairPending { .. } => {
                    prop_assert_eq!(game.moves(), before_moves + 1);
                    if let Some(PairOutcome::Won { moves, .. }) = game.resolve_pair() {
                        prop_assert_eq!(moves, game.moves());
                        wins += 1;
                    }
                }
                _ => {
                    prop_assert_eq!(game.moves(), before_moves);
                }
            }
            prop_assert!(game.flipped().len() <= 2);
            prop_assert!(game.matches() <= game.symbol_count());
            let matched = game.cards().iter().filter(|c| c.state == CardState::Matched).count();
            prop_assert_eq!(matched, 2 * game.matches() as usize);
        }

        prop_assert!(wins <= 1);
        prop_assert_eq!(wins == 1, game.is_won());
    }
}

// ---------------------------------------------------------------------------
// Property: a rejected flip leaves the board untouched
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn ignored_flip_is_a_no_op(symbols in arb_symbols(), seed in any::<u64>(), index in 0..30usize) {
        let mut game = MemoryGame::new(&symbols, &mut StdRng::seed_from_u64(seed));
        game.flip_card(index);
        let snapshot = game.cards().to_vec();
        let moves = game.moves();

        let again = game.flip_card(index);
        prop_assert!(!again.is_accepted());
        prop_assert_eq!(game.cards(), snapshot.as_slice());
        prop_assert_eq!(game.moves(), moves);
    }
}

// ---------------------------------------------------------------------------
// Property: sentiment output is always within its documented ranges
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn sentiment_ranges(words in arb_words()) {
        let text = words.join(" ");
        let engine = SentimentEngine::new();
        let r = engine.analyze(&text);
        prop_assert!((0.1..=0.9).contains(&r.score));
        prop_assert!((60..=100).contains(&r.confidence));
        prop_assert_eq!(r.label, SentimentLabel::from_score(r.score));
        prop_assert_eq!(r, engine.analyze(&text));

        let suggestions = SuggestionEngine::new().suggest(&r);
        prop_assert!((2..=3).contains(&suggestions.len()));
    }
}

proptest! {
    #[test]
    fn arbitrary_text_never_panics(text in ".{0,200}") {
        let r = SentimentEngine::new().analyze(&text);
        prop_assert!((0.0..=1.0).contains(&r.score));
    }
}

// ---------------------------------------------------------------------------
// Shuffle uniformity (seeded, statistical)
// ---------------------------------------------------------------------------

/// A two-symbol deck has six distinguishable arrangements; a fair shuffle
/// hits each about one time in six.
#[test]
fn two_symbol_arrangements_are_uniform() {
    const TRIALS: usize = 60_000;
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut game = MemoryGame::default();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for _ in 0..TRIALS {
        game.new_game(&["A", "B"], &mut rng);
        let layout: String = game.cards().iter().map(|c| c.symbol.as_str()).collect();
        *seen.entry(layout).or_default() += 1;
    }

    assert_eq!(seen.len(), 6, "every arrangement should occur: {seen:?}");
    let expected = TRIALS / 6;
    for (layout, count) in &seen {
        let deviation = count.abs_diff(expected);
        assert!(
            deviation < expected / 20,
            "{layout} seen {count} times, expected about {expected}"
        );
    }
}

/// Every symbol should be equally likely to land in the first cell.
#[test]
fn first_cell_is_unbiased() {
    const TRIALS: usize = 40_000;
    let symbols = ["w", "x", "y", "z"];
    let mut rng = StdRng::seed_from_u64(99);
    let mut game = MemoryGame::default();
    let mut first: HashMap<String, usize> = HashMap::new();

    for _ in 0..TRIALS {
        game.new_game(&symbols, &mut rng);
        let symbol = game.cards()[0].symbol.clone();
        *first.entry(symbol).or_default() += 1;
    }

    let expected = TRIALS / symbols.len();
    for s in symbols {
        let count = first.get(s).copied().unwrap_or(0);
        assert!(count.abs_diff(expected) < expected / 20, "{s}: {count} vs {expected}");
    }
}
