//! # MDVita Core Library
//!
//! Engines behind the MDVita wellness companion. Everything here is plain,
//! synchronous data-in/data-out logic except the document stores:
//!
//! - **Sentiment**: keyword heuristic scoring journal text
//! - **Suggestions**: canned follow-ups per sentiment bracket
//! - **Memory Match**: shuffled pair-matching game rules
//! - **Breathing**: timed phase sequencer (the timer lives in `mdvita-app`)
//! - **Catalog / Insights**: static content and dashboard read-outs
//! - **Store**: async document persistence (in-memory, SQLite)
//!
//! The engines never fail: invalid input is ignored or clamped. Only the
//! stores and the application-facing validations return [`VitaError`].

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod breathing;
pub mod catalog;
pub mod config;
pub mod error;
pub mod insights;
pub mod memory_game;
pub mod sentiment;
pub mod store;
pub mod suggestion;
pub mod types;

pub use breathing::{BreathingCycle, BreathingState};
pub use config::VitaConfig;
pub use error::VitaError;
pub use memory_game::{CardState, FlipOutcome, MemoryGame, PairOutcome};
pub use sentiment::{SentimentEngine, SentimentLabel, SentimentResult};
pub use store::DocumentStore;
pub use suggestion::SuggestionEngine;
pub use types::*;
