//! # mdvita-app: Application Layer for MDVita
//!
//! Glues the synchronous engines in `mdvita-core` to a running shell:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  UI shell                    │
//! │     clicks / text  │        ▲ events, state  │
//! │                    ▼        │                │
//! │  ┌────────────────────────────────────────┐  │
//! │  │              mdvita-app                │  │
//! │  │  WellnessApp   MemoryGameSession       │  │
//! │  │                BreathingSession        │  │
//! │  └───────┬──────────────────────┬─────────┘  │
//! │          ▼                      ▼            │
//! │   ┌─────────────┐      ┌─────────────────┐   │
//! │   │ mdvita-core │      │  mdvita-remote  │   │
//! │   └─────────────┘      └─────────────────┘   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `controller`: `WellnessApp`, input validation and stats bookkeeping
//! - `memory_session`: delayed pair resolution for Memory Match
//! - `breathing_session`: phase timer for the breathing exercise
//! - `events`: what the sessions publish to the renderer
//! - `telemetry`: `tracing` subscriber setup

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod breathing_session;
pub mod controller;
pub mod events;
pub mod memory_session;
pub mod telemetry;

pub use breathing_session::BreathingSession;
pub use controller::{JournalAnalysis, WellnessApp, open_store};
pub use events::{BreathingDisplay, GameEvent};
pub use memory_session::MemoryGameSession;
