//! Error types for the MDVita core library.
//!
//! The engines themselves never fail; these errors belong to the
//! application-facing operations (validation refusals) and the document
//! stores.

use thiserror::Error;

/// Top-level error type for all MDVita operations.
#[derive(Error, Debug)]
pub enum VitaError {
    /// A mood value outside the catalog was logged.
    #[error("Please select a mood first. (unknown mood value: {0})")]
    InvalidMood(u8),

    /// Journal analysis was requested for blank text.
    #[error("Please write something first.")]
    EmptyEntry,

    /// A blank journal entry was submitted for saving.
    #[error("Nothing to save.")]
    NothingToSave,

    /// A document with the given id was not found.
    #[error("Document not found: {collection}/{id}")]
    DocumentNotFound {
        /// Collection that was searched.
        collection: String,
        /// Id that was requested.
        id: String,
    },

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// SQLite persistence error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Remote store failure.
    #[error("Remote store error: {0}")]
    Remote(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for VitaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, VitaError>;
