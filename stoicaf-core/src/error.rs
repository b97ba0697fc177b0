//! Error types for stoicaf-core

use thiserror::Error;

/// Main error type for the stoicaf-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Entry not found
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// Entry belongs to a different user
    #[error("entry {entry_id} does not belong to user {user_id}")]
    NotOwner { entry_id: String, user_id: String },

    /// Mood score outside the recordable scale
    #[error("invalid mood score: {0} (expected 1-5)")]
    InvalidMood(i64),

    /// Track days are 1-indexed
    #[error("invalid track day: {0} (days start at 1)")]
    InvalidTrackDay(i64),

    /// Malformed calendar date
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Result type alias for stoicaf-core
pub type Result<T> = std::result::Result<T, Error>;
