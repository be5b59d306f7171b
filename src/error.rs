//! # Error Types
//!
//! This module defines error types used throughout the tincture library.
//!
//! Malformed style or data input is never an error: it is recovered locally
//! with defaults. What remains here are failures a user may need to see.

use thiserror::Error;

/// Generic message shown when a style save fails without a server message.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save style";

/// Main error type for tincture operations
#[derive(Debug, Error)]
pub enum TinctureError {
    /// Preview or persistence request could not be delivered (network, HTTP status)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request was superseded by a newer one before it completed
    #[error("Request aborted")]
    Aborted,

    /// Style persistence rejected a write
    #[error("{}", .message.as_deref().unwrap_or(SAVE_FAILED_MESSAGE))]
    Persistence { message: Option<String> },

    /// Caller supplied a request that cannot be served
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TinctureError {
    /// Message to show the user, or `None` when the failure should stay silent.
    ///
    /// Cancellation is expected during rapid style edits and never surfaces.
    pub fn user_message(&self) -> Option<String> {
        match self {
            TinctureError::Aborted => None,
            other => Some(other.to_string()),
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, TinctureError::Aborted)
    }
}

impl From<reqwest::Error> for TinctureError {
    fn from(e: reqwest::Error) -> Self {
        TinctureError::Transport(e.to_string())
    }
}
