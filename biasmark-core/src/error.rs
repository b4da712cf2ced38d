//! Error types for biasmark.

use thiserror::Error;

/// Result type for biasmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for biasmark operations.
///
/// Bad offsets are never reported here: an annotation whose range cannot be
/// validated or recovered is listed in the segmentation's skipped indices.
/// These variants cover contract violations at the input boundary.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An annotation record has the wrong shape or field types.
    #[error("Malformed annotation at index {index}: {reason}")]
    MalformedAnnotation {
        /// Position of the record in the input list.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Parse error (model responses, annotation documents).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a malformed annotation error.
    #[must_use]
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedAnnotation {
            index,
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a config error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
