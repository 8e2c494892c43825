//! Shared error definitions for Promptdesk primitives.

use std::num::ParseIntError;

use thiserror::Error;

/// Result alias used throughout the primitive types.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or parsing primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The provided prompt identifier could not be parsed.
    #[error("invalid prompt id: {source}")]
    InvalidPromptId {
        /// Source parsing error.
        #[from]
        source: ParseIntError,
    },

    /// A bearer token was constructed from an empty string.
    #[error("bearer token must not be empty")]
    EmptyToken,

    /// A prompt record failed validation.
    #[error("invalid prompt record: {reason}")]
    InvalidRecord {
        /// Human-readable reason for rejection.
        reason: String,
    },
}
