//! Error types for the session subsystem.

use thiserror::Error;

use desk_client::traits::ClientError;

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors emitted by session components.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation that requires an active session ran without one.
    #[error("no active session")]
    NotAuthenticated,

    /// Underlying I/O failure while reading or writing the token store.
    #[error("i/o error: {source}")]
    Io {
        /// Source [`std::io::Error`].
        #[from]
        source: std::io::Error,
    },

    /// The token store held a value that could not be used.
    #[error("token store error: {reason}")]
    Store {
        /// Human-readable reason describing the failure.
        reason: String,
    },

    /// The auth backend reported a failure.
    #[error(transparent)]
    Backend(#[from] ClientError),
}

impl SessionError {
    /// Helper to construct store errors from string-like values.
    #[must_use]
    pub fn store(reason: impl Into<String>) -> Self {
        Self::Store {
            reason: reason.into(),
        }
    }
}
