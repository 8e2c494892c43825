//! Error types surfaced to the console front end.

use thiserror::Error;

use desk_client::traits::ClientError;
use desk_primitives::PromptId;
use desk_session::SessionError;

/// Result alias for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Errors surfaced by console operations.
///
/// The front end renders these as one-line transient notices; list and draft
/// state are left unchanged by every failure.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Session operation failed or no session is active.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A prompt request against the backend failed.
    #[error(transparent)]
    Request(#[from] ClientError),

    /// Submit was invoked with nothing drafted.
    #[error("nothing to submit: the draft is empty")]
    EmptyDraft,

    /// An edit referenced an id that is not in the local list.
    #[error("no prompt with id {id} in the current list")]
    UnknownPrompt {
        /// The id that failed to resolve.
        id: PromptId,
    },
}
