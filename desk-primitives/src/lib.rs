//! Core shared types for the Promptdesk client.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod record;
mod token;

/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Backend-assigned identifier for prompt records.
pub use ids::PromptId;
/// Prompt record as stored by the backend.
pub use record::Prompt;
/// Opaque credential attached to authenticated requests.
pub use token::BearerToken;
