//! Session lifecycle for the Promptdesk client.
//!
//! Replaces the original application's global token-in-local-storage with an
//! explicit session object: the token lives inside [`SessionManager`], is
//! persisted through a [`TokenStore`], and is handed to callers only while
//! the session is active.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod manager;
mod store;

pub use error::{SessionError, SessionResult};
pub use manager::{SessionManager, SessionState};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
