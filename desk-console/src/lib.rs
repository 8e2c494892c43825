//! View state controller for the Promptdesk client.
//!
//! [`Console`] owns the session, the local mirror of the server's prompt
//! list, and the transient form [`Draft`]. User actions translate into calls
//! on the session manager and prompt store; responses reconcile the mirror.

#![warn(missing_docs, clippy::pedantic)]

mod console;
mod draft;
mod error;

pub use console::Console;
pub use draft::Draft;
pub use error::{ConsoleError, ConsoleResult};
