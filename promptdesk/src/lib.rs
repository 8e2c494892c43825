//! Promptdesk client SDK facade.
//!
//! Depend on this crate via `cargo add promptdesk`. It bundles the workspace
//! crates behind feature flags so downstream users can enable or disable
//! components as needed.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use desk_primitives as primitives;

/// Backend HTTP client (enabled by `client` feature).
#[cfg(feature = "client")]
pub use desk_client as client;

/// Session lifecycle and token persistence (enabled by `session` feature).
#[cfg(feature = "session")]
pub use desk_session as session;

/// View state controller (enabled by `console` feature).
#[cfg(feature = "console")]
pub use desk_console as console;
