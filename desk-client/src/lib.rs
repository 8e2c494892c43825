//! HTTP client for the Promptdesk backend.
//!
//! [`auth`] covers the credential endpoints and [`prompts`] the authenticated
//! CRUD endpoints. Both share the trait-based interface and error taxonomy
//! defined in [`traits`], so callers can substitute in-memory fakes in tests.

#![warn(missing_docs, clippy::pedantic)]

pub mod auth;
pub mod config;
pub mod prompts;
pub mod traits;

mod http_client;
