//! Shared client traits, request/response types, and the error taxonomy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use desk_primitives::{BearerToken, Prompt, PromptId};

/// Result alias used by backend clients.
pub type ClientResult<T> = Result<T, ClientError>;

/// Error type shared by the auth and prompt clients.
///
/// The original application collapsed every failure into a single "request
/// failed" notice; this taxonomy keeps that user-visible behaviour possible
/// while letting callers and tests distinguish the cases.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client is misconfigured (bad base URL, missing settings).
    #[error("client not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// The request could not be built or encoded.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// Reason describing why the request could not be issued.
        reason: String,
    },

    /// Transport-level failures (connect, timeout, protocol).
    #[error("transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The backend rejected the credentials or token (401/403).
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// Backend-provided detail, when any.
        reason: String,
    },

    /// The backend rejected the request payload (other 4xx, e.g. duplicate
    /// username on registration).
    #[error("request rejected: {reason}")]
    Rejected {
        /// Backend-provided detail, when any.
        reason: String,
    },

    /// The backend reported an internal failure (5xx).
    #[error("server error ({status}): {reason}")]
    Server {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Backend-provided detail, when any.
        reason: String,
    },

    /// A successful status carried a body the client could not decode.
    #[error("response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl ClientError {
    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for invalid requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for authorization failures.
    #[must_use]
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for payload rejections.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for undecodable responses.
    #[must_use]
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }
}

/// Account details returned by the auth endpoints.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Backend-assigned account id.
    pub id: u64,
    /// Account username.
    pub username: String,
    /// Account email address.
    #[serde(default)]
    pub email: String,
}

/// Successful login result: a bearer token plus the account it belongs to.
#[derive(Clone, Debug)]
pub struct AuthGrant {
    jwt: BearerToken,
    user: UserProfile,
}

impl AuthGrant {
    /// Creates a grant from its parts.
    #[must_use]
    pub fn new(jwt: BearerToken, user: UserProfile) -> Self {
        Self { jwt, user }
    }

    /// Returns the granted bearer token.
    #[must_use]
    pub fn jwt(&self) -> &BearerToken {
        &self.jwt
    }

    /// Returns the authenticated account profile.
    #[must_use]
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Consumes the grant, returning `(jwt, user)`.
    #[must_use]
    pub fn into_parts(self) -> (BearerToken, UserProfile) {
        (self.jwt, self.user)
    }
}

/// Credential operations against the backend.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, identifier: &str, password: &str) -> ClientResult<AuthGrant>;

    /// Registers a new account. Does not log the account in.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<UserProfile>;
}

/// Prompt CRUD operations against the backend.
///
/// Every operation requires an explicit bearer token; there is no ambient
/// session state inside the store.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Fetches all prompts visible to the token, in server order.
    async fn list(&self, token: &BearerToken) -> ClientResult<Vec<Prompt>>;

    /// Creates a record, returning it with its backend-assigned id.
    async fn create(&self, token: &BearerToken, name: &str, prompt: &str)
    -> ClientResult<Prompt>;

    /// Replaces the name and body of the record with the given id.
    async fn update(
        &self,
        token: &BearerToken,
        id: PromptId,
        name: &str,
        prompt: &str,
    ) -> ClientResult<Prompt>;

    /// Deletes the record with the given id.
    async fn remove(&self, token: &BearerToken, id: PromptId) -> ClientResult<()>;
}
