//! Credential endpoints: login and registration.

use std::fmt;

use async_trait::async_trait;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Request, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use desk_primitives::BearerToken;

use crate::config::ApiConfig;
use crate::http_client::{SharedClient, build_client, dispatch, error_for_status};
use crate::traits::{AuthBackend, AuthGrant, ClientError, ClientResult, UserProfile};

/// Auth client speaking to the backend's `auth/local` endpoints.
pub struct HttpAuthClient {
    client: SharedClient,
    config: ApiConfig,
}

impl fmt::Debug for HttpAuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpAuthClient")
            .field("base_url", &self.config.base_url())
            .finish_non_exhaustive()
    }
}

impl HttpAuthClient {
    /// Constructs a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the HTTPS connector cannot
    /// be initialised.
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        let client = build_client()?;
        Ok(Self { client, config })
    }

    fn post_json(&self, path: &str, body: Vec<u8>) -> ClientResult<Request<Body>> {
        let uri = self.config.endpoint(path)?;
        Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .map_err(|err| ClientError::transport(format!("failed to build request: {err}")))
    }
}

#[async_trait]
impl AuthBackend for HttpAuthClient {
    async fn login(&self, identifier: &str, password: &str) -> ClientResult<AuthGrant> {
        let payload = LoginRequest {
            identifier,
            password,
        };
        let body = serde_json::to_vec(&payload).map_err(|err| {
            ClientError::invalid_request(format!("failed to encode login request: {err}"))
        })?;

        let request = self.post_json("auth/local", body)?;
        let (status, bytes) = dispatch(&self.client, request, self.config.timeout(), "login").await?;

        if !status.is_success() {
            return Err(login_failure(status, &bytes));
        }

        let wire: LoginResponse = serde_json::from_slice(&bytes).map_err(|err| {
            ClientError::response(format!("failed to decode login response: {err}"))
        })?;
        let jwt = BearerToken::new(wire.jwt).map_err(|err| {
            ClientError::response(format!("login response carried an unusable token: {err}"))
        })?;

        debug!(user = %wire.user.username, "login succeeded");
        Ok(AuthGrant::new(jwt, wire.user))
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<UserProfile> {
        let payload = RegisterRequest {
            username,
            email,
            password,
        };
        let body = serde_json::to_vec(&payload).map_err(|err| {
            ClientError::invalid_request(format!("failed to encode register request: {err}"))
        })?;

        let request = self.post_json("auth/local/register", body)?;
        let (status, bytes) =
            dispatch(&self.client, request, self.config.timeout(), "register").await?;

        if !status.is_success() {
            return Err(error_for_status("register", status, &bytes));
        }

        let wire: RegisterResponse = serde_json::from_slice(&bytes).map_err(|err| {
            ClientError::response(format!("failed to decode register response: {err}"))
        })?;

        debug!(user = %wire.user.username, "registration succeeded");
        Ok(wire.user)
    }
}

/// Maps a failed login status onto the taxonomy.
///
/// Strapi reports bad credentials as 400, so that status joins 401/403 as an
/// authentication failure rather than a payload rejection.
fn login_failure(status: StatusCode, body: &[u8]) -> ClientError {
    if status == StatusCode::BAD_REQUEST {
        let detail = String::from_utf8_lossy(body);
        let detail = detail.trim();
        return ClientError::unauthorized(if detail.is_empty() {
            "login rejected".to_owned()
        } else {
            format!("login rejected: {detail}")
        });
    }
    error_for_status("login", status, body)
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    jwt: String,
    user: UserProfile,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_uses_identifier_field() {
        let json = serde_json::to_string(&LoginRequest {
            identifier: "alice",
            password: "secret",
        })
        .unwrap();
        assert_eq!(json, r#"{"identifier":"alice","password":"secret"}"#);
    }

    #[test]
    fn decodes_login_response() {
        let wire: LoginResponse = serde_json::from_str(
            r#"{"jwt":"abc123","user":{"id":1,"username":"alice","email":"alice@example.com"}}"#,
        )
        .unwrap();
        assert_eq!(wire.jwt, "abc123");
        assert_eq!(wire.user.username, "alice");
    }

    #[test]
    fn bad_request_login_is_an_auth_failure() {
        let err = login_failure(StatusCode::BAD_REQUEST, b"identifier or password invalid");
        assert!(matches!(err, ClientError::Unauthorized { .. }));
    }

    #[test]
    fn server_error_login_stays_a_server_error() {
        let err = login_failure(StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert!(matches!(err, ClientError::Server { status: 500, .. }));
    }

    #[test]
    fn register_request_shape() {
        let json = serde_json::to_string(&RegisterRequest {
            username: "alice",
            email: "alice@example.com",
            password: "secret",
        })
        .unwrap();
        assert!(json.starts_with(r#"{"username":"alice""#));
    }
}
