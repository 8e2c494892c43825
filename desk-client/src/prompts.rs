//! Authenticated prompt CRUD endpoints.

use std::fmt;

use async_trait::async_trait;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Method, Request};
use serde::Serialize;
use tracing::debug;

use desk_primitives::{BearerToken, Prompt, PromptId};

use crate::config::ApiConfig;
use crate::http_client::{SharedClient, build_client, dispatch, error_for_status};
use crate::traits::{ClientError, ClientResult, PromptStore};

/// Prompt client speaking to the backend's `prompts` endpoints.
pub struct HttpPromptClient {
    client: SharedClient,
    config: ApiConfig,
}

impl fmt::Debug for HttpPromptClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPromptClient")
            .field("base_url", &self.config.base_url())
            .finish_non_exhaustive()
    }
}

impl HttpPromptClient {
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

    fn request(
        &self,
        method: Method,
        path: &str,
        token: &BearerToken,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Request<Body>> {
        let uri = self.config.endpoint(path)?;
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()));
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        builder
            .body(body.map_or_else(Body::empty, Body::from))
            .map_err(|err| ClientError::transport(format!("failed to build request: {err}")))
    }

    async fn send_expecting_record(
        &self,
        request: Request<Body>,
        operation: &'static str,
    ) -> ClientResult<Prompt> {
        let (status, bytes) = dispatch(&self.client, request, self.config.timeout(), operation).await?;
        if !status.is_success() {
            return Err(error_for_status(operation, status, &bytes));
        }
        serde_json::from_slice(&bytes).map_err(|err| {
            ClientError::response(format!("failed to decode {operation} response: {err}"))
        })
    }
}

#[async_trait]
impl PromptStore for HttpPromptClient {
    async fn list(&self, token: &BearerToken) -> ClientResult<Vec<Prompt>> {
        let request = self.request(Method::GET, "prompts", token, None)?;
        let (status, bytes) =
            dispatch(&self.client, request, self.config.timeout(), "list prompts").await?;
        if !status.is_success() {
            return Err(error_for_status("list prompts", status, &bytes));
        }

        let prompts: Vec<Prompt> = serde_json::from_slice(&bytes).map_err(|err| {
            ClientError::response(format!("failed to decode prompt list: {err}"))
        })?;
        debug!(count = prompts.len(), "fetched prompt list");
        Ok(prompts)
    }

    async fn create(
        &self,
        token: &BearerToken,
        name: &str,
        prompt: &str,
    ) -> ClientResult<Prompt> {
        let body = encode_payload(name, prompt)?;
        let request = self.request(Method::POST, "prompts", token, Some(body))?;
        let created = self.send_expecting_record(request, "create prompt").await?;
        debug!(id = %created.id(), "created prompt");
        Ok(created)
    }

    async fn update(
        &self,
        token: &BearerToken,
        id: PromptId,
        name: &str,
        prompt: &str,
    ) -> ClientResult<Prompt> {
        let body = encode_payload(name, prompt)?;
        let request = self.request(Method::PUT, &format!("prompts/{id}"), token, Some(body))?;
        let updated = self.send_expecting_record(request, "update prompt").await?;
        debug!(id = %updated.id(), "updated prompt");
        Ok(updated)
    }

    async fn remove(&self, token: &BearerToken, id: PromptId) -> ClientResult<()> {
        let request = self.request(Method::DELETE, &format!("prompts/{id}"), token, None)?;
        let (status, bytes) =
            dispatch(&self.client, request, self.config.timeout(), "delete prompt").await?;
        if !status.is_success() {
            return Err(error_for_status("delete prompt", status, &bytes));
        }
        debug!(%id, "deleted prompt");
        Ok(())
    }
}

/// Full-replacement payload shared by create and update.
#[derive(Debug, Serialize)]
struct PromptPayload<'a> {
    name: &'a str,
    prompt: &'a str,
}

fn encode_payload(name: &str, prompt: &str) -> ClientResult<Vec<u8>> {
    serde_json::to_vec(&PromptPayload { name, prompt }).map_err(|err| {
        ClientError::invalid_request(format!("failed to encode prompt payload: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_matches_wire_format() {
        let body = encode_payload("Greeting", "Hello").unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            r#"{"name":"Greeting","prompt":"Hello"}"#
        );
    }

    #[test]
    fn requests_carry_bearer_header() {
        let client = HttpPromptClient::new(ApiConfig::new()).unwrap();
        let token = BearerToken::new("abc123").unwrap();
        let request = client.request(Method::GET, "prompts", &token, None).unwrap();

        let header = request.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(header, "Bearer abc123");
        assert!(request.uri().to_string().ends_with("/prompts"));
    }

    #[test]
    fn delete_targets_the_record_path() {
        let client = HttpPromptClient::new(ApiConfig::new()).unwrap();
        let token = BearerToken::new("abc123").unwrap();
        let request = client
            .request(
                Method::DELETE,
                &format!("prompts/{}", PromptId::from_raw(7)),
                &token,
                None,
            )
            .unwrap();
        assert!(request.uri().path().ends_with("/prompts/7"));
    }
}
