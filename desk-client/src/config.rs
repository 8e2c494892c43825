//! Backend endpoint configuration.

use std::env;
use std::time::Duration;

use hyper::Uri;

use crate::traits::{ClientError, ClientResult};

/// Environment variable used when loading the base URL automatically.
pub const API_URL_ENV: &str = "PROMPTDESK_API_URL";

/// Base URL used when nothing else is configured (local Strapi default).
pub const DEFAULT_BASE_URL: &str = "http://localhost:1337/api/";

/// Configuration shared by the auth and prompt clients.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration pointing at the default local backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Loads the base URL from `PROMPTDESK_API_URL` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the variable holds an
    /// invalid URL.
    pub fn from_env() -> ClientResult<Self> {
        let mut cfg = Self::new();
        if let Ok(url) = env::var(API_URL_ENV) {
            cfg = cfg.with_base_url(url)?;
        }
        Ok(cfg)
    }

    /// Overrides the base URL used for API calls.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the supplied URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> ClientResult<Self> {
        self.base_url = sanitize_base_url(base_url.as_ref())?;
        Ok(self)
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured base URL (always slash-terminated).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configured request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Joins a relative path onto the base URL and parses it as a [`Uri`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> ClientResult<Uri> {
        let path = path.trim_start_matches('/');
        format!("{}{path}", self.base_url)
            .parse::<Uri>()
            .map_err(|err| ClientError::configuration(format!("invalid endpoint {path}: {err}")))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize_base_url(input: &str) -> ClientResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ClientError::configuration(
            "base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>()
        .map_err(|err| ClientError::configuration(format!("invalid base URL: {err}")))?;
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_requires_scheme() {
        let err = ApiConfig::new()
            .with_base_url("localhost:1337/api")
            .expect_err("missing scheme should error");
        assert!(matches!(err, ClientError::Configuration { .. }));
    }

    #[test]
    fn sanitize_appends_trailing_slash() {
        let cfg = ApiConfig::new()
            .with_base_url("https://example.com/api")
            .expect("valid URL");
        assert_eq!(cfg.base_url(), "https://example.com/api/");
    }

    #[test]
    fn endpoint_joins_relative_paths() {
        let cfg = ApiConfig::new()
            .with_base_url("https://example.com/api")
            .unwrap();
        let uri = cfg.endpoint("prompts/7").unwrap();
        assert_eq!(uri.to_string(), "https://example.com/api/prompts/7");
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ApiConfig::default().base_url(), DEFAULT_BASE_URL);
    }
}
