//! Opaque bearer credential type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Opaque bearer token returned by the auth endpoint and attached to every
/// authenticated request.
///
/// The token value is a secret: `Debug` output is redacted and the type does
/// not implement `Display`.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a token string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyToken`] when the trimmed value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(Error::EmptyToken);
        }
        Ok(Self(value))
    }

    /// Returns the raw token value for header construction.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_token() {
        let err = BearerToken::new("   ").expect_err("empty token");
        assert!(matches!(err, Error::EmptyToken));
    }

    #[test]
    fn debug_output_is_redacted() {
        let token = BearerToken::new("abc123").unwrap();
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("abc123"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn serializes_transparently() {
        let token = BearerToken::new("abc123").unwrap();
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"abc123\"");
    }
}
