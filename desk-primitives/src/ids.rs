//! Prompt identifier type.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Unique identifier for a prompt record, assigned by the backend.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(u64);

impl PromptId {
    /// Creates an identifier from a raw backend id.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the underlying numeric id.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for PromptId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for PromptId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<PromptId> for u64 {
    fn from(value: PromptId) -> Self {
        value.0
    }
}

impl FromStr for PromptId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().parse::<u64>().map_err(Error::from)?;
        Ok(Self::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_prompt_id() {
        let id = PromptId::from_raw(42);
        let parsed = id.to_string().parse::<PromptId>().expect("parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_non_numeric_id() {
        let err = "abc".parse::<PromptId>().expect_err("non-numeric");
        assert!(matches!(err, Error::InvalidPromptId { .. }));
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&PromptId::from_raw(7)).unwrap();
        assert_eq!(json, "7");
    }
}
