//! Prompt record type mirroring the backend wire format.

use serde::{Deserialize, Serialize};

use crate::{Error, PromptId, Result};

/// A stored prompt: a short name plus the prompt body text.
///
/// Field names match the backend wire format (`id`, `name`, `prompt`), so the
/// record deserializes directly from API responses. The identifier is always
/// assigned by the backend; clients never mint ids locally.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Prompt {
    id: PromptId,
    name: String,
    prompt: String,
}

impl Prompt {
    /// Creates a record from backend-supplied parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] when the name is empty.
    pub fn new(
        id: PromptId,
        name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidRecord {
                reason: "prompt name must not be empty".to_owned(),
            });
        }

        Ok(Self {
            id,
            name,
            prompt: prompt.into(),
        })
    }

    /// Returns the backend-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> PromptId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the prompt body text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Consumes the record, returning `(id, name, prompt)`.
    #[must_use]
    pub fn into_parts(self) -> (PromptId, String, String) {
        (self.id, self.name, self.prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_record() {
        let record = Prompt::new(PromptId::from_raw(1), "Greeting", "Hello").unwrap();
        assert_eq!(record.id(), PromptId::from_raw(1));
        assert_eq!(record.name(), "Greeting");
        assert_eq!(record.prompt(), "Hello");
    }

    #[test]
    fn rejects_blank_name() {
        let err = Prompt::new(PromptId::from_raw(1), "  ", "body").expect_err("blank name");
        assert!(matches!(err, Error::InvalidRecord { .. }));
    }

    #[test]
    fn decodes_wire_format() {
        let record: Prompt =
            serde_json::from_str(r#"{"id":3,"name":"Greeting","prompt":"Hello"}"#).unwrap();
        assert_eq!(record.id(), PromptId::from_raw(3));
        assert_eq!(record.name(), "Greeting");
    }
}
