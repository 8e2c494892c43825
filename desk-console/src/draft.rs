//! Transient form state for creating or editing a prompt.

use desk_primitives::{Prompt, PromptId};

/// Unsaved form state. A draft is in exactly one of three modes: empty,
/// creating a new record, or editing an existing one. Field edits never
/// silently switch an editing draft into a creating one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Draft {
    /// No unsaved input.
    #[default]
    Empty,
    /// Drafting a new record.
    Creating {
        /// Draft display name.
        name: String,
        /// Draft body text.
        prompt: String,
    },
    /// Editing the record with the given id.
    Editing {
        /// Id of the record being edited.
        id: PromptId,
        /// Draft display name.
        name: String,
        /// Draft body text.
        prompt: String,
    },
}

impl Draft {
    /// Returns `true` when nothing is drafted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the id under edit, if the draft is in edit mode.
    #[must_use]
    pub const fn editing_id(&self) -> Option<PromptId> {
        match self {
            Self::Editing { id, .. } => Some(*id),
            Self::Empty | Self::Creating { .. } => None,
        }
    }

    /// Returns the drafted name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Creating { name, .. } | Self::Editing { name, .. } => Some(name),
        }
    }

    /// Returns the drafted body text, if any.
    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Creating { prompt, .. } | Self::Editing { prompt, .. } => Some(prompt),
        }
    }

    /// Copies a record's fields into the draft and enters edit mode.
    pub fn start_edit(&mut self, record: &Prompt) {
        *self = Self::Editing {
            id: record.id(),
            name: record.name().to_owned(),
            prompt: record.prompt().to_owned(),
        };
    }

    /// Sets the drafted name. An empty draft becomes a creating draft; an
    /// editing draft stays bound to its id.
    pub fn set_name(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self {
            Self::Empty => {
                *self = Self::Creating {
                    name: value,
                    prompt: String::new(),
                };
            }
            Self::Creating { name, .. } | Self::Editing { name, .. } => *name = value,
        }
    }

    /// Sets the drafted body text. An empty draft becomes a creating draft;
    /// an editing draft stays bound to its id.
    pub fn set_prompt(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self {
            Self::Empty => {
                *self = Self::Creating {
                    name: String::new(),
                    prompt: value,
                };
            }
            Self::Creating { prompt, .. } | Self::Editing { prompt, .. } => *prompt = value,
        }
    }

    /// Discards all drafted input.
    pub fn clear(&mut self) {
        *self = Self::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Prompt {
        Prompt::new(PromptId::from_raw(7), "Greeting", "Hello").unwrap()
    }

    #[test]
    fn starts_empty() {
        let draft = Draft::default();
        assert!(draft.is_empty());
        assert_eq!(draft.editing_id(), None);
        assert_eq!(draft.name(), None);
    }

    #[test]
    fn start_edit_copies_record_fields() {
        let mut draft = Draft::default();
        draft.start_edit(&record());

        assert_eq!(draft.editing_id(), Some(PromptId::from_raw(7)));
        assert_eq!(draft.name(), Some("Greeting"));
        assert_eq!(draft.prompt(), Some("Hello"));
    }

    #[test]
    fn typing_into_empty_draft_enters_create_mode() {
        let mut draft = Draft::default();
        draft.set_name("Farewell");
        draft.set_prompt("Goodbye");

        assert!(matches!(draft, Draft::Creating { .. }));
        assert_eq!(draft.editing_id(), None);
        assert_eq!(draft.name(), Some("Farewell"));
        assert_eq!(draft.prompt(), Some("Goodbye"));
    }

    #[test]
    fn editing_draft_never_becomes_creating() {
        let mut draft = Draft::default();
        draft.start_edit(&record());
        draft.set_name("Greeting v2");
        draft.set_prompt("Hi");

        assert_eq!(draft.editing_id(), Some(PromptId::from_raw(7)));
        assert_eq!(draft.name(), Some("Greeting v2"));
    }

    #[test]
    fn clear_resets_every_mode() {
        let mut editing = Draft::default();
        editing.start_edit(&record());
        editing.clear();
        assert!(editing.is_empty());

        let mut creating = Draft::default();
        creating.set_name("x");
        creating.clear();
        assert!(creating.is_empty());
    }
}
