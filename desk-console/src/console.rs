//! Operation dispatch and reconciliation of the prompt list mirror.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use desk_client::traits::{PromptStore, UserProfile};
use desk_primitives::{Prompt, PromptId};
use desk_session::{SessionManager, SessionState};

use crate::draft::Draft;
use crate::error::{ConsoleError, ConsoleResult};

/// Drives the client: owns the session, the local mirror of the server's
/// prompt list, and the transient draft.
///
/// The mirror is a cache with no eviction policy: every successful fetch
/// replaces it wholesale, and any request failure leaves it untouched.
/// Operations take `&mut self`, so responses apply strictly in call order and
/// nothing stale can land after a logout.
pub struct Console {
    session: SessionManager,
    store: Arc<dyn PromptStore>,
    prompts: Vec<Prompt>,
    draft: Draft,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("session", &self.session)
            .field("prompts", &self.prompts.len())
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Creates a console bound to the given session and prompt store.
    #[must_use]
    pub fn new(session: SessionManager, store: Arc<dyn PromptStore>) -> Self {
        Self {
            session,
            store,
            prompts: Vec::new(),
            draft: Draft::Empty,
        }
    }

    /// Returns the current session state.
    #[must_use]
    pub const fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Returns the local mirror of the prompt list, in server order (with
    /// locally created records appended).
    #[must_use]
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Returns the current draft.
    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Restores any persisted session; when one is found, performs the
    /// initial prompt fetch. Returns `true` when a session was restored.
    ///
    /// # Errors
    ///
    /// Propagates store failures and the initial fetch failure.
    pub async fn startup(&mut self) -> ConsoleResult<bool> {
        let restored = self.session.restore().await?;
        if restored {
            self.refresh().await?;
        }
        Ok(restored)
    }

    /// Logs in and fetches the prompt list exactly once.
    ///
    /// # Errors
    ///
    /// Propagates authentication and fetch failures; on failure the list and
    /// draft are untouched.
    pub async fn login(&mut self, identifier: &str, password: &str) -> ConsoleResult<()> {
        self.session.login(identifier, password).await?;
        self.refresh().await
    }

    /// Registers a new account without logging in.
    ///
    /// # Errors
    ///
    /// Propagates registration failures.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ConsoleResult<UserProfile> {
        let profile = self.session.register(username, email, password).await?;
        Ok(profile)
    }

    /// Logs out and drops all dependent state. The list and draft are cleared
    /// even when clearing the persisted token fails.
    ///
    /// # Errors
    ///
    /// Reports token store failures after local state is cleared.
    pub async fn logout(&mut self) -> ConsoleResult<()> {
        let result = self.session.logout().await;
        self.prompts.clear();
        self.draft.clear();
        debug!("console state cleared");
        result.map_err(ConsoleError::from)
    }

    /// Replaces the local list with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Requires an active session; on fetch failure the mirror is untouched.
    pub async fn refresh(&mut self) -> ConsoleResult<()> {
        let token = self.session.token()?;
        let fetched = self.store.list(token).await?;
        self.prompts = fetched;
        Ok(())
    }

    /// Copies the listed record with the given id into the draft and enters
    /// edit mode.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UnknownPrompt`] when the id is not in the
    /// local list.
    pub fn start_edit(&mut self, id: PromptId) -> ConsoleResult<()> {
        let record = self
            .prompts
            .iter()
            .find(|record| record.id() == id)
            .ok_or(ConsoleError::UnknownPrompt { id })?;
        self.draft.start_edit(record);
        Ok(())
    }

    /// Sets the drafted name.
    pub fn set_draft_name(&mut self, value: impl Into<String>) {
        self.draft.set_name(value);
    }

    /// Sets the drafted body text.
    pub fn set_draft_prompt(&mut self, value: impl Into<String>) {
        self.draft.set_prompt(value);
    }

    /// Discards the draft without touching the list.
    pub fn cancel_edit(&mut self) {
        self.draft.clear();
    }

    /// Submits the draft: an editing draft updates its record, a creating
    /// draft creates a new one. On success the list is reconciled and the
    /// draft cleared; on failure both are untouched so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::EmptyDraft`] when nothing is drafted, and
    /// propagates session and request failures.
    pub async fn submit_draft(&mut self) -> ConsoleResult<()> {
        match self.draft.clone() {
            Draft::Empty => Err(ConsoleError::EmptyDraft),
            Draft::Creating { name, prompt } => {
                let token = self.session.token()?;
                let created = self.store.create(token, &name, &prompt).await?;
                debug!(id = %created.id(), "appended created prompt");
                self.prompts.push(created);
                self.draft.clear();
                Ok(())
            }
            Draft::Editing { id, name, prompt } => {
                let token = self.session.token()?;
                let updated = self.store.update(token, id, &name, &prompt).await?;
                match self.prompts.iter_mut().find(|record| record.id() == id) {
                    Some(slot) => *slot = updated,
                    // The record left the mirror between edit and submit;
                    // keep the server's version visible.
                    None => self.prompts.push(updated),
                }
                self.draft.clear();
                Ok(())
            }
        }
    }

    /// Deletes the record with the given id, dropping it from the local list
    /// on success. On failure the list is unchanged, so removing an id the
    /// server does not know reports the failure and changes nothing.
    ///
    /// # Errors
    ///
    /// Requires an active session; propagates request failures.
    pub async fn remove(&mut self, id: PromptId) -> ConsoleResult<()> {
        let token = self.session.token()?;
        self.store.remove(token, id).await?;
        self.prompts.retain(|record| record.id() != id);
        Ok(())
    }
}
