//! Session state and lifecycle operations.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use desk_client::traits::{AuthBackend, UserProfile};
use desk_primitives::BearerToken;

use crate::error::{SessionError, SessionResult};
use crate::store::TokenStore;

/// Discrete states a session can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token held; only login and register are available.
    Anonymous,
    /// A token is held and authenticated operations may run.
    Active,
}

impl SessionState {
    /// Returns `true` when the session holds a token.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Owns the bearer token and drives login, registration, restore, and logout
/// against the auth backend and token store it was constructed with.
pub struct SessionManager {
    backend: Arc<dyn AuthBackend>,
    store: Arc<dyn TokenStore>,
    token: Option<BearerToken>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates an anonymous session bound to the given backend and store.
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            backend,
            store,
            token: None,
        }
    }

    /// Returns the current session state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.token.is_some() {
            SessionState::Active
        } else {
            SessionState::Anonymous
        }
    }

    /// Returns the active token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when no session is active.
    pub fn token(&self) -> SessionResult<&BearerToken> {
        self.token.as_ref().ok_or(SessionError::NotAuthenticated)
    }

    /// Reads any previously persisted token, activating the session when one
    /// is found. Returns `true` in that case so the caller can trigger the
    /// initial prompt fetch.
    ///
    /// # Errors
    ///
    /// Propagates token store failures.
    pub async fn restore(&mut self) -> SessionResult<bool> {
        match self.store.load().await? {
            Some(token) => {
                debug!("restored persisted session");
                self.token = Some(token);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Exchanges credentials for a token, persisting it and activating the
    /// session. On failure the session and store are untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError::Backend`] from the auth backend.
    pub async fn login(&mut self, identifier: &str, password: &str) -> SessionResult<()> {
        let grant = self.backend.login(identifier, password).await?;
        let (token, user) = grant.into_parts();

        // Persistence is best-effort, matching the original localStorage
        // behaviour: the in-memory session stays usable either way.
        if let Err(err) = self.store.save(&token).await {
            warn!(%err, "failed to persist session token");
        }

        debug!(user = %user.username, "session activated");
        self.token = Some(token);
        Ok(())
    }

    /// Registers a new account. Never changes the session state; the caller
    /// logs in separately.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError::Backend`] from the auth backend.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> SessionResult<UserProfile> {
        let profile = self.backend.register(username, email, password).await?;
        Ok(profile)
    }

    /// Drops the in-memory token and clears the store. The session always
    /// ends anonymous, even when clearing the store fails.
    ///
    /// # Errors
    ///
    /// Propagates token store failures after the in-memory token is dropped.
    pub async fn logout(&mut self) -> SessionResult<()> {
        self.token = None;
        self.store.clear().await?;
        debug!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use desk_client::traits::{AuthGrant, ClientError, ClientResult};

    use crate::store::MemoryTokenStore;

    struct StaticBackend {
        accept: bool,
    }

    #[async_trait]
    impl AuthBackend for StaticBackend {
        async fn login(&self, identifier: &str, _password: &str) -> ClientResult<AuthGrant> {
            if !self.accept {
                return Err(ClientError::unauthorized("bad credentials"));
            }
            let token = BearerToken::new("abc123").unwrap();
            let user = UserProfile {
                id: 1,
                username: identifier.to_owned(),
                email: format!("{identifier}@example.com"),
            };
            Ok(AuthGrant::new(token, user))
        }

        async fn register(
            &self,
            username: &str,
            email: &str,
            _password: &str,
        ) -> ClientResult<UserProfile> {
            if !self.accept {
                return Err(ClientError::rejected("username taken"));
            }
            Ok(UserProfile {
                id: 2,
                username: username.to_owned(),
                email: email.to_owned(),
            })
        }
    }

    fn manager(accept: bool, store: Arc<MemoryTokenStore>) -> SessionManager {
        SessionManager::new(Arc::new(StaticBackend { accept }), store)
    }

    #[tokio::test]
    async fn login_activates_and_persists() {
        let store = Arc::new(MemoryTokenStore::new());
        let mut session = manager(true, Arc::clone(&store));

        assert_eq!(session.state(), SessionState::Anonymous);
        session.login("alice", "secret").await.unwrap();

        assert!(session.state().is_active());
        assert_eq!(session.token().unwrap().as_str(), "abc123");
        assert!(store.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn failed_login_leaves_session_anonymous() {
        let store = Arc::new(MemoryTokenStore::new());
        let mut session = manager(false, Arc::clone(&store));

        let err = session.login("alice", "wrong").await.expect_err("rejected");
        assert!(matches!(
            err,
            SessionError::Backend(ClientError::Unauthorized { .. })
        ));
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn register_does_not_activate() {
        let store = Arc::new(MemoryTokenStore::new());
        let mut session = manager(true, store);

        let profile = session
            .register("bob", "bob@example.com", "secret")
            .await
            .unwrap();
        assert_eq!(profile.username, "bob");
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn logout_clears_token_and_store() {
        let store = Arc::new(MemoryTokenStore::new());
        let mut session = manager(true, Arc::clone(&store));

        session.login("alice", "secret").await.unwrap();
        session.logout().await.unwrap();

        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(matches!(
            session.token(),
            Err(SessionError::NotAuthenticated)
        ));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn restore_picks_up_persisted_token() {
        let token = BearerToken::new("persisted").unwrap();
        let store = Arc::new(MemoryTokenStore::with_token(token));
        let mut session = manager(true, store);

        assert!(session.restore().await.unwrap());
        assert!(session.state().is_active());
        assert_eq!(session.token().unwrap().as_str(), "persisted");
    }

    #[tokio::test]
    async fn restore_without_token_stays_anonymous() {
        let store = Arc::new(MemoryTokenStore::new());
        let mut session = manager(true, store);

        assert!(!session.restore().await.unwrap());
        assert_eq!(session.state(), SessionState::Anonymous);
    }
}
