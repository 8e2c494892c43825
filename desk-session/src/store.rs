//! Durable token store implementations.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;

use desk_primitives::BearerToken;

use crate::error::{SessionError, SessionResult};

/// Trait implemented by token stores.
///
/// The original application kept the token under a single fixed localStorage
/// key; implementations here keep the same one-token contract.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the persisted token, if any.
    async fn load(&self) -> SessionResult<Option<BearerToken>>;

    /// Persists the token, replacing any previous value.
    async fn save(&self, token: &BearerToken) -> SessionResult<()>;

    /// Removes the persisted token.
    async fn clear(&self) -> SessionResult<()>;
}

/// File-backed store holding the token as a single line of text.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store backed by the given path. No I/O happens until the
    /// store is used.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> SessionResult<Option<BearerToken>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let token = BearerToken::new(trimmed)
            .map_err(|err| SessionError::store(format!("stored token unusable: {err}")))?;
        Ok(Some(token))
    }

    async fn save(&self, token: &BearerToken) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&self.path, token.as_str()).await?;
        Ok(())
    }

    async fn clear(&self) -> SessionResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<BearerToken>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a token.
    #[must_use]
    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> SessionResult<Option<BearerToken>> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &BearerToken) -> SessionResult<()> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> SessionResult<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("promptdesk-token-{}.txt", Uuid::new_v4()));
        path
    }

    #[tokio::test]
    async fn file_store_round_trip() {
        let path = temp_path();
        let store = FileTokenStore::new(&path);

        assert!(store.load().await.unwrap().is_none());

        let token = BearerToken::new("abc123").unwrap();
        store.save(&token).await.unwrap();
        let loaded = store.load().await.unwrap().expect("token persisted");
        assert_eq!(loaded.as_str(), "abc123");

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        // Clearing twice is fine.
        store.clear().await.unwrap();

        if path.exists() {
            let _ = std::fs::remove_file(path);
        }
    }

    #[tokio::test]
    async fn file_store_treats_blank_file_as_absent() {
        let path = temp_path();
        std::fs::write(&path, "  \n").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(store.load().await.unwrap().is_none());

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().await.unwrap().is_none());

        let token = BearerToken::new("abc123").unwrap();
        store.save(&token).await.unwrap();
        assert!(store.load().await.unwrap().is_some());

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
