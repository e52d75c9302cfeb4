//! In-memory session token storage.

use std::sync::{Arc, RwLock};

use tracing::instrument;

use super::SessionStore;
use crate::error::Error;

/// In-memory session token storage.
///
/// Uses `Arc<RwLock<Option<String>>>` for thread-safe access. Useful for
/// testing and ephemeral sessions. The storage is Clone and can be shared
/// across the application.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl MemorySessionStore {
    /// Create a new empty MemorySessionStore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MemorySessionStore holding an initial token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    #[instrument(skip(self))]
    fn load(&self) -> Result<Option<String>, Error> {
        let guard = self.inner.read().map_err(|_| Error::Storage("lock poisoned".into()))?;
        Ok(guard.clone())
    }

    #[instrument(skip(self, token))]
    fn save(&self, token: &str) -> Result<(), Error> {
        let mut guard = self.inner.write().map_err(|_| Error::Storage("lock poisoned".into()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&self) -> Result<(), Error> {
        let mut guard = self.inner.write().map_err(|_| Error::Storage("lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());
        assert!(!store.exists().unwrap());
    }

    #[test]
    fn with_token() {
        let store = MemorySessionStore::with_token("sess-1");
        assert_eq!(store.load().unwrap().as_deref(), Some("sess-1"));
        assert!(store.exists().unwrap());
    }

    #[test]
    fn save_and_load() {
        let store = MemorySessionStore::new();
        store.save("sess-2").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("sess-2"));
    }

    #[test]
    fn clear_removes_token() {
        let store = MemorySessionStore::with_token("sess-3");
        store.clear().unwrap();
        assert!(!store.exists().unwrap());
    }

    #[test]
    fn clones_share_state() {
        let store = MemorySessionStore::new();
        let other = store.clone();
        store.save("shared").unwrap();
        assert_eq!(other.load().unwrap().as_deref(), Some("shared"));
    }
}
