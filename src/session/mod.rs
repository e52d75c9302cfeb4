//! Session token storage.
//!
//! The backend identifies a conversation by an opaque `Session-Id` token,
//! returned once in a response header and round-tripped on every later
//! streaming request. These backends persist that single token.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use std::sync::Arc;

use crate::error::Error;

/// Trait for session token storage backends.
///
/// All implementations must be thread-safe (`Send + Sync`). The token is
/// written at most once per browsing session by whichever call observes it
/// first; the stored value is expected stable, so last-write-wins is
/// acceptable.
pub trait SessionStore: Send + Sync {
    /// Load the stored token, if any.
    fn load(&self) -> Result<Option<String>, Error>;

    /// Save a token to storage.
    fn save(&self, token: &str) -> Result<(), Error>;

    /// Remove the stored token.
    fn clear(&self) -> Result<(), Error>;

    /// Check if a token exists in storage.
    fn exists(&self) -> Result<bool, Error> {
        Ok(self.load()?.is_some())
    }

    /// Get the name of this storage backend.
    fn name(&self) -> &str;
}

// Blanket implementation for Arc<T>
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn load(&self) -> Result<Option<String>, Error> {
        (**self).load()
    }
    fn save(&self, token: &str) -> Result<(), Error> {
        (**self).save(token)
    }
    fn clear(&self) -> Result<(), Error> {
        (**self).clear()
    }
    fn exists(&self) -> Result<bool, Error> {
        (**self).exists()
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}

// Blanket implementation for Box<T>
impl<T: SessionStore + ?Sized> SessionStore for Box<T> {
    fn load(&self) -> Result<Option<String>, Error> {
        (**self).load()
    }
    fn save(&self, token: &str) -> Result<(), Error> {
        (**self).save(token)
    }
    fn clear(&self) -> Result<(), Error> {
        (**self).clear()
    }
    fn exists(&self) -> Result<bool, Error> {
        (**self).exists()
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}
