//! Persistent key-value storage for session credentials
//!
//! Stands in for the browser's local storage. Values are opaque bytes; the
//! session store decides what goes in them.

mod filesystem;
mod memory;

pub use filesystem::FileSessionStorage;
pub use memory::MemorySessionStorage;

use async_trait::async_trait;
use passage_core::Result;

/// Key-value persistence used by [`crate::SessionStore`].
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read a value, `None` if the key was never written or was removed.
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a value, replacing any previous one.
    async fn save(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Remove a value. Returns `true` if something was removed.
    async fn remove(&self, key: &str) -> Result<bool>;
}

#[async_trait]
impl<T: SessionStorage + ?Sized> SessionStorage for std::sync::Arc<T> {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).load(key).await
    }

    async fn save(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).save(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key).await
    }
}
