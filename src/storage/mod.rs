//! Persisted key-value storage
//!
//! The marker store only needs a synchronous string-keyed store that survives
//! between sessions. Two backends exist:
//! - `FileStore`: one file per key in the user's data directory
//! - `MemoryStore`: process-local, used when no data directory is available

pub mod codec;
pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use anyhow::Result;

/// Synchronous string-keyed storage
pub trait KeyValueStore {
    /// Read the value under `key`, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting an absent key succeeds
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
