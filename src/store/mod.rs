pub mod keychain;
pub mod sqlite;

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use crate::error::StoreError;

pub use keychain::KeychainStore;
pub use sqlite::SqliteStore;

/// Durable key-value capability used to persist the session token.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::StatePoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::StatePoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::StatePoisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Keychain first, SQLite as fallback.
///
/// Writes go to both layers; the write succeeds if either does. Some
/// keychains (Linux keyutils) lose entries on reboot, so the fallback copy
/// is what keeps a session durable there. Reads try the primary first.
/// Deletes hit both so a stale fallback entry cannot resurrect a cleared
/// session.
pub struct LayeredStore<P, F> {
    primary: P,
    fallback: F,
}

impl<P: TokenStore, F: TokenStore> LayeredStore<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: TokenStore, F: TokenStore> TokenStore for LayeredStore<P, F> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.primary.get(key) {
            Ok(Some(value)) => return Ok(Some(value)),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, key, "Primary store read failed, falling back");
            }
        }
        self.fallback.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let primary = self.primary.set(key, value);
        let fallback = self.fallback.set(key, value);
        match (primary, fallback) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(e), Ok(())) => {
                warn!(error = %e, key, "Primary store write failed, kept fallback copy");
                Ok(())
            }
            (Ok(()), Err(e)) => {
                warn!(error = %e, key, "Fallback store write failed");
                Ok(())
            }
            (Err(e), Err(_)) => Err(e),
        }
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let primary = self.primary.delete(key);
        let fallback = self.fallback.delete(key);
        if let Err(e) = &primary {
            warn!(error = %e, key, "Primary store delete failed");
        }
        fallback.and(primary)
    }
}
