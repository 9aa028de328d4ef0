//! Durable key-value storage with failure containment.
//!
//! `LocalStore` is the only type callers use. It JSON-encodes values on write
//! and decodes on read, and it never lets a backend failure escape: reads fall
//! back to the caller's default, writes report `false`.

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use file::FileBackend;
pub use keychain::KeychainBackend;
pub use memory::MemoryBackend;

/// Well-known key holding the session token.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("keychain operation failed: {0}")]
    Keychain(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Raw string storage. Implementations may fail freely; `LocalStore` contains it.
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn StorageBackend>,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// In-memory store, nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Read and decode `key`. Missing, unreadable, or corrupt values yield `default`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return default,
            Err(e) => {
                log::error!("Storage error: {}", e);
                return default;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Storage error: corrupt value under '{}': {}", key, e);
                default
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|raw| self.backend.set_item(key, &raw));
        Self::contain(result)
    }

    pub fn remove(&self, key: &str) -> bool {
        Self::contain(self.backend.remove_item(key))
    }

    pub fn clear(&self) -> bool {
        Self::contain(self.backend.clear())
    }

    fn contain(result: Result<(), StorageError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                log::error!("Storage error: {}", e);
                false
            }
        }
    }
}
