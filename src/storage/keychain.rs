//! OS credential-store backend.
//!
//! Each key becomes one keyring entry under `SERVICE_NAME`. The keyring cannot
//! enumerate entries, so `clear` removes the keys this backend knows about:
//! the well-known ones plus anything written through it.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use keyring::Entry;

use super::{StorageBackend, StorageError, TOKEN_KEY};

/// Keychain service name shared by every entry.
const SERVICE_NAME: &str = "ai.executive-secretary.client";

impl From<keyring::Error> for StorageError {
    fn from(err: keyring::Error) -> Self {
        StorageError::Keychain(err.to_string())
    }
}

pub struct KeychainBackend {
    service: String,
    known_keys: Mutex<BTreeSet<String>>,
}

impl KeychainBackend {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
            known_keys: Mutex::new(BTreeSet::from([TOKEN_KEY.to_string()])),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StorageError> {
        Ok(Entry::new(&self.service, key)?)
    }

    fn track(&self, key: &str) {
        self.known_keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string());
    }
}

impl Default for KeychainBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for KeychainBackend {
    /// Returns `None` if no entry exists.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entry(key)?.set_password(value)?;
        self.track(key);
        Ok(())
    }

    /// Idempotent: a missing entry is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        let keys: Vec<String> = self
            .known_keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect();
        for key in keys {
            self.remove_item(&key)?;
        }
        Ok(())
    }
}
