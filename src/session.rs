//! Session context: the single token and cached user for this client.
//!
//! One `Session` is constructed by the application and shared via `Arc` with
//! the gateway and the auth manager. The persisted token and the in-memory
//! copy are kept in step: every mutation writes storage first, then memory.

use std::sync::{PoisonError, RwLock};

use zeroize::Zeroize;

use crate::api::types::User;
use crate::storage::{LocalStore, TOKEN_KEY};

/// In-memory view of the token. Only `Unloaded` consults storage.
enum TokenState {
    Unloaded,
    Absent,
    Present(String),
}

impl TokenState {
    fn wipe(&mut self, next: TokenState) {
        if let TokenState::Present(old) = self {
            old.zeroize();
        }
        *self = next;
    }
}

pub struct Session {
    store: LocalStore,
    token: RwLock<TokenState>,
    current_user: RwLock<Option<User>>,
}

impl Session {
    /// Empty session over `store`. Nothing is read until the token is asked for.
    pub fn new(store: LocalStore) -> Self {
        Self {
            store,
            token: RwLock::new(TokenState::Unloaded),
            current_user: RwLock::new(None),
        }
    }

    /// Empty session that eagerly restores a persisted token.
    pub fn init(store: LocalStore) -> Self {
        let session = Self::new(store);
        if session.token().is_some() {
            log::info!("Restored persisted session token");
        }
        session
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// The in-memory token, restored from storage once on first use.
    pub fn token(&self) -> Option<String> {
        match &*self.token.read().unwrap_or_else(PoisonError::into_inner) {
            TokenState::Present(token) => return Some(token.clone()),
            TokenState::Absent => return None,
            TokenState::Unloaded => {}
        }

        let persisted: Option<String> = self.store.get(TOKEN_KEY, None);
        let persisted = persisted.filter(|t| !t.is_empty());

        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have settled the state between the read and the write.
        if let TokenState::Unloaded = *guard {
            *guard = match persisted {
                Some(token) => TokenState::Present(token),
                None => TokenState::Absent,
            };
        }
        match &*guard {
            TokenState::Present(token) => Some(token.clone()),
            _ => None,
        }
    }

    /// Replace (or with `None`, drop) the token in storage and in memory.
    /// An empty token counts as none.
    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());
        let persisted = match &token {
            Some(t) => self.store.set(TOKEN_KEY, t.as_str()),
            None => self.store.remove(TOKEN_KEY),
        };
        if !persisted {
            log::warn!("Session token could not be persisted; keeping it in memory only");
        }

        let next = match token {
            Some(t) => TokenState::Present(t),
            None => TokenState::Absent,
        };
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .wipe(next);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_current_user(&self, user: Option<User>) {
        *self
            .current_user
            .write()
            .unwrap_or_else(PoisonError::into_inner) = user;
    }

    /// Drop the token (memory and storage) and the cached user. The token stays
    /// gone for this session even if storage refuses the removal.
    pub fn clear(&self) {
        self.set_token(None);
        self.set_current_user(None);
    }

    /// Forget in-memory state only. The next `token()` re-reads storage.
    pub fn reset(&self) {
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .wipe(TokenState::Unloaded);
        self.set_current_user(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::storage::{MemoryBackend, StorageBackend};
    use crate::testing::RemoveFailingBackend;

    fn session_with_backend() -> (Session, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        (Session::new(LocalStore::new(backend.clone())), backend)
    }

    #[test]
    fn test_new_session_is_empty() {
        let (session, _) = session_with_backend();
        assert!(session.token().is_none());
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_set_token_persists_and_caches() {
        let (session, backend) = session_with_backend();
        session.set_token(Some("tok-1".into()));

        assert_eq!(session.token().as_deref(), Some("tok-1"));
        assert_eq!(
            backend.get_item(TOKEN_KEY).unwrap().as_deref(),
            Some("\"tok-1\"")
        );
    }

    #[test]
    fn test_set_none_removes_persisted_token() {
        let (session, backend) = session_with_backend();
        session.set_token(Some("tok-1".into()));
        session.set_token(None);

        assert!(session.token().is_none());
        assert!(backend.get_item(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_lazy_restore_is_idempotent() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_item(TOKEN_KEY, "\"persisted\"").unwrap();
        let session = Session::new(LocalStore::new(backend.clone()));

        assert_eq!(session.token().as_deref(), Some("persisted"));
        // Memory now holds the token even if storage goes away.
        backend.clear().unwrap();
        assert_eq!(session.token().as_deref(), Some("persisted"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_init_restores_eagerly() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_item(TOKEN_KEY, "\"persisted\"").unwrap();
        let session = Session::init(LocalStore::new(backend));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_corrupt_persisted_token_reads_as_absent() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_item(TOKEN_KEY, "raw-unquoted-token").unwrap();
        let session = Session::new(LocalStore::new(backend));
        assert!(session.token().is_none());
    }

    #[test]
    fn test_clear_drops_token_and_user() {
        let (session, backend) = session_with_backend();
        session.set_token(Some("tok".into()));
        session.set_current_user(Some(User {
            email: "a@b.com".into(),
            full_name: "A".into(),
        }));

        session.clear();
        assert!(session.token().is_none());
        assert!(session.current_user().is_none());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_clear_sticks_when_storage_refuses_removal() {
        let backend = Arc::new(RemoveFailingBackend::default());
        let session = Session::new(LocalStore::new(backend.clone()));
        session.set_token(Some("stale".into()));

        backend.fail_removes();
        session.clear();

        // Storage still has the old token, but this session must not revive it.
        assert!(backend.get_item(TOKEN_KEY).unwrap().is_some());
        assert!(session.token().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_reset_after_failed_clear_rereads_storage() {
        let backend = Arc::new(RemoveFailingBackend::default());
        let session = Session::new(LocalStore::new(backend.clone()));
        session.set_token(Some("stale".into()));
        backend.fail_removes();
        session.clear();

        session.reset();
        assert_eq!(session.token().as_deref(), Some("stale"));
    }

    #[test]
    fn test_empty_token_counts_as_none() {
        let (session, backend) = session_with_backend();
        session.set_token(Some("tok".into()));
        session.set_token(Some(String::new()));

        assert!(session.token().is_none());
        assert!(!session.is_authenticated());
        assert!(backend.get_item(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_reset_keeps_storage() {
        let (session, _) = session_with_backend();
        session.set_token(Some("tok".into()));
        session.reset();
        assert_eq!(session.token().as_deref(), Some("tok"));
    }
}
