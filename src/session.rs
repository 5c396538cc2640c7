//! Authentication token storage.
//!
//! The token is persisted in browser `localStorage` so a reload keeps the user
//! signed in. Nothing here knows whether the token is still valid: the remote
//! API decides that, and the form controller clears the token when a call is
//! rejected.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::StorageError;

/// Opaque credential issued by the remote API.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Key-value backend for the session store.
pub trait TokenStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`.
pub struct LocalTokenStorage {
    storage: web_sys::Storage,
}

impl LocalTokenStorage {
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl TokenStorage for LocalTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// In-memory storage. Used in tests and when `localStorage` is blocked.
#[derive(Default)]
pub struct MemoryTokenStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Handle to the current session. Cloning shares the same backing storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn TokenStorage>,
    key: Rc<str>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn TokenStorage>, key: &str) -> Self {
        Self {
            storage,
            key: Rc::from(key),
        }
    }

    /// Session backed by `localStorage`, falling back to memory if the
    /// browser refuses access (private mode, sandboxed iframe).
    pub fn browser(key: &str) -> Self {
        match LocalTokenStorage::open() {
            Ok(storage) => Self::new(Rc::new(storage), key),
            Err(e) => {
                warn!("Falling back to in-memory session: {}", e);
                Self::in_memory(key)
            }
        }
    }

    pub fn in_memory(key: &str) -> Self {
        Self::new(Rc::new(MemoryTokenStorage::default()), key)
    }

    /// Read on every call; empty strings count as absent.
    pub fn token(&self) -> Option<Token> {
        self.storage
            .get(&self.key)
            .filter(|value| !value.is_empty())
            .map(Token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &Token) {
        debug!("Storing session token");
        if let Err(e) = self.storage.set(&self.key, token.as_str()) {
            warn!("Failed to persist session token: {}", e);
        }
    }

    pub fn clear_token(&self) {
        debug!("Clearing session token");
        if let Err(e) = self.storage.remove(&self.key) {
            warn!("Failed to clear session token: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lifecycle() {
        let session = SessionStore::in_memory("token");
        assert!(session.token().is_none());
        assert!(!session.is_authenticated());

        session.set_token(&Token::new("tok123"));
        assert_eq!(session.token(), Some(Token::new("tok123")));

        session.clear_token();
        assert!(session.token().is_none());
    }

    #[test]
    fn test_clones_share_storage() {
        let session = SessionStore::in_memory("token");
        let other = session.clone();
        other.set_token(&Token::new("abc"));
        assert_eq!(session.token().map(|t| t.as_str().to_string()), Some("abc".to_string()));
    }

    #[test]
    fn test_empty_value_is_not_a_token() {
        let storage = Rc::new(MemoryTokenStorage::default());
        storage.set("token", "").unwrap();
        let session = SessionStore::new(storage, "token");
        assert!(session.token().is_none());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = Token::new("secret-value");
        assert_eq!(format!("{:?}", token), "Token(***)");
    }
}
