//! Client session
//!
//! Holds the bearer token issued by `POST /api/login`.
//!
//! This module provides:
//! - `TokenStore` trait defining durable token storage
//! - `FileTokenStore` keeping the token in a single file between runs
//! - `MemoryTokenStore` for tests and throwaway sessions
//! - `Session`, the one place the rest of the crate reads or changes
//!   authentication state
//!
//! Storage is read once, when the session is opened. After that every read
//! goes through the cached state and every change goes through `login` or
//! `logout`, which write storage first and the cache second.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Token storage error at '{path}': {source}")]
    Storage {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid session token")]
    InvalidToken,
}

/// Durable storage for a single token string
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Replace the stored token
    fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the stored token; succeeds when nothing is stored
    fn clear(&self) -> Result<(), SessionError>;
}

/// Token kept in a file on disk
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a boxed store for use with `Session::open`
    pub fn boxed(path: impl Into<PathBuf>) -> Arc<dyn TokenStore> {
        Arc::new(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Storage {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Ok(Some(text)),
                Err(_) => {
                    tracing::warn!(path = %self.path.display(), "Stored token is not valid UTF-8");
                    Ok(None)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.storage_error(e)),
        }
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
            }
        }
        std::fs::write(&self.path, token).map_err(|e| self.storage_error(e))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error(e)),
        }
    }
}

/// In-memory token storage
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    pub fn boxed() -> Arc<dyn TokenStore> {
        Arc::new(Self::new())
    }

    /// Current stored value, bypassing any session cache
    pub fn stored(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.stored())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Check that a token can be sent in an `Authorization` header
pub fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_graphic())
}

/// Authentication state shared by every view
pub struct Session {
    store: Arc<dyn TokenStore>,
    token: RwLock<Option<String>>,
}

impl Session {
    /// Open a session, reading storage exactly once.
    ///
    /// A missing, unreadable or malformed token leaves the session
    /// unauthenticated.
    pub fn open(store: Arc<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(Some(raw)) => {
                let trimmed = raw.trim();
                if is_valid_token(trimmed) {
                    Some(trimmed.to_string())
                } else {
                    if !trimmed.is_empty() {
                        tracing::warn!("Ignoring malformed stored token");
                    }
                    None
                }
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read stored token: {}", e);
                None
            }
        };

        tracing::debug!(authenticated = token.is_some(), "Session opened");

        Self {
            store,
            token: RwLock::new(token),
        }
    }

    /// Persist a freshly issued token and mark the session authenticated
    pub fn login(&self, token: &str) -> Result<(), SessionError> {
        let token = token.trim();
        if !is_valid_token(token) {
            return Err(SessionError::InvalidToken);
        }

        self.store.save(token)?;
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        tracing::info!("Logged in");
        Ok(())
    }

    /// Forget the token; calling it while logged out is a no-op
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        let previous = self.token.write().unwrap_or_else(|e| e.into_inner()).take();
        if previous.is_some() {
            tracing::info!("Logged out");
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Token to attach to the next request
    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn test_login_then_authenticated() {
        let session = Session::open(MemoryTokenStore::boxed());
        assert!(!session.is_authenticated());

        session.login("abc.def.ghi").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("abc.def.ghi"));

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let session = Session::open(MemoryTokenStore::boxed());
        session.logout().unwrap();
        session.logout().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_invalid_token_rejected_and_state_unchanged() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = Session::open(store.clone());

        assert!(matches!(session.login("   "), Err(SessionError::InvalidToken)));
        assert!(matches!(session.login("two words"), Err(SessionError::InvalidToken)));
        assert!(!session.is_authenticated());
        assert!(store.stored().is_none());
    }

    #[test]
    fn test_storage_read_once_at_open() {
        let store = Arc::new(MemoryTokenStore::with_token("first"));
        let session = Session::open(store.clone());

        // A write that bypasses the session is not observed.
        store.clear().unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("first"));
    }

    #[test]
    fn test_corrupt_stored_token_is_unauthenticated() {
        let session = Session::open(Arc::new(MemoryTokenStore::with_token("bad\ttoken")));
        assert!(!session.is_authenticated());

        let session = Session::open(Arc::new(MemoryTokenStore::with_token("\n")));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_file_store_roundtrip_across_sessions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.token");

        let session = Session::open(FileTokenStore::boxed(&path));
        assert!(!session.is_authenticated());
        session.login("tok-123").unwrap();
        assert!(path.exists());

        let reopened = Session::open(FileTokenStore::boxed(&path));
        assert_eq!(reopened.token().as_deref(), Some("tok-123"));

        reopened.logout().unwrap();
        assert!(!path.exists());
        assert!(!Session::open(FileTokenStore::boxed(&path)).is_authenticated());
    }

    #[test]
    fn test_file_store_trims_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.token");
        std::fs::write(&path, "tok-456\n").unwrap();

        let session = Session::open(FileTokenStore::boxed(&path));
        assert_eq!(session.token().as_deref(), Some("tok-456"));
    }

    #[test]
    fn test_file_store_non_utf8_is_unauthenticated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.token");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let session = Session::open(FileTokenStore::boxed(&path));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_file_store_unreadable_path_is_unauthenticated() {
        let dir = tempdir().unwrap();
        // A directory cannot be read as a token file.
        let session = Session::open(FileTokenStore::boxed(dir.path()));
        assert!(!session.is_authenticated());
    }

    proptest! {
        #[test]
        fn login_logout_for_any_valid_token(token in "[A-Za-z0-9._-]{1,64}") {
            let session = Session::open(MemoryTokenStore::boxed());

            session.login(&token).unwrap();
            prop_assert!(session.is_authenticated());
            prop_assert_eq!(session.token(), Some(token.clone()));

            session.logout().unwrap();
            prop_assert!(!session.is_authenticated());
        }
    }
}
