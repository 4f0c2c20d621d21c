use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{Session, User};
use crate::shared::SyncError;

/// Fixed names of the two durable per-device records
const SESSION_RECORD: &str = "session.json";
const USER_RECORD: &str = "current_user.json";

/// Trait for the per-device session store
///
/// Holds at most one active session and the caller's own identity, both
/// read at process start to decide whether to resume a prior session.
/// Every replica context on a device shares this store; consistency across
/// devices is the bus's job, not the store's.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load_session(&self) -> Result<Option<Session>, SyncError>;
    async fn save_session(&self, session: &Session) -> Result<(), SyncError>;
    async fn clear_session(&self) -> Result<(), SyncError>;
    async fn load_current_user(&self) -> Result<Option<User>, SyncError>;
    async fn save_current_user(&self, user: &User) -> Result<(), SyncError>;
    async fn clear_current_user(&self) -> Result<(), SyncError>;
}

/// In-memory implementation of SessionStore for development and testing
///
/// Data is lost when the process exits, which also makes it a convenient
/// stand-in for a device that has never seen any session.
pub struct InMemorySessionStore {
    session: Mutex<Option<Session>>,
    current_user: Mutex<Option<User>>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
            current_user: Mutex::new(None),
        }
    }

    /// Creates a store pre-seeded with a session, as if this device had
    /// already learned of it
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
            current_user: Mutex::new(None),
        }
    }

    /// Checks if a session record is present (useful for debugging)
    pub fn has_session(&self) -> bool {
        self.session.lock().unwrap().is_some()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load_session(&self) -> Result<Option<Session>, SyncError> {
        Ok(self.session.lock().unwrap().clone())
    }

    #[instrument(skip(self, session))]
    async fn save_session(&self, session: &Session) -> Result<(), SyncError> {
        debug!(session_id = %session.id, users = session.user_count(), "Saving session in memory");
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_session(&self) -> Result<(), SyncError> {
        debug!("Clearing session record in memory");
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn load_current_user(&self) -> Result<Option<User>, SyncError> {
        Ok(self.current_user.lock().unwrap().clone())
    }

    #[instrument(skip(self, user))]
    async fn save_current_user(&self, user: &User) -> Result<(), SyncError> {
        debug!(user_id = %user.id, "Saving current user in memory");
        *self.current_user.lock().unwrap() = Some(user.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_current_user(&self) -> Result<(), SyncError> {
        *self.current_user.lock().unwrap() = None;
        Ok(())
    }
}

/// File-backed implementation of SessionStore
///
/// Persists the two records as JSON files under a directory, so a
/// restarted process can resume its session. Records are small and written
/// whole on every mutation.
pub struct JsonFileSessionStore {
    dir: PathBuf,
}

impl JsonFileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read_record<T: serde::de::DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<T>, SyncError> {
        let path = self.record_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .map_err(|e| SyncError::storage(format!("read {}: {}", name, e)))?;
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(record = name, error = %e, "Corrupt store record");
                Err(SyncError::storage(format!("parse {}: {}", name, e)))
            }
        }
    }

    fn write_record<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<(), SyncError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| SyncError::storage(format!("create store dir: {}", e)))?;
        let raw = serde_json::to_string(value)
            .map_err(|e| SyncError::storage(format!("serialize {}: {}", name, e)))?;
        fs::write(self.record_path(name), raw)
            .map_err(|e| SyncError::storage(format!("write {}: {}", name, e)))
    }

    fn remove_record(&self, name: &str) -> Result<(), SyncError> {
        let path = self.record_path(name);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| SyncError::storage(format!("remove {}: {}", name, e)))?;
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    #[instrument(skip(self))]
    async fn load_session(&self) -> Result<Option<Session>, SyncError> {
        let session: Option<Session> = self.read_record(SESSION_RECORD)?;
        match &session {
            Some(s) => debug!(session_id = %s.id, "Session record loaded from disk"),
            None => debug!("No session record on disk"),
        }
        Ok(session)
    }

    #[instrument(skip(self, session))]
    async fn save_session(&self, session: &Session) -> Result<(), SyncError> {
        debug!(session_id = %session.id, users = session.user_count(), "Writing session record");
        self.write_record(SESSION_RECORD, session)
    }

    #[instrument(skip(self))]
    async fn clear_session(&self) -> Result<(), SyncError> {
        debug!("Removing session record");
        self.remove_record(SESSION_RECORD)
    }

    #[instrument(skip(self))]
    async fn load_current_user(&self) -> Result<Option<User>, SyncError> {
        self.read_record(USER_RECORD)
    }

    #[instrument(skip(self, user))]
    async fn save_current_user(&self, user: &User) -> Result<(), SyncError> {
        debug!(user_id = %user.id, "Writing current user record");
        self.write_record(USER_RECORD, user)
    }

    #[instrument(skip(self))]
    async fn clear_current_user(&self) -> Result<(), SyncError> {
        self.remove_record(USER_RECORD)
    }
}
