use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::generators::{device_descriptor, mock_ip, NumericRoomCodeGenerator, RoomCodeGenerator};
use super::models::{Session, SessionConfig, User, UserRole};
use super::store::SessionStore;
use crate::event::{EventBus, NetworkEvent};
use crate::shared::SyncError;

/// Owns the session lifecycle: create, admission, departure, teardown
///
/// One instance per replica context, built from an injected store and bus
/// so tests can wire isolated instances. Every mutation follows the same
/// flow: read the stored snapshot, apply the change, persist, republish
/// the full snapshot. Subscribers overwrite their copy unconditionally, so
/// the most recently applied snapshot silently wins over any earlier one.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    bus: Arc<dyn EventBus>,
    code_generator: Arc<dyn RoomCodeGenerator>,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, bus: Arc<dyn EventBus>) -> Self {
        Self {
            store,
            bus,
            code_generator: Arc::new(NumericRoomCodeGenerator::new()),
        }
    }

    /// Replaces the room code generator (deterministic codes in tests)
    pub fn with_code_generator(mut self, generator: Arc<dyn RoomCodeGenerator>) -> Self {
        self.code_generator = generator;
        self
    }

    /// Creates a new session with the caller as host
    ///
    /// The display name is expected to have passed boundary validation
    /// already; it is not re-checked here. No event is published: a fresh
    /// session has no other subscribers yet, so the creator's commit is
    /// the sole source of truth until the first join.
    #[instrument(skip(self, config))]
    pub async fn create_session(
        &self,
        host_name: &str,
        config: SessionConfig,
    ) -> Result<Session, SyncError> {
        let code = self.code_generator.generate();
        let host = self.build_user(host_name, UserRole::Host);

        info!(
            session_id = %code,
            host_id = %host.id,
            max_users = config.max_users,
            pin_gated = config.enable_2fa,
            "Creating session"
        );

        let session = Session::new(code, host.clone(), config);
        self.store.save_session(&session).await?;
        self.store.save_current_user(&host).await?;

        Ok(session)
    }

    /// Attempts admission to the locally known session
    ///
    /// Admission checks run in a fixed order against the snapshot read at
    /// the start of the call: code and activity, then PIN, then capacity.
    /// Two concurrent joins that both read a session one seat below
    /// capacity will both locally succeed and each publish their own
    /// membership list; the second snapshot overwrites the first.
    #[instrument(skip(self, pin))]
    pub async fn join_session(
        &self,
        code: &str,
        name: &str,
        pin: Option<&str>,
    ) -> Result<(Session, User), SyncError> {
        let session = self.store.load_session().await?;

        let mut session = match session {
            Some(s) if s.id == code && s.is_active => s,
            _ => {
                warn!(code = %code, "Join rejected: no matching active session");
                return Err(SyncError::NotFound);
            }
        };

        if session.config.enable_2fa && session.config.pin.as_deref() != pin {
            warn!(session_id = %session.id, "Join rejected: PIN mismatch");
            return Err(SyncError::InvalidPin);
        }

        if session.is_full() {
            warn!(
                session_id = %session.id,
                users = session.user_count(),
                max_users = session.config.max_users,
                "Join rejected: session full"
            );
            return Err(SyncError::SessionFull);
        }

        let user = self.build_user(name, UserRole::Guest);
        session.add_user(user.clone());

        self.store.save_session(&session).await?;
        self.store.save_current_user(&user).await?;
        self.bus.publish(NetworkEvent::SyncSession(session.clone()));

        info!(
            session_id = %session.id,
            user_id = %user.id,
            users = session.user_count(),
            "User joined session"
        );

        Ok((session, user))
    }

    /// Removes a user from the session
    ///
    /// Idempotent: removing an absent id leaves membership unchanged but
    /// still republishes the snapshot. A departing host is not replaced;
    /// `host_id` dangles until the session is ended.
    #[instrument(skip(self))]
    pub async fn leave_session(&self, user_id: &str) -> Result<(), SyncError> {
        let Some(mut session) = self.store.load_session().await? else {
            debug!(user_id = %user_id, "Leave with no stored session, nothing to do");
            return Ok(());
        };

        session.remove_user(user_id);
        self.store.save_session(&session).await?;
        self.bus.publish(NetworkEvent::SyncSession(session.clone()));

        info!(
            session_id = %session.id,
            user_id = %user_id,
            users = session.user_count(),
            "User left session"
        );

        Ok(())
    }

    /// Removes a user at the host's request
    ///
    /// The caller boundary is responsible for ensuring only the host
    /// invokes this; the protocol layer does not check. Publishes the
    /// updated snapshot first, then a targeted `Kicked` event so the
    /// removed client can react even though its view already reflects
    /// the membership change.
    #[instrument(skip(self))]
    pub async fn kick_user(&self, user_id: &str) -> Result<(), SyncError> {
        let Some(mut session) = self.store.load_session().await? else {
            debug!(user_id = %user_id, "Kick with no stored session, nothing to do");
            return Ok(());
        };

        session.remove_user(user_id);
        self.store.save_session(&session).await?;
        self.bus.publish(NetworkEvent::SyncSession(session.clone()));
        self.bus.publish(NetworkEvent::Kicked {
            user_id: user_id.to_string(),
        });

        info!(
            session_id = %session.id,
            user_id = %user_id,
            users = session.user_count(),
            "User kicked from session"
        );

        Ok(())
    }

    /// Tears the session down
    ///
    /// The persisted record is deleted outright rather than marked
    /// inactive; session history is unrecoverable once ended. Host-only by
    /// convention of the caller boundary, like `kick_user`.
    #[instrument(skip(self))]
    pub async fn end_session(&self) -> Result<(), SyncError> {
        self.bus.publish(NetworkEvent::SessionEnded);
        self.store.clear_session().await?;

        info!("Session ended and record deleted");
        Ok(())
    }

    /// The session this device currently knows of, if any
    pub async fn current_session(&self) -> Result<Option<Session>, SyncError> {
        self.store.load_session().await
    }

    /// This device's own identity record, if any
    pub async fn current_user(&self) -> Result<Option<User>, SyncError> {
        self.store.load_current_user().await
    }

    fn build_user(&self, name: &str, role: UserRole) -> User {
        User::new(name, role, device_descriptor(), mock_ip())
    }
}
