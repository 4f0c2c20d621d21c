use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::event::{EventError, EventHandler, NetworkEvent};
use crate::message::Message;
use crate::session::{Session, User};

/// In-memory view of one replica context
///
/// Applies bus events with the standard mapping: a snapshot replaces the
/// session wholesale, a message appends, a kick naming this replica's own
/// user forces it out, and a teardown clears everything. The message list
/// lives only here; a fresh replica starts with empty history no matter
/// what the store still holds.
#[derive(Debug, Clone, Default)]
pub struct ReplicaState {
    session: Option<Session>,
    current_user: Option<User>,
    messages: Vec<Message>,
    kicked: bool,
    ended: bool,
}

impl ReplicaState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replica representing a specific admitted user
    pub fn for_user(user: User) -> Self {
        Self {
            current_user: Some(user),
            ..Self::default()
        }
    }

    /// Replica that already knows the session (e.g. read from the store
    /// at startup)
    pub fn resume(user: User, session: Session) -> Self {
        Self {
            session: Some(session),
            current_user: Some(user),
            ..Self::default()
        }
    }

    /// Applies one event to this view
    pub fn apply(&mut self, event: &NetworkEvent) {
        match event {
            NetworkEvent::SyncSession(session) => {
                debug!(
                    session_id = %session.id,
                    users = session.user_count(),
                    "Replica replacing session snapshot"
                );
                self.session = Some(session.clone());
            }
            NetworkEvent::NewMessage(message) => {
                self.messages.push(message.clone());
            }
            NetworkEvent::Kicked { user_id } => {
                let is_me = self
                    .current_user
                    .as_ref()
                    .is_some_and(|u| &u.id == user_id);
                if is_me {
                    info!(user_id = %user_id, "This replica's user was kicked");
                    self.kicked = true;
                    self.session = None;
                }
            }
            NetworkEvent::SessionEnded => {
                info!("Session ended, replica clearing state");
                self.ended = true;
                self.session = None;
            }
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether this replica's own user was removed by the host
    pub fn was_kicked(&self) -> bool {
        self.kicked
    }

    /// Whether the host tore the session down
    pub fn session_ended(&self) -> bool {
        self.ended
    }
}

/// Shares a `ReplicaState` between a bus subscription and its reader
///
/// The handler side mutates on delivery; the owning context snapshots
/// whenever it wants to render or assert.
#[derive(Clone)]
pub struct ReplicaHandle {
    state: Arc<Mutex<ReplicaState>>,
}

impl ReplicaHandle {
    pub fn new(state: ReplicaState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Clone of the current view
    pub fn snapshot(&self) -> ReplicaState {
        self.state.lock().expect("replica state lock").clone()
    }
}

#[async_trait]
impl EventHandler for ReplicaHandle {
    async fn handle(&self, event: &NetworkEvent) -> Result<(), EventError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| EventError::handler("replica state lock poisoned"))?;
        state.apply(event);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ReplicaHandle"
    }
}
