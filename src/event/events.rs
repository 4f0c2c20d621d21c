use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::session::Session;

/// Events that cross the bus between replicas
///
/// This is the only unit ever placed on the bus. Events are facts about
/// state changes that have already been committed by the publisher; no
/// event carries a logical clock or a reference to prior state, and every
/// `SyncSession` is a full replacement snapshot, never a diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkEvent {
    /// Full session snapshot; subscribers replace their local copy
    /// unconditionally (last writer wins)
    SyncSession(Session),

    /// A chat or file message; appended to in-memory lists, never stored
    NewMessage(Message),

    /// A specific user was removed by the host. Follows the `SyncSession`
    /// that already reflects the removal, so the targeted replica can tell
    /// "I was removed" apart from "someone else left"
    Kicked { user_id: String },

    /// The host tore the session down; the persisted record is gone
    SessionEnded,
}

impl NetworkEvent {
    /// Get a human-readable label for the event kind (for logging)
    pub fn event_type(&self) -> &'static str {
        match self {
            NetworkEvent::SyncSession(_) => "sync_session",
            NetworkEvent::NewMessage(_) => "new_message",
            NetworkEvent::Kicked { .. } => "kicked",
            NetworkEvent::SessionEnded => "session_ended",
        }
    }
}
