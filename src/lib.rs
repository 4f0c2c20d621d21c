// Library crate for the fynal-sync session protocol
// This file exposes the public API for integration tests

pub mod event;
pub mod message;
pub mod replica;
pub mod session;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use event::{BusSubscription, EventBus, EventHandler, InMemoryEventBus, NetworkEvent};
pub use message::{expand_command, FileAttachment, Message, MessageKind, MessageRelay};
pub use replica::{ReplicaHandle, ReplicaState};
pub use session::{
    CreateSessionRequest, InMemorySessionStore, JoinSessionRequest, JsonFileSessionStore, Session,
    SessionConfig, SessionService, SessionStore, User, UserRole,
};
pub use shared::SyncError;
