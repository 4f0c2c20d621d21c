// Public API - what other modules can use
pub use generators::{NumericRoomCodeGenerator, RoomCodeGenerator};
pub use models::{Session, SessionConfig, User, UserRole};
pub use service::SessionService;
pub use store::{InMemorySessionStore, JsonFileSessionStore, SessionStore};
pub use types::{validate_display_name, CreateSessionRequest, JoinSessionRequest};

// Internal modules
mod generators;
mod models;
mod service;
mod store;
mod types;
