// Public API - what other modules can use
pub use commands::expand_command;
pub use models::{FileAttachment, Message, MessageKind};
pub use relay::MessageRelay;

// Internal modules
mod commands;
mod models;
mod relay;
