use async_trait::async_trait;
use thiserror::Error;

use super::events::NetworkEvent;

/// Errors that can occur when handling events
///
/// Handler failures are logged by the subscription loop and dropped; the
/// bus contract is fire-and-forget, so there is no retry path to feed.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("handler failed: {0}")]
    Handler(String),
}

impl EventError {
    pub fn handler(msg: impl Into<String>) -> Self {
        EventError::Handler(msg.into())
    }
}

/// Trait for components that react to bus events
///
/// Handlers are the reactive side of a replica: the membership service
/// publishes, handlers apply. Handling the same event twice should be
/// safe; snapshot replacement makes most of them naturally idempotent.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handle a single event
    async fn handle(&self, event: &NetworkEvent) -> Result<(), EventError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// A no-op event handler for testing
pub struct NoOpEventHandler;

#[async_trait]
impl EventHandler for NoOpEventHandler {
    async fn handle(&self, _event: &NetworkEvent) -> Result<(), EventError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "NoOpEventHandler"
    }
}
