use std::sync::Arc;
use tracing::{debug, instrument};

use super::models::Message;
use crate::event::{EventBus, NetworkEvent};

/// Relays chat and file messages through the bus
///
/// The message arrives here fully stamped (id, timestamp, sender snapshot,
/// expanded commands); the relay only publishes. No acknowledgement, no
/// delivery confirmation, no retry for subscribers that missed it, and
/// nothing is written to the store: the session record never sees chat.
pub struct MessageRelay {
    bus: Arc<dyn EventBus>,
}

impl MessageRelay {
    pub fn new(bus: Arc<dyn EventBus>) -> Self {
        Self { bus }
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    pub fn send(&self, message: Message) {
        debug!(
            sender_id = %message.sender_id,
            kind = ?message.kind,
            has_file = message.file.is_some(),
            "Relaying message"
        );
        self.bus.publish(NetworkEvent::NewMessage(message));
    }
}
