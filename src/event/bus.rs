use tokio::sync::broadcast;
use tracing::debug;

use super::events::NetworkEvent;

/// Publish/subscribe transport between replicas
///
/// Delivery is best-effort and at-most-once per currently subscribed
/// receiver: there is no queue for receivers that subscribe later, no
/// retry, and a missed delivery is never reported back to the publisher.
/// Successive publishes from one context are observed in publish order by
/// every receiver; publishes from different contexts carry no ordering
/// guarantee relative to each other.
///
/// The publisher observes its own events through the same subscription
/// path as everyone else, so there is no separate direct-write channel to
/// keep consistent.
pub trait EventBus: Send + Sync {
    fn publish(&self, event: NetworkEvent);
    fn subscribe(&self) -> broadcast::Receiver<NetworkEvent>;
}

/// In-process implementation over a tokio broadcast channel
///
/// Stands in for the real local broadcast transport in tests and the demo;
/// anything that can fan out `NetworkEvent`s with the same contract can
/// replace it without touching membership logic.
#[derive(Debug, Clone)]
pub struct InMemoryEventBus {
    sender: broadcast::Sender<NetworkEvent>,
}

impl InMemoryEventBus {
    /// Creates a bus whose subscribers may buffer up to `capacity` events
    /// before the oldest are dropped
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(100)
    }

    /// Number of currently subscribed receivers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl EventBus for InMemoryEventBus {
    fn publish(&self, event: NetworkEvent) {
        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(receivers = receiver_count, "Event published");
            }
            Err(broadcast::error::SendError(event)) => {
                // Fire-and-forget: nobody listening is not an error
                debug!(
                    event_type = event.event_type(),
                    "Event published with no receivers"
                );
            }
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<NetworkEvent> {
        self.sender.subscribe()
    }
}
