// Event-driven replication components
//
// The bus is the sole channel between replicas: membership changes travel
// as full-state snapshots, messages as fire-and-forget payloads.

// Public API - what other modules can use
pub use bus::{EventBus, InMemoryEventBus};
pub use events::NetworkEvent;
pub use handler::{EventError, EventHandler, NoOpEventHandler};
pub use subscription::BusSubscription;

// Internal modules
mod bus;
mod events;
mod handler;
mod subscription;
