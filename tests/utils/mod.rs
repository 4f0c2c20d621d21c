use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

use fynal_sync::{
    BusSubscription, EventBus, InMemoryEventBus, InMemorySessionStore, ReplicaHandle,
    ReplicaState, Session, SessionService, User,
};

/// One simulated device: its own store copy and a membership service over
/// the shared bus
pub struct TestDevice {
    pub store: Arc<InMemorySessionStore>,
    pub service: SessionService,
}

/// Shared-bus test fixture
pub struct TestSetup {
    pub bus: Arc<InMemoryEventBus>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self {
            bus: Arc::new(InMemoryEventBus::with_default_capacity()),
        }
    }

    /// A device that has never seen any session
    pub fn device(&self) -> TestDevice {
        let store = Arc::new(InMemorySessionStore::new());
        let service = SessionService::new(store.clone(), self.bus.clone());
        TestDevice { store, service }
    }

    /// Another context on an existing device: same store, own service.
    /// Mirrors a second tab sharing one device's durable records
    pub fn service_on(&self, store: Arc<InMemorySessionStore>) -> SessionService {
        SessionService::new(store, self.bus.clone())
    }

    /// A device whose store already holds a copy of `session`, as if it
    /// had previously learned of it
    pub fn device_knowing(&self, session: &Session) -> TestDevice {
        let store = Arc::new(InMemorySessionStore::with_session(session.clone()));
        let service = SessionService::new(store.clone(), self.bus.clone());
        TestDevice { store, service }
    }

    /// Spawns a replica context for `user`, subscribed to the bus
    pub fn spawn_replica(&self, user: User) -> (ReplicaHandle, JoinHandle<()>) {
        let handle = ReplicaHandle::new(ReplicaState::for_user(user));
        let bus: Arc<dyn EventBus> = self.bus.clone();
        let task = BusSubscription::new(Arc::new(handle.clone()), bus).start();
        (handle, task)
    }
}

/// Lets subscription tasks drain the bus before asserting
pub async fn settle() {
    sleep(Duration::from_millis(50)).await;
}
