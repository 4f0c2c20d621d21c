use std::sync::Arc;

use tokio::time::{sleep, Duration};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fynal_sync::{
    BusSubscription, CreateSessionRequest, EventBus, InMemoryEventBus, JoinSessionRequest,
    JsonFileSessionStore, Message, MessageRelay, ReplicaHandle, ReplicaState, SessionConfig,
    SessionService, SessionStore, SyncError,
};

/// Walks one full session lifecycle across two replica contexts sharing
/// this device's store and bus: create, admit, reject at capacity, kick,
/// re-admit, chat, tear down.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), SyncError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fynal_sync=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting fynal-sync demo");

    // One durable store per device; swap for InMemorySessionStore to start
    // from a device that has never seen a session
    let store_dir = std::env::temp_dir().join("fynal-sync-demo");
    let store: Arc<dyn SessionStore> = Arc::new(JsonFileSessionStore::new(&store_dir));
    store.clear_session().await?;
    store.clear_current_user().await?;

    let bus: Arc<dyn EventBus> = Arc::new(InMemoryEventBus::with_default_capacity());
    let service = SessionService::new(store.clone(), bus.clone());
    let relay = MessageRelay::new(bus.clone());

    // Host creates a two-seat room
    let request = CreateSessionRequest {
        host_name: "alice".to_string(),
        config: SessionConfig::open(2),
    };
    request.validate()?;
    let session = service
        .create_session(&request.host_name, request.config)
        .await?;
    let host = service.current_user().await?.expect("host identity saved");
    info!(code = %session.id, "Session created");

    // Host's replica context comes online
    let host_replica = ReplicaHandle::new(ReplicaState::resume(host.clone(), session.clone()));
    let host_task = BusSubscription::new(Arc::new(host_replica.clone()), bus.clone()).start();

    // Guest A joins and gets a replica context of their own
    let join = JoinSessionRequest {
        code: session.id.clone(),
        name: "bob".to_string(),
        pin: None,
    };
    join.validate()?;
    let (_, guest_a) = service
        .join_session(&join.code, &join.name, join.pin.as_deref())
        .await?;
    let guest_a_replica = ReplicaHandle::new(ReplicaState::for_user(guest_a.clone()));
    let guest_a_task =
        BusSubscription::new(Arc::new(guest_a_replica.clone()), bus.clone()).start();
    sleep(Duration::from_millis(20)).await;

    // Guest B bounces off the full room
    match service.join_session(&session.id, "carol", None).await {
        Err(SyncError::SessionFull) => info!("carol rejected: session full"),
        other => info!(result = ?other.map(|(s, _)| s.user_count()), "unexpected admission result"),
    }

    // Chat flows through the relay, never through the store
    relay.send(Message::text(
        &guest_a,
        fynal_sync::expand_command("/mydevice", &guest_a),
    ));
    sleep(Duration::from_millis(20)).await;

    // Host kicks guest A; A's replica notices it was the target
    service.kick_user(&guest_a.id).await?;
    sleep(Duration::from_millis(20)).await;
    info!(
        kicked = guest_a_replica.snapshot().was_kicked(),
        "Guest A replica state after kick"
    );

    // Now carol fits
    let (session, carol) = service.join_session(&session.id, "carol", None).await?;
    relay.send(Message::system(format!("{} joined the session", carol.name)));
    sleep(Duration::from_millis(20)).await;
    info!(users = session.user_count(), "carol admitted on retry");

    // Teardown deletes the record for good
    service.end_session().await?;
    sleep(Duration::from_millis(20)).await;
    info!(
        host_sees_ended = host_replica.snapshot().session_ended(),
        "Session ended"
    );

    host_task.abort();
    guest_a_task.abort();
    Ok(())
}
