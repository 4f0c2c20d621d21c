use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::bus::EventBus;
use super::handler::EventHandler;

/// Routes bus events to a handler on a background task
///
/// One subscription per replica context: the task drains the receiver and
/// hands each event to the handler. Handler failures are logged and
/// dropped, and a lagging receiver skips the overwritten events rather
/// than stopping; missed deliveries are within the bus contract and the
/// next full snapshot repairs the replica.
pub struct BusSubscription {
    handler: Arc<dyn EventHandler>,
    bus: Arc<dyn EventBus>,
}

impl BusSubscription {
    pub fn new(handler: Arc<dyn EventHandler>, bus: Arc<dyn EventBus>) -> Self {
        Self { handler, bus }
    }

    /// Start the subscription task
    ///
    /// Returns the task handle; aborting it is the unsubscribe. Events
    /// published before this call are never delivered.
    pub fn start(self) -> JoinHandle<()> {
        let handler = self.handler;
        let handler_name = handler.name();
        let mut receiver = self.bus.subscribe();

        info!(handler = handler_name, "Starting bus subscription");

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        debug!(
                            handler = handler_name,
                            event_type = event.event_type(),
                            "Received bus event"
                        );

                        if let Err(e) = handler.handle(&event).await {
                            warn!(
                                handler = handler_name,
                                event_type = event.event_type(),
                                error = %e,
                                "Event handler failed"
                            );
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            handler = handler_name,
                            skipped = skipped,
                            "Subscription lagged, events dropped"
                        );
                    }
                    Err(RecvError::Closed) => {
                        info!(handler = handler_name, "Bus closed, subscription ending");
                        break;
                    }
                }
            }
        })
    }
}
