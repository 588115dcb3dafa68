//! Event Router - fan-out of kitchen transition events
//!
//! Decouples the KitchenService from the dispatch workers by giving each
//! worker its own channel.
//!
//! ```text
//! KitchenService (broadcast)
//!        │
//!        └── EventRouter
//!               ├── mpsc ──► NotifyWorker (ORDER_READY only) [must not drop]
//!               └── mpsc ──► PrintWorker (ORDER_CONFIRMED only) [best-effort]
//! ```
//!
//! ## Priority policy
//!
//! - **Ready**: a lost notification means a forgotten customer, so the
//!   router blocks until the channel accepts it
//! - **Print**: best-effort, dropped when full (the ticket can always be
//!   reprinted by hand)

use shared::kitchen::{KitchenEvent, KitchenEventType};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Channel set handed to the workers
pub struct EventChannels {
    /// Ready events (ORDER_READY only) - Arc wrapped to avoid clones
    pub ready_rx: mpsc::Receiver<Arc<KitchenEvent>>,
    /// Print events (ORDER_CONFIRMED only)
    pub print_rx: mpsc::Receiver<Arc<KitchenEvent>>,
}

/// Event router
///
/// Subscribes to the KitchenService broadcast and dispatches by type to
/// dedicated mpsc channels.
pub struct EventRouter {
    ready_tx: mpsc::Sender<Arc<KitchenEvent>>,
    print_tx: mpsc::Sender<Arc<KitchenEvent>>,
}

impl EventRouter {
    /// Create the router and its channels
    ///
    /// # Arguments
    /// - `ready_buffer`: ready channel buffer (notifications, keep large)
    /// - `print_buffer`: print channel buffer (best-effort)
    pub fn new(ready_buffer: usize, print_buffer: usize) -> (Self, EventChannels) {
        let (ready_tx, ready_rx) = mpsc::channel(ready_buffer);
        let (print_tx, print_rx) = mpsc::channel(print_buffer);

        let router = Self { ready_tx, print_tx };
        let channels = EventChannels { ready_rx, print_rx };

        (router, channels)
    }

    /// Run the router (blocks until the source channel closes)
    pub async fn run(self, mut source: broadcast::Receiver<KitchenEvent>) {
        tracing::info!("Event router started");

        loop {
            match source.recv().await {
                Ok(event) => {
                    self.dispatch(event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::error!(
                        skipped = n,
                        "Event router lagged! Events skipped - ready notifications may be lost"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Source channel closed, event router stopping");
                    break;
                }
            }
        }
    }

    /// Dispatch one event to the matching channel
    async fn dispatch(&self, event: KitchenEvent) {
        let event = Arc::new(event);

        // 1. Ready channel: blocking send, must not drop
        if event.event_type == KitchenEventType::OrderReady
            && self.ready_tx.send(Arc::clone(&event)).await.is_err()
        {
            tracing::error!("Ready channel closed - notification lost!");
        }

        // 2. Print channel: best-effort, drop when full
        if event.event_type == KitchenEventType::OrderConfirmed {
            match self.print_tx.try_send(Arc::clone(&event)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(
                        order_id = %event.order_id,
                        "Print channel full, auto-print dropped"
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::debug!("Print channel closed");
                }
            }
        }
    }
}
