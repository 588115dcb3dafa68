//! Ready-notification dispatch
//!
//! Builds ready-for-pickup notifications from ORDER_READY events and
//! hands them to a fire-and-forget gateway. Event-driven by design: the
//! Ready transition happens exactly once per order, so the notification
//! fires exactly once no matter how often clients re-read status.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::kitchen::{EventPayload, KitchenEvent, KitchenEventType};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Ready-for-pickup notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub order_id: String,
    pub order_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub message: String,
    /// When the notification was produced (Unix millis)
    pub created_at: i64,
}

/// Delivery boundary for notifications
///
/// Fire-and-forget: implementations own delivery failures (log, queue,
/// drop) - the kitchen core never blocks on them.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn deliver(&self, notification: Notification);
}

/// Default gateway: structured log output
///
/// Stands in until a real channel (SMS, display pager, POS popup) is
/// wired up; the worker does not care which.
#[derive(Debug, Default)]
pub struct LogNotificationGateway;

#[async_trait]
impl NotificationGateway for LogNotificationGateway {
    async fn deliver(&self, notification: Notification) {
        tracing::info!(
            order_id = %notification.order_id,
            order_number = %notification.order_number,
            table = notification.table_name.as_deref().unwrap_or("-"),
            "READY: {}",
            notification.message
        );
    }
}

/// Ready-notification worker
///
/// Consumes the router's ready channel and delivers one notification per
/// ORDER_READY event.
pub struct NotifyWorker {
    gateway: Arc<dyn NotificationGateway>,
}

impl NotifyWorker {
    pub fn new(gateway: Arc<dyn NotificationGateway>) -> Self {
        Self { gateway }
    }

    /// Run the worker (blocks until the channel closes or shutdown)
    pub async fn run(self, mut ready_rx: mpsc::Receiver<Arc<KitchenEvent>>, shutdown: CancellationToken) {
        tracing::info!("Notify worker started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Notify worker received shutdown signal");
                    break;
                }
                event = ready_rx.recv() => {
                    let Some(event) = event else {
                        tracing::info!("Ready channel closed, notify worker stopping");
                        break;
                    };
                    if let Some(notification) = build_notification(&event) {
                        self.gateway.deliver(notification).await;
                    }
                }
            }
        }
    }
}

/// Build the notification for an ORDER_READY event
fn build_notification(event: &KitchenEvent) -> Option<Notification> {
    if event.event_type != KitchenEventType::OrderReady {
        return None;
    }
    let EventPayload::OrderReady {
        order_number,
        table_name,
        customer_name,
    } = &event.payload
    else {
        return None;
    };

    let message = match (table_name, customer_name) {
        (Some(table), _) => format!("Order {} for table {} is ready", order_number, table),
        (None, Some(customer)) => format!("Order {} for {} is ready", order_number, customer),
        (None, None) => format!("Order {} is ready for pickup", order_number),
    };

    Some(Notification {
        order_id: event.order_id.clone(),
        order_number: order_number.clone(),
        table_name: table_name.clone(),
        customer_name: customer_name.clone(),
        message,
        created_at: event.timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_event(table: Option<&str>, customer: Option<&str>) -> KitchenEvent {
        KitchenEvent::new(
            "order-1",
            KitchenEventType::OrderReady,
            EventPayload::OrderReady {
                order_number: "FAC1".to_string(),
                table_name: table.map(str::to_string),
                customer_name: customer.map(str::to_string),
            },
        )
    }

    #[test]
    fn test_notification_addresses_table_context() {
        let n = build_notification(&ready_event(Some("12"), None)).unwrap();
        assert_eq!(n.message, "Order FAC1 for table 12 is ready");

        let n = build_notification(&ready_event(None, Some("Sara"))).unwrap();
        assert_eq!(n.message, "Order FAC1 for Sara is ready");

        let n = build_notification(&ready_event(None, None)).unwrap();
        assert_eq!(n.message, "Order FAC1 is ready for pickup");
    }

    #[test]
    fn test_other_events_produce_no_notification() {
        let event = KitchenEvent::new(
            "order-1",
            KitchenEventType::OrderServed,
            EventPayload::OrderServed {},
        );
        assert!(build_notification(&event).is_none());
    }

    #[tokio::test]
    async fn test_worker_delivers_through_gateway() {
        use parking_lot::Mutex;

        #[derive(Default)]
        struct RecordingGateway {
            delivered: Mutex<Vec<Notification>>,
        }

        #[async_trait]
        impl NotificationGateway for RecordingGateway {
            async fn deliver(&self, notification: Notification) {
                self.delivered.lock().push(notification);
            }
        }

        let gateway = Arc::new(RecordingGateway::default());
        let worker = NotifyWorker::new(gateway.clone());
        let (tx, rx) = mpsc::channel(4);
        let shutdown = CancellationToken::new();

        let handle = tokio::spawn(worker.run(rx, shutdown.clone()));
        tx.send(Arc::new(ready_event(Some("7"), None))).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        let delivered = gateway.delivered.lock();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].order_number, "FAC1");
    }
}
