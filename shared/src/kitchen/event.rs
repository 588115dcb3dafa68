//! Kitchen transition events - immutable facts emitted by the state machine
//!
//! Side effects (ready notifications, auto-printing) subscribe to these
//! events instead of being called from transition code, so the core stays
//! testable without a printer or notifier present.

use super::order::OrderPriority;
use serde::{Deserialize, Serialize};

/// Kitchen transition event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenEvent {
    /// Event unique ID
    pub event_id: String,
    /// Order this event belongs to
    pub order_id: String,
    /// Server timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Event type
    pub event_type: KitchenEventType,
    /// Event payload
    pub payload: EventPayload,
}

/// Event type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KitchenEventType {
    // Order lifecycle
    OrderConfirmed,
    OrderPreparing,
    OrderReady,
    OrderServed,
    OrderCancelled,

    // Items
    ItemStarted,
    ItemCompleted,
    ItemReset,
    TimerExtended,

    // Queue
    PriorityChanged,
}

impl std::fmt::Display for KitchenEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KitchenEventType::OrderConfirmed => write!(f, "ORDER_CONFIRMED"),
            KitchenEventType::OrderPreparing => write!(f, "ORDER_PREPARING"),
            KitchenEventType::OrderReady => write!(f, "ORDER_READY"),
            KitchenEventType::OrderServed => write!(f, "ORDER_SERVED"),
            KitchenEventType::OrderCancelled => write!(f, "ORDER_CANCELLED"),
            KitchenEventType::ItemStarted => write!(f, "ITEM_STARTED"),
            KitchenEventType::ItemCompleted => write!(f, "ITEM_COMPLETED"),
            KitchenEventType::ItemReset => write!(f, "ITEM_RESET"),
            KitchenEventType::TimerExtended => write!(f, "TIMER_EXTENDED"),
            KitchenEventType::PriorityChanged => write!(f, "PRIORITY_CHANGED"),
        }
    }
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    // ========== Order Lifecycle ==========
    OrderConfirmed {
        order_number: String,
        item_count: usize,
    },

    OrderPreparing {},

    OrderReady {
        order_number: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        table_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        customer_name: Option<String>,
    },

    OrderServed {},

    OrderCancelled {},

    // ========== Items ==========
    ItemStarted {
        item_id: String,
        item_name: String,
        /// Estimated completion time (Unix millis)
        estimated_end: i64,
    },

    ItemCompleted {
        item_id: String,
        item_name: String,
        /// Whether this completion made the whole order ready
        order_ready: bool,
    },

    ItemReset {
        item_id: String,
        item_name: String,
    },

    TimerExtended {
        item_id: String,
        added_minutes: i64,
        /// New estimated completion time (Unix millis)
        estimated_end: i64,
    },

    // ========== Queue ==========
    PriorityChanged {
        previous: OrderPriority,
        current: OrderPriority,
    },
}

impl KitchenEvent {
    /// Create a new event with a server-assigned timestamp
    pub fn new(order_id: impl Into<String>, event_type: KitchenEventType, payload: EventPayload) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            order_id: order_id.into(),
            timestamp: crate::util::now_millis(),
            event_type,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let event = KitchenEvent::new(
            "order-1",
            KitchenEventType::OrderReady,
            EventPayload::OrderReady {
                order_number: "FAC1".to_string(),
                table_name: Some("T5".to_string()),
                customer_name: None,
            },
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"ORDER_READY\""));

        let back: KitchenEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event_type, KitchenEventType::OrderReady);
        assert_eq!(back.order_id, "order-1");
    }
}
