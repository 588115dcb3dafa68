//! Kitchen order model
//!
//! Orders enter this subsystem already confirmed by the (out-of-scope)
//! intake flow. The subsystem only advances status; cancellation is a
//! status, not a removal.

use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// CONFIRMED → PREPARING → READY → SERVED, with CANCELLED reachable from
/// CONFIRMED or PREPARING only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Confirmed,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

/// Per-item preparation status
///
/// PENDING → PREPARING → COMPLETED; `reset` is the only backward step
/// (PREPARING → PENDING).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Pending,
    Preparing,
    Completed,
}

/// Order priority level
///
/// Variant order defines the queue ordering (Urgent sorts first).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl OrderPriority {
    /// Parse a priority level from its wire name (case-insensitive).
    ///
    /// Returns `None` for values outside the enumerated set; callers map
    /// that to an `InvalidPriority` error.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "NORMAL" => Some(Self::Normal),
            "HIGH" => Some(Self::High),
            "URGENT" => Some(Self::Urgent),
            _ => None,
        }
    }

    /// Wire name of this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl std::fmt::Display for OrderPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Service kind marker (table vs. counter vs. delivery context)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceKind {
    #[default]
    DineIn,
    Takeaway,
    Delivery,
}

/// Menu item snapshot carried on an order item
///
/// Snapshotted at intake so later menu edits never change in-flight
/// kitchen work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItemRef {
    /// Display name
    pub name: String,
    /// Menu category (drives station routing)
    pub category: String,
    /// Preparation minutes per unit
    pub prep_minutes: i64,
}

/// A single line item of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Item instance ID (unique within the order)
    pub item_id: String,
    /// Menu item snapshot
    pub menu_item: MenuItemRef,
    /// Quantity
    pub quantity: i32,
    /// Free-text note for the station
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Preparation status
    #[serde(default)]
    pub status: ItemStatus,
    /// When the item entered PREPARING (Unix millis)
    ///
    /// Together with `extended_ms` this is the complete persisted timer
    /// state; progress and overdue are always recomputed from it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    /// Manual grace extensions applied to the timer (millis)
    #[serde(default)]
    pub extended_ms: i64,
    /// When the item was completed (Unix millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl OrderItem {
    /// Create a pending item with a generated instance ID
    pub fn new(menu_item: MenuItemRef, quantity: i32) -> Self {
        Self {
            item_id: crate::util::snowflake_id().to_string(),
            menu_item,
            quantity,
            note: None,
            status: ItemStatus::Pending,
            started_at: None,
            extended_ms: 0,
            completed_at: None,
        }
    }

    /// Attach a station note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Total estimated preparation time for this line (millis)
    pub fn prep_duration_ms(&self) -> i64 {
        self.menu_item.prep_minutes * self.quantity as i64 * 60_000
    }
}

/// A kitchen order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Order ID (assigned by intake)
    pub order_id: String,
    /// Human-facing order number (receipt style)
    pub order_number: String,
    /// Customer name, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Table name for dine-in orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Service kind
    #[serde(default)]
    pub service: ServiceKind,
    /// Order status
    pub status: OrderStatus,
    /// Priority level
    #[serde(default)]
    pub priority: OrderPriority,
    /// Line items
    pub items: Vec<OrderItem>,
    /// Creation timestamp (Unix millis), the queue tiebreaker
    pub created_at: i64,
    /// Last update timestamp (Unix millis)
    pub updated_at: i64,
}

impl Order {
    /// Create a confirmed order as handed over by intake
    pub fn confirmed(order_number: impl Into<String>, items: Vec<OrderItem>) -> Self {
        let now = crate::util::now_millis();
        Self {
            order_id: crate::util::snowflake_id().to_string(),
            order_number: order_number.into(),
            customer_name: None,
            table_name: None,
            service: ServiceKind::default(),
            status: OrderStatus::Confirmed,
            priority: OrderPriority::Normal,
            items,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the order is in a terminal state
    pub fn is_closed(&self) -> bool {
        matches!(self.status, OrderStatus::Served | OrderStatus::Cancelled)
    }

    /// Check if the order belongs to the active work set
    pub fn is_active(&self) -> bool {
        !self.is_closed()
    }

    /// All items completed (false for an empty order; a zero-item order
    /// never becomes ready on its own)
    pub fn all_items_completed(&self) -> bool {
        !self.items.is_empty()
            && self
                .items
                .iter()
                .all(|i| i.status == ItemStatus::Completed)
    }

    /// Find an item by instance ID
    pub fn find_item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    /// Find an item by instance ID (mutable)
    pub fn find_item_mut(&mut self, item_id: &str) -> Option<&mut OrderItem> {
        self.items.iter_mut().find(|i| i.item_id == item_id)
    }

    /// Touch the update timestamp
    pub fn touch(&mut self, now: i64) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str, prep: i64, qty: i32) -> OrderItem {
        OrderItem::new(
            MenuItemRef {
                name: name.to_string(),
                category: category.to_string(),
                prep_minutes: prep,
            },
            qty,
        )
    }

    #[test]
    fn test_priority_ordering() {
        assert!(OrderPriority::Urgent > OrderPriority::High);
        assert!(OrderPriority::High > OrderPriority::Normal);
        assert!(OrderPriority::Normal > OrderPriority::Low);
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(OrderPriority::parse("URGENT"), Some(OrderPriority::Urgent));
        assert_eq!(OrderPriority::parse("normal"), Some(OrderPriority::Normal));
        assert_eq!(OrderPriority::parse("ASAP"), None);
        assert_eq!(OrderPriority::parse(""), None);
    }

    #[test]
    fn test_prep_duration_scales_with_quantity() {
        let kebab = item("Kebab", "kebab", 15, 2);
        assert_eq!(kebab.prep_duration_ms(), 30 * 60_000);
    }

    #[test]
    fn test_all_items_completed_empty_order() {
        let order = Order::confirmed("FAC20260801", vec![]);
        assert!(!order.all_items_completed());
    }

    #[test]
    fn test_all_items_completed() {
        let mut order = Order::confirmed(
            "FAC20260802",
            vec![item("Kebab", "kebab", 15, 1), item("Salad", "salad", 5, 1)],
        );
        assert!(!order.all_items_completed());
        for i in order.items.iter_mut() {
            i.status = ItemStatus::Completed;
        }
        assert!(order.all_items_completed());
    }
}
