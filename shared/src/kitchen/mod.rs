//! Kitchen order domain types
//!
//! The order model and transition events shared between the server and
//! polling clients (kitchen displays, front-of-house terminals).

pub mod event;
pub mod order;

pub use event::{EventPayload, KitchenEvent, KitchenEventType};
pub use order::{
    ItemStatus, MenuItemRef, Order, OrderItem, OrderPriority, OrderStatus, ServiceKind,
};
