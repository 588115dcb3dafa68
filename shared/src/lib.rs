//! Shared types for the Brigade kitchen framework
//!
//! Common types used across the server and clients: the kitchen order
//! model, transition events, error types, response structures, and small
//! time/ID utilities.

pub mod error;
pub mod kitchen;
pub mod response;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

// Kitchen re-exports (for convenient access)
pub use kitchen::{KitchenEvent, KitchenEventType, Order, OrderItem};
