//! Kitchen error taxonomy
//!
//! State-machine and queue violations are always surfaced to the caller;
//! downstream (printer/notifier) failures are reported as soft outcomes
//! on the print/notify call only and never unwind a transition.

use shared::error::ApiError;
use thiserror::Error;

/// Kitchen orchestration errors
#[derive(Debug, Error)]
pub enum KitchenError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Order closed: {0}")]
    OrderClosed(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

pub type KitchenResult<T> = Result<T, KitchenError>;

impl From<KitchenError> for ApiError {
    fn from(err: KitchenError) -> Self {
        match err {
            KitchenError::OrderNotFound(id) => ApiError::not_found(format!("Order {}", id)),
            KitchenError::ItemNotFound(id) => ApiError::not_found(format!("Item {}", id)),
            KitchenError::InvalidTransition(msg) => ApiError::invalid_transition(msg),
            KitchenError::OrderClosed(id) => ApiError::order_closed(id),
            KitchenError::InvalidPriority(value) => ApiError::invalid_priority(value),
            KitchenError::Repository(msg) => {
                tracing::error!(error = %msg, "Repository error surfaced to API");
                ApiError::internal(msg)
            }
        }
    }
}
