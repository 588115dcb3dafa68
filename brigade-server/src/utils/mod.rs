//! Utility module - logging and shared error re-exports
//!
//! The unified error and response types live in the `shared` crate; this
//! module re-exports them for handler code and owns logger setup.

pub mod logger;

pub use shared::error::{ApiError, ApiResult};
pub use shared::response::{ApiResponse, Empty};
