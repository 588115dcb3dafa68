//! Kitchen Orchestration Module
//!
//! Turns a confirmed order into trackable kitchen work and drives it to
//! completion:
//!
//! - **station**: category → preparation station routing
//! - **ticket**: per-station ticket splitting (derived, never stored)
//! - **timer**: per-item countdown, overdue detection (derived, never stored)
//! - **queue**: priority ordering of the active work set
//! - **status**: the order/item state machine and its emitted events
//! - **repository**: storage boundary + in-memory implementation
//! - **service**: the composition root consumed by the API and workers
//!
//! # Data Flow
//!
//! ```text
//! confirmed order → KitchenService.admit
//!       │                 ↓ ORDER_CONFIRMED
//!       │           EventRouter → PrintWorker (station tickets)
//!       ↓
//! start/complete/reset per item (state machine)
//!       ↓ ORDER_READY
//! EventRouter → NotifyWorker (ready notification)
//! ```

pub mod error;
pub mod queue;
pub mod repository;
pub mod service;
pub mod station;
pub mod status;
pub mod ticket;
pub mod timer;

// Re-exports
pub use error::{KitchenError, KitchenResult};
pub use queue::StationWorkload;
pub use repository::{MemoryOrderRepository, OrderRepository};
pub use service::{ActiveOrder, ActiveTimer, KitchenService};
pub use station::Station;
pub use ticket::{Ticket, TicketItem, TicketKind};
pub use timer::{Timer, TimerReading, TimerState, TimerStats};
