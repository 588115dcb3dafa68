//! Notification & Print Dispatch Module
//!
//! Best-effort side effects, strictly downstream of the state machine:
//! - Ready notifications on the CONFIRMED/PREPARING → READY transition
//! - Station ticket printing on order admission and on explicit request
//!
//! A failure here is logged and reported; it never rolls back or blocks
//! the transition that triggered it.

pub mod notifier;
pub mod print;
pub mod renderer;

pub use notifier::{LogNotificationGateway, Notification, NotificationGateway, NotifyWorker};
pub use print::{PrintDispatcher, PrintOutcome, PrintWorker};
pub use renderer::TicketRenderer;
