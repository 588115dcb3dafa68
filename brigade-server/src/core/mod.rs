//! Core module - server configuration, state and event routing
//!
//! # Structure
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared service references
//! - [`Server`] - HTTP server + dispatch pipeline
//! - [`event_router`] - event fan-out to the dispatch workers

pub mod config;
pub mod event_router;
pub mod server;
pub mod state;

pub use config::Config;
pub use event_router::{EventChannels, EventRouter};
pub use server::Server;
pub use state::ServerState;
