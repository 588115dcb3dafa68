//! Brigade Server - kitchen order orchestration node
//!
//! # Architecture overview
//!
//! This crate turns confirmed orders into trackable kitchen work:
//!
//! - **Kitchen core** (`kitchen`): station routing, ticket splitting,
//!   timer math, priority queueing, and the status state machine
//! - **Dispatch** (`dispatch`): best-effort ready notifications and
//!   station ticket printing, driven by transition events
//! - **HTTP API** (`api`): the operations surface for displays and
//!   polling clients
//!
//! # Module structure
//!
//! ```text
//! brigade-server/src/
//! ├── core/          # config, state, server, event router
//! ├── kitchen/       # orchestration core (state machine, timers, queue)
//! ├── dispatch/      # notification + print workers
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, error re-exports
//! ```

pub mod api;
pub mod core;
pub mod dispatch;
pub mod kitchen;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use dispatch::{Notification, NotificationGateway, PrintDispatcher, PrintOutcome};
pub use kitchen::{
    KitchenError, KitchenResult, KitchenService, MemoryOrderRepository, OrderRepository, Station,
};

// Re-export unified error types from shared
pub use utils::{ApiError, ApiResponse, ApiResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____       _                  __
   / __ )_____(_)___ _____ _____/ /__
  / __  / ___/ / __ `/ __ `/ __  / _ \
 / /_/ / /  / / /_/ / /_/ / /_/ /  __/
/_____/_/  /_/\__, /\__,_/\__,_/\___/
             /____/
    "#
    );
}
