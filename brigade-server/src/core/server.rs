//! Server Implementation
//!
//! HTTP server startup plus the event-dispatch pipeline (router and
//! workers). Side-effect workers run on their own channels so a slow or
//! offline printer can never back-pressure an order transition.

use crate::core::event_router::EventRouter;
use crate::core::{Config, ServerState};
use crate::dispatch::{NotifyWorker, PrintWorker};
use tokio_util::sync::CancellationToken;

/// Ready channel buffer - notifications must not drop
const READY_CHANNEL_BUFFER: usize = 1024;
/// Print channel buffer - best-effort
const PRINT_CHANNEL_BUFFER: usize = 256;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for sharing with tests)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Spawn the event router and dispatch workers
    ///
    /// Returns the token that shuts them down.
    pub fn start_dispatch_pipeline(state: &ServerState) -> CancellationToken {
        let shutdown = CancellationToken::new();

        let (router, channels) = EventRouter::new(READY_CHANNEL_BUFFER, PRINT_CHANNEL_BUFFER);
        let source = state.kitchen.subscribe();
        tokio::spawn(router.run(source));

        let notify = NotifyWorker::new(state.notify_gateway.clone());
        tokio::spawn(notify.run(channels.ready_rx, shutdown.clone()));

        let print = PrintWorker::new(state.kitchen.clone(), state.print.clone());
        tokio::spawn(print.run(channels.print_rx, shutdown.clone()));

        shutdown
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        // Create application state if not provided
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config),
        };

        let shutdown = Self::start_dispatch_pipeline(&state);

        let app = crate::api::router(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!(
            printers = state.print.printer_count(),
            "Brigade kitchen server starting on {}",
            addr
        );

        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
                shutdown.cancel();
            })
            .await?;

        Ok(())
    }
}
