use std::sync::Arc;

use crate::core::Config;
use crate::dispatch::{LogNotificationGateway, NotificationGateway, PrintDispatcher};
use crate::kitchen::{KitchenService, MemoryOrderRepository, OrderRepository};

/// Server state - shared references to every service
///
/// Cloning is shallow (Arc); handlers and workers all see the same
/// instances.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Settings (immutable) |
/// | kitchen | Arc<KitchenService> | Orchestrator over the order repository |
/// | print | Arc<PrintDispatcher> | Station printer registry + renderer |
/// | notify_gateway | Arc<dyn NotificationGateway> | Ready-notification delivery |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Kitchen orchestrator
    pub kitchen: Arc<KitchenService>,
    /// Print dispatcher
    pub print: Arc<PrintDispatcher>,
    /// Notification gateway
    pub notify_gateway: Arc<dyn NotificationGateway>,
}

impl ServerState {
    /// Build the default state: in-memory repository, network printers
    /// from config, log-backed notification gateway.
    pub fn initialize(config: &Config) -> Self {
        let repo: Arc<dyn OrderRepository> = Arc::new(MemoryOrderRepository::new());
        Self::with_repository(config, repo)
    }

    /// Build state over a caller-supplied repository (tests inject an
    /// in-memory fake here without touching process-wide state).
    pub fn with_repository(config: &Config, repo: Arc<dyn OrderRepository>) -> Self {
        let kitchen = Arc::new(KitchenService::new(repo));
        let print = Arc::new(PrintDispatcher::from_config(config));
        let notify_gateway: Arc<dyn NotificationGateway> = Arc::new(LogNotificationGateway);

        Self {
            config: config.clone(),
            kitchen,
            print,
            notify_gateway,
        }
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("kitchen", &self.kitchen)
            .field("print", &self.print)
            .finish()
    }
}
