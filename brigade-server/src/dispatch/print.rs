//! Print dispatcher - best-effort station printing
//!
//! Holds the station → printer registry, renders tickets, and reports a
//! soft outcome per job. A failed print is never retried here and never
//! touches order state; retry policy belongs to the caller.

use super::renderer::TicketRenderer;
use crate::core::Config;
use crate::kitchen::{KitchenService, Station, Ticket, TicketKind};
use brigade_printer::{NetworkPrinter, Printer};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use shared::kitchen::{KitchenEvent, KitchenEventType};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Outcome of one print job - success or a reported soft failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Station printer the job was addressed to
    pub station: Station,
    /// When the outcome was produced (Unix millis)
    pub printed_at: i64,
}

/// Print dispatcher
///
/// Consolidated tickets go to the general station printer; station
/// tickets go to their own station, falling back to general when that
/// station has no printer configured.
pub struct PrintDispatcher {
    printers: DashMap<Station, NetworkPrinter>,
    renderer: TicketRenderer,
    /// Reprint counters per (order, ticket target), in-memory only
    print_counts: DashMap<(String, Station), u32>,
}

impl PrintDispatcher {
    /// Build the dispatcher from configured printer endpoints
    pub fn from_config(config: &Config) -> Self {
        let printers = DashMap::new();
        for (&station, addr) in &config.printers {
            match NetworkPrinter::from_addr(addr) {
                Ok(printer) => {
                    let printer =
                        printer.with_timeout(Duration::from_millis(config.printer_timeout_ms));
                    printers.insert(station, printer);
                }
                Err(e) => {
                    tracing::warn!(station = %station, addr = %addr, error = %e,
                        "Ignoring invalid printer address");
                }
            }
        }

        Self {
            printers,
            renderer: TicketRenderer::new(config.paper_width),
            print_counts: DashMap::new(),
        }
    }

    /// Register or replace a station printer
    pub fn register(&self, station: Station, printer: NetworkPrinter) {
        self.printers.insert(station, printer);
    }

    /// Number of configured printers
    pub fn printer_count(&self) -> usize {
        self.printers.len()
    }

    /// Resolve the target station printer for a ticket
    fn target_station(&self, ticket: &Ticket) -> Station {
        match ticket.kind {
            TicketKind::Consolidated => Station::General,
            TicketKind::Station { station } => {
                if self.printers.contains_key(&station) {
                    station
                } else {
                    Station::General
                }
            }
        }
    }

    /// Render and send one ticket. Always returns an outcome; printer
    /// unavailability is a reported soft failure, not an error.
    pub async fn print_ticket(&self, ticket: &Ticket) -> PrintOutcome {
        let station = self.target_station(ticket);
        let count_key = (ticket.order_id.clone(), station);
        let print_count = self
            .print_counts
            .get(&count_key)
            .map(|c| *c)
            .unwrap_or(0);

        let Some(printer) = self.printers.get(&station).map(|p| p.value().clone()) else {
            tracing::warn!(station = %station, order_id = %ticket.order_id,
                "No printer configured for station");
            return PrintOutcome {
                success: false,
                error: Some(format!("no printer configured for station {}", station)),
                station,
                printed_at: shared::util::now_millis(),
            };
        };

        let data = self.renderer.render(ticket, print_count);

        match printer.print(&data).await {
            Ok(()) => {
                *self.print_counts.entry(count_key).or_insert(0) += 1;
                tracing::info!(station = %station, order_id = %ticket.order_id,
                    bytes = data.len(), "Ticket printed");
                PrintOutcome {
                    success: true,
                    error: None,
                    station,
                    printed_at: shared::util::now_millis(),
                }
            }
            Err(e) => {
                tracing::warn!(station = %station, order_id = %ticket.order_id,
                    error = %e, "Print failed");
                PrintOutcome {
                    success: false,
                    error: Some(e.to_string()),
                    station,
                    printed_at: shared::util::now_millis(),
                }
            }
        }
    }

    /// Print a batch of tickets, collecting per-ticket outcomes
    pub async fn print_all(&self, tickets: &[Ticket]) -> Vec<PrintOutcome> {
        let mut outcomes = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            outcomes.push(self.print_ticket(ticket).await);
        }
        outcomes
    }
}

impl std::fmt::Debug for PrintDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintDispatcher")
            .field("printers", &self.printers.len())
            .finish()
    }
}

/// Kitchen print worker
///
/// Listens on the router's confirm channel and auto-prints the station
/// tickets (plus the consolidated ticket) of each admitted order.
/// Strictly best-effort: failures are logged and never reach the order.
pub struct PrintWorker {
    kitchen: Arc<KitchenService>,
    dispatcher: Arc<PrintDispatcher>,
}

impl PrintWorker {
    pub fn new(kitchen: Arc<KitchenService>, dispatcher: Arc<PrintDispatcher>) -> Self {
        Self {
            kitchen,
            dispatcher,
        }
    }

    /// Run the worker (blocks until the channel closes or shutdown)
    pub async fn run(self, mut event_rx: mpsc::Receiver<Arc<KitchenEvent>>, shutdown: CancellationToken) {
        tracing::info!("Print worker started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Print worker received shutdown signal");
                    break;
                }
                event = event_rx.recv() => {
                    let Some(event) = event else {
                        tracing::info!("Print channel closed, print worker stopping");
                        break;
                    };
                    if event.event_type == KitchenEventType::OrderConfirmed {
                        self.handle_order_confirmed(&event).await;
                    }
                }
            }
        }
    }

    async fn handle_order_confirmed(&self, event: &KitchenEvent) {
        let tickets = match self.kitchen.tickets(&event.order_id) {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(order_id = %event.order_id, error = %e,
                    "Failed to split order for printing");
                return;
            }
        };

        if tickets.is_empty() {
            tracing::debug!(order_id = %event.order_id, "Order has no items, nothing to print");
            return;
        }

        for outcome in self.dispatcher.print_all(&tickets).await {
            if !outcome.success {
                tracing::warn!(
                    order_id = %event.order_id,
                    station = %outcome.station,
                    error = outcome.error.as_deref().unwrap_or("unknown"),
                    "Auto-print failed, leaving order untouched"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::ticket::split;
    use shared::kitchen::{MenuItemRef, Order, OrderItem};

    fn dispatcher() -> PrintDispatcher {
        PrintDispatcher {
            printers: DashMap::new(),
            renderer: TicketRenderer::new(48),
            print_counts: DashMap::new(),
        }
    }

    fn order() -> Order {
        Order::confirmed(
            "FAC1",
            vec![OrderItem::new(
                MenuItemRef {
                    name: "Kebab".to_string(),
                    category: "kebab".to_string(),
                    prep_minutes: 15,
                },
                1,
            )],
        )
    }

    #[tokio::test]
    async fn test_missing_printer_is_soft_failure() {
        let d = dispatcher();
        let tickets = split(&order());

        let outcome = d.print_ticket(&tickets[0]).await;
        assert!(!outcome.success);
        assert!(outcome.error.as_deref().unwrap().contains("no printer"));
    }

    #[tokio::test]
    async fn test_unreachable_printer_is_soft_failure() {
        let d = dispatcher();
        // TEST-NET-1, nothing listens there
        let printer = NetworkPrinter::from_addr("192.0.2.1:9100")
            .unwrap()
            .with_timeout(Duration::from_millis(100));
        d.register(Station::Grill, printer);

        let tickets = split(&order());
        let grill = tickets
            .iter()
            .find(|t| t.station() == Some(Station::Grill))
            .unwrap();

        let outcome = d.print_ticket(grill).await;
        assert!(!outcome.success);
        assert!(outcome.error.is_some());
        assert_eq!(outcome.station, Station::Grill);
    }

    #[tokio::test]
    async fn test_station_without_printer_falls_back_to_general() {
        let d = dispatcher();
        let tickets = split(&order());
        let grill = tickets
            .iter()
            .find(|t| t.station() == Some(Station::Grill))
            .unwrap();

        // No grill printer registered: target resolves to general
        assert_eq!(d.target_station(grill), Station::General);
    }
}
