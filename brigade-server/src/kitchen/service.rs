//! KitchenService - the orchestration composition root
//!
//! Wires the station router, ticket splitter, timer engine, priority
//! queue, and status state machine behind the small operation set the
//! presentation layer and polling clients consume.
//!
//! # Operation flow
//!
//! ```text
//! operation(order_id, ...)
//!     ├─ 1. Take the mutation lock (one mutex around the active set)
//!     ├─ 2. Load the order from the repository
//!     ├─ 3. Apply the state machine transition
//!     ├─ 4. Persist the updated order
//!     └─ 5. Broadcast the emitted events (after successful save)
//! ```
//!
//! Reads (`list_active`, `list_timers`, stats, tickets) take no lock:
//! timer recomputation is a pure function of stored timestamps and the
//! wall clock, safe for any number of concurrent pollers.

use super::error::{KitchenError, KitchenResult};
use super::queue;
use super::repository::OrderRepository;
use super::station::Station;
use super::status;
use super::ticket::{self, Ticket};
use super::timer::{Timer, TimerReading, TimerStats};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared::kitchen::{KitchenEvent, Order};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 4096;

/// An active order as shown on the kitchen board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveOrder {
    #[serde(flatten)]
    pub order: Order,
    /// Items whose timers are overdue - highlighted, never auto-escalated
    pub overdue_items: Vec<String>,
}

/// A live timer with its current reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveTimer {
    #[serde(flatten)]
    pub timer: Timer,
    #[serde(flatten)]
    pub reading: TimerReading,
}

/// Kitchen orchestrator
pub struct KitchenService {
    repo: Arc<dyn OrderRepository>,
    event_tx: broadcast::Sender<KitchenEvent>,
    /// Serializes start/complete/reset/extend/priority/serve/cancel so
    /// interleaved mutations of the same item cannot lose updates
    write_lock: Mutex<()>,
}

impl KitchenService {
    /// Create a service over the given repository
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            repo,
            event_tx,
            write_lock: Mutex::new(()),
        }
    }

    /// Subscribe to transition events
    pub fn subscribe(&self) -> broadcast::Receiver<KitchenEvent> {
        self.event_tx.subscribe()
    }

    // ========== Intake ==========

    /// Admit a confirmed order into the active work set.
    ///
    /// Emits `ORDER_CONFIRMED`, which the print worker turns into
    /// per-station tickets.
    pub fn admit(&self, order: Order) -> KitchenResult<String> {
        let event = status::validate_admission(&order)?;
        let order_id = order.order_id.clone();

        let _guard = self.write_lock.lock();
        self.repo.insert(order)?;
        drop(_guard);

        tracing::info!(order_id = %order_id, "Order admitted to kitchen");
        let _ = self.event_tx.send(event);
        Ok(order_id)
    }

    // ========== Reads (lock-free) ==========

    /// Get one order
    pub fn get_order(&self, order_id: &str) -> KitchenResult<Order> {
        self.repo
            .get(order_id)?
            .ok_or_else(|| KitchenError::OrderNotFound(order_id.to_string()))
    }

    /// The active board: non-terminal orders, priority-ordered, with the
    /// overdue subset highlighted. A station filter keeps only orders
    /// that have at least one item routed to that station.
    pub fn list_active(
        &self,
        station: Option<Station>,
        now: i64,
    ) -> KitchenResult<Vec<ActiveOrder>> {
        let mut orders = self.repo.load_active()?;

        if let Some(station) = station {
            orders.retain(|o| {
                o.items
                    .iter()
                    .any(|i| Station::for_category(&i.menu_item.category) == station)
            });
        }

        queue::sort_active(&mut orders);

        Ok(orders
            .into_iter()
            .map(|order| {
                let overdue_items = queue::overdue_item_ids(&order, now);
                ActiveOrder {
                    order,
                    overdue_items,
                }
            })
            .collect())
    }

    /// All live timers, optionally filtered by station.
    pub fn list_timers(
        &self,
        station: Option<Station>,
        now: i64,
    ) -> KitchenResult<Vec<ActiveTimer>> {
        Ok(self
            .all_timers()?
            .into_iter()
            .filter(|t| station.is_none_or(|s| t.station == s))
            .map(|timer| {
                let reading = timer.tick(now);
                ActiveTimer { timer, reading }
            })
            .collect())
    }

    /// Aggregate timer statistics for the board header.
    pub fn timer_stats(&self, now: i64) -> KitchenResult<TimerStats> {
        Ok(super::timer::stats(&self.all_timers()?, now))
    }

    /// Per-station workload over the active set.
    pub fn station_workload(&self) -> KitchenResult<Vec<queue::StationWorkload>> {
        Ok(queue::station_workload(&self.repo.load_active()?))
    }

    /// Recompute the tickets of an order (per-station + consolidated).
    pub fn tickets(&self, order_id: &str) -> KitchenResult<Vec<Ticket>> {
        Ok(ticket::split(&self.get_order(order_id)?))
    }

    fn all_timers(&self) -> KitchenResult<Vec<Timer>> {
        Ok(self
            .repo
            .load_active()?
            .iter()
            .flat_map(Timer::for_order)
            .collect())
    }

    // ========== Mutations (serialized) ==========

    /// Start preparing an item; returns its timer.
    pub fn start_item(&self, order_id: &str, item_id: &str) -> KitchenResult<Timer> {
        self.mutate(order_id, |order, now| {
            let events = status::begin_item(order, item_id, now)?;
            let timer = order
                .find_item(item_id)
                .and_then(|item| Timer::for_item(order, item))
                .ok_or_else(|| KitchenError::ItemNotFound(item_id.to_string()))?;
            Ok((timer, events))
        })
    }

    /// Complete an item; returns whether the order became ready.
    pub fn complete_item(&self, order_id: &str, item_id: &str) -> KitchenResult<bool> {
        self.mutate(order_id, |order, now| {
            let events = status::complete_item(order, item_id, now)?;
            let order_ready = order.status == shared::kitchen::OrderStatus::Ready;
            Ok((order_ready, events))
        })
    }

    /// Undo an accidental start.
    pub fn reset_item(&self, order_id: &str, item_id: &str) -> KitchenResult<()> {
        self.mutate(order_id, |order, now| {
            let event = status::reset_item(order, item_id, now)?;
            Ok(((), vec![event]))
        })
    }

    /// Grant a manual grace period; returns the updated timer.
    pub fn extend_timer(
        &self,
        order_id: &str,
        item_id: &str,
        minutes: i64,
    ) -> KitchenResult<Timer> {
        self.mutate(order_id, |order, now| {
            let event = status::extend_item(order, item_id, minutes, now)?;
            let timer = order
                .find_item(item_id)
                .and_then(|item| Timer::for_item(order, item))
                .ok_or_else(|| KitchenError::ItemNotFound(item_id.to_string()))?;
            Ok((timer, vec![event]))
        })
    }

    /// Change the priority level (wire name; unknown values fail with
    /// `InvalidPriority`).
    pub fn change_priority(&self, order_id: &str, level: &str) -> KitchenResult<()> {
        self.mutate(order_id, |order, now| {
            let event = status::change_priority(order, level, now)?;
            Ok(((), vec![event]))
        })
    }

    /// Front-of-house handoff.
    pub fn serve(&self, order_id: &str) -> KitchenResult<()> {
        self.mutate(order_id, |order, now| {
            let event = status::serve(order, now)?;
            Ok(((), vec![event]))
        })
    }

    /// Cancel an in-flight order.
    pub fn cancel(&self, order_id: &str) -> KitchenResult<()> {
        self.mutate(order_id, |order, now| {
            let event = status::cancel(order, now)?;
            Ok(((), vec![event]))
        })
    }

    /// Load-transition-save under the mutation lock; broadcast only after
    /// a successful save so subscribers never observe a transition that
    /// was not persisted.
    fn mutate<T>(
        &self,
        order_id: &str,
        f: impl FnOnce(&mut Order, i64) -> KitchenResult<(T, Vec<KitchenEvent>)>,
    ) -> KitchenResult<T> {
        let events;
        let out;
        {
            let _guard = self.write_lock.lock();
            let mut order = self
                .repo
                .get(order_id)?
                .ok_or_else(|| KitchenError::OrderNotFound(order_id.to_string()))?;
            let now = shared::util::now_millis();
            let (value, emitted) = f(&mut order, now)?;
            self.repo.save(&order)?;
            out = value;
            events = emitted;
        }

        for event in events {
            tracing::debug!(
                order_id = %event.order_id,
                event_type = %event.event_type,
                "Kitchen event"
            );
            let _ = self.event_tx.send(event);
        }
        Ok(out)
    }
}

impl std::fmt::Debug for KitchenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KitchenService")
            .field("repo", &"<OrderRepository>")
            .field("event_tx", &"<broadcast::Sender>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::repository::MemoryOrderRepository;
    use shared::kitchen::{KitchenEventType, MenuItemRef, OrderItem};

    fn service() -> KitchenService {
        KitchenService::new(Arc::new(MemoryOrderRepository::new()))
    }

    fn order(number: &str) -> Order {
        Order::confirmed(
            number,
            vec![
                OrderItem::new(
                    MenuItemRef {
                        name: "Kebab".to_string(),
                        category: "kebab".to_string(),
                        prep_minutes: 15,
                    },
                    2,
                ),
                OrderItem::new(
                    MenuItemRef {
                        name: "Salad".to_string(),
                        category: "salad".to_string(),
                        prep_minutes: 5,
                    },
                    1,
                ),
            ],
        )
    }

    #[test]
    fn test_admit_and_list() {
        let svc = service();
        let now = shared::util::now_millis();
        svc.admit(order("FAC1")).unwrap();
        svc.admit(order("FAC2")).unwrap();

        let board = svc.list_active(None, now).unwrap();
        assert_eq!(board.len(), 2);

        // Station filter: both orders have grill items
        let grill = svc.list_active(Some(Station::Grill), now).unwrap();
        assert_eq!(grill.len(), 2);
        let oven = svc.list_active(Some(Station::Oven), now).unwrap();
        assert!(oven.is_empty());
    }

    #[test]
    fn test_admit_rejects_duplicate() {
        let svc = service();
        let o = order("FAC1");
        svc.admit(o.clone()).unwrap();
        assert!(svc.admit(o).is_err());
    }

    #[test]
    fn test_start_produces_timer_and_events() {
        let svc = service();
        let mut rx = svc.subscribe();
        let o = order("FAC1");
        let order_id = o.order_id.clone();
        let item_id = o.items[0].item_id.clone();
        svc.admit(o).unwrap();

        let timer = svc.start_item(&order_id, &item_id).unwrap();
        assert_eq!(timer.estimated_end - timer.start, 30 * 60_000);

        let confirmed = rx.try_recv().unwrap();
        assert_eq!(confirmed.event_type, KitchenEventType::OrderConfirmed);
        let started = rx.try_recv().unwrap();
        assert_eq!(started.event_type, KitchenEventType::ItemStarted);
        let preparing = rx.try_recv().unwrap();
        assert_eq!(preparing.event_type, KitchenEventType::OrderPreparing);
    }

    #[test]
    fn test_complete_all_items_makes_order_ready() {
        let svc = service();
        let o = order("FAC1");
        let order_id = o.order_id.clone();
        let ids: Vec<String> = o.items.iter().map(|i| i.item_id.clone()).collect();
        svc.admit(o).unwrap();

        for id in &ids {
            svc.start_item(&order_id, id).unwrap();
        }
        assert!(!svc.complete_item(&order_id, &ids[0]).unwrap());
        assert!(svc.complete_item(&order_id, &ids[1]).unwrap());

        // Ready orders are still part of the active board
        let now = shared::util::now_millis();
        assert_eq!(svc.list_active(None, now).unwrap().len(), 1);

        svc.serve(&order_id).unwrap();
        assert!(svc.list_active(None, now).unwrap().is_empty());
    }

    #[test]
    fn test_urgent_order_jumps_the_queue() {
        let svc = service();
        let now = shared::util::now_millis();
        let first = order("FAC1");
        let second = order("FAC2");
        let second_id = second.order_id.clone();
        svc.admit(first).unwrap();
        svc.admit(second).unwrap();

        svc.change_priority(&second_id, "URGENT").unwrap();
        let board = svc.list_active(None, now).unwrap();
        assert_eq!(board[0].order.order_number, "FAC2");
    }

    #[test]
    fn test_unknown_order_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.start_item("missing", "item"),
            Err(KitchenError::OrderNotFound(_))
        ));
        assert!(matches!(
            svc.get_order("missing"),
            Err(KitchenError::OrderNotFound(_))
        ));
    }

    #[test]
    fn test_list_timers_only_preparing_items() {
        let svc = service();
        let now = shared::util::now_millis();
        let o = order("FAC1");
        let order_id = o.order_id.clone();
        let kebab = o.items[0].item_id.clone();
        svc.admit(o).unwrap();

        assert!(svc.list_timers(None, now).unwrap().is_empty());
        svc.start_item(&order_id, &kebab).unwrap();

        let timers = svc.list_timers(None, now).unwrap();
        assert_eq!(timers.len(), 1);
        assert_eq!(timers[0].timer.station, Station::Grill);

        let cold = svc.list_timers(Some(Station::Cold), now).unwrap();
        assert!(cold.is_empty());
    }
}
