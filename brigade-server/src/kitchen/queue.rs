//! Priority queue - read-time ordering of the active work set
//!
//! Priority changes are O(1) field mutations; ordering is always computed
//! when the board is read, so no index has to stay in sync. Overdue items
//! are exposed as a highlighted subset and never escalate an order's
//! priority on their own - escalation is an explicit operator action.

use super::station::Station;
use super::timer::{Timer, TimerState};
use serde::{Deserialize, Serialize};
use shared::kitchen::Order;
use std::cmp::Ordering;

/// Total order over active orders: priority level descending
/// (URGENT > HIGH > NORMAL > LOW), then creation time ascending.
pub fn compare(a: &Order, b: &Order) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then(a.created_at.cmp(&b.created_at))
}

/// Sort the active work set for display and dispatch.
pub fn sort_active(orders: &mut [Order]) {
    orders.sort_by(compare);
}

/// Item IDs of an order whose timers are overdue at `now`.
pub fn overdue_item_ids(order: &Order, now: i64) -> Vec<String> {
    Timer::for_order(order)
        .into_iter()
        .filter(|t| t.tick(now).state == TimerState::Overdue)
        .map(|t| t.item_id)
        .collect()
}

/// Pending/preparing workload of one station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationWorkload {
    pub station: Station,
    /// Line items routed to the station across all active orders
    pub items: usize,
    /// Items belonging to URGENT orders
    pub urgent_items: usize,
    /// Sum of estimated preparation minutes (per-unit minutes x quantity)
    pub estimated_minutes: i64,
}

/// Compute the per-station workload over the active work set.
///
/// Completed items are excluded - they no longer occupy the station.
pub fn station_workload(orders: &[Order]) -> Vec<StationWorkload> {
    Station::ALL
        .iter()
        .map(|&station| {
            let mut items = 0usize;
            let mut urgent_items = 0usize;
            let mut estimated_minutes = 0i64;

            for order in orders {
                for item in &order.items {
                    if item.status == shared::kitchen::ItemStatus::Completed {
                        continue;
                    }
                    if Station::for_category(&item.menu_item.category) != station {
                        continue;
                    }
                    items += 1;
                    if order.priority == shared::kitchen::OrderPriority::Urgent {
                        urgent_items += 1;
                    }
                    estimated_minutes += item.menu_item.prep_minutes * item.quantity as i64;
                }
            }

            StationWorkload {
                station,
                items,
                urgent_items,
                estimated_minutes,
            }
        })
        .filter(|w| w.items > 0)
        .collect()
}
