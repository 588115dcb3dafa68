//! Timer engine - live countdown state for items in preparation
//!
//! A timer is a derived view: the only persisted inputs are the item's
//! start timestamp and any manual extensions. Progress and overdue state
//! are recomputed from those on every tick, so ticks are idempotent and
//! resilient to client restarts or missed polls - any client can
//! reconstruct exact progress from the two timestamps alone.

use super::station::Station;
use serde::{Deserialize, Serialize};
use shared::kitchen::{ItemStatus, Order, OrderItem};

/// Live timer state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerState {
    Running,
    Overdue,
}

/// Countdown timer for a single item in preparation
///
/// Exists if and only if the item is PREPARING; completing or resetting
/// the item implicitly destroys it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timer {
    pub order_id: String,
    pub item_id: String,
    pub item_name: String,
    pub station: Station,
    /// When the item entered PREPARING (Unix millis)
    pub start: i64,
    /// Estimated completion time (Unix millis), including manual extensions
    pub estimated_end: i64,
}

/// Snapshot of a timer at a given instant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimerReading {
    /// Time left until the estimate (millis, negative once overdue)
    pub remaining_ms: i64,
    /// Elapsed share of the estimate, clamped to 0..=100
    pub progress_percent: f64,
    pub state: TimerState,
}

impl Timer {
    /// Derive the timer for an item, if one exists.
    pub fn for_item(order: &Order, item: &OrderItem) -> Option<Timer> {
        if item.status != ItemStatus::Preparing {
            return None;
        }
        let start = item.started_at?;
        Some(Timer {
            order_id: order.order_id.clone(),
            item_id: item.item_id.clone(),
            item_name: item.menu_item.name.clone(),
            station: Station::for_category(&item.menu_item.category),
            start,
            estimated_end: start + item.prep_duration_ms() + item.extended_ms,
        })
    }

    /// All timers of an order
    pub fn for_order(order: &Order) -> Vec<Timer> {
        order
            .items
            .iter()
            .filter_map(|item| Timer::for_item(order, item))
            .collect()
    }

    /// Recompute the live reading at `now` (Unix millis).
    ///
    /// Pure: calling twice with the same `now` yields identical results.
    pub fn tick(&self, now: i64) -> TimerReading {
        let remaining_ms = self.estimated_end - now;
        let total = self.estimated_end - self.start;

        let progress_percent = if total <= 0 {
            // Zero-duration estimate (e.g. zero prep minutes): done on arrival
            100.0
        } else {
            let elapsed = now - self.start;
            (elapsed as f64 * 100.0 / total as f64).clamp(0.0, 100.0)
        };

        let state = if remaining_ms <= 0 {
            TimerState::Overdue
        } else {
            TimerState::Running
        };

        TimerReading {
            remaining_ms,
            progress_percent,
            state,
        }
    }
}

/// Per-station timer breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationTimerStats {
    pub station: Station,
    pub active: usize,
    pub overdue: usize,
}

/// Aggregate timer statistics for the board header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerStats {
    pub total_active: usize,
    pub overdue: usize,
    /// Average progress across all timers, rounded to whole percent
    pub avg_progress: u32,
    pub stations: Vec<StationTimerStats>,
}

/// Compute aggregate statistics over a set of timers at `now`.
pub fn stats(timers: &[Timer], now: i64) -> TimerStats {
    let readings: Vec<TimerReading> = timers.iter().map(|t| t.tick(now)).collect();

    let overdue = readings
        .iter()
        .filter(|r| r.state == TimerState::Overdue)
        .count();

    let avg_progress = if readings.is_empty() {
        0
    } else {
        let total: f64 = readings.iter().map(|r| r.progress_percent).sum();
        (total / readings.len() as f64).round() as u32
    };

    let stations = Station::ALL
        .iter()
        .map(|&station| {
            let station_readings: Vec<&TimerReading> = timers
                .iter()
                .zip(readings.iter())
                .filter(|(t, _)| t.station == station)
                .map(|(_, r)| r)
                .collect();
            StationTimerStats {
                station,
                active: station_readings
                    .iter()
                    .filter(|r| r.state == TimerState::Running)
                    .count(),
                overdue: station_readings
                    .iter()
                    .filter(|r| r.state == TimerState::Overdue)
                    .count(),
            }
        })
        .collect();

    TimerStats {
        total_active: timers.len() - overdue,
        overdue,
        avg_progress,
        stations,
    }
}
