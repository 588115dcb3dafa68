//! Kitchen Operations API Handlers
//!
//! The boundary consumed by kitchen displays and polling clients:
//! - Active board and live timers (lock-free reads, poll-friendly)
//! - Item start/complete/reset/extend
//! - Priority changes, serve/cancel handoff
//! - Ticket preview and on-demand printing
//!
//! Every operation returns an explicit result; printer failures surface
//! as soft outcomes on the print call only.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::dispatch::PrintOutcome;
use crate::kitchen::{
    ActiveOrder, ActiveTimer, Station, StationWorkload, Ticket, Timer, TimerStats, ticket,
};
use crate::utils::{ApiError, ApiResponse, ApiResult, Empty};
use shared::kitchen::{MenuItemRef, Order, OrderItem, OrderPriority, ServiceKind};

/// Query params with an optional station filter
#[derive(Debug, Deserialize)]
pub struct StationQuery {
    pub station: Option<String>,
}

fn parse_station(query: &StationQuery) -> ApiResult<Option<Station>> {
    match &query.station {
        None => Ok(None),
        Some(raw) => Station::parse(raw)
            .map(Some)
            .ok_or_else(|| ApiError::invalid(format!("Unknown station: {}", raw))),
    }
}

// ========== Reads ==========

/// GET /api/kitchen/orders - the active board
///
/// Non-terminal orders in queue order (priority desc, oldest first) with
/// the overdue item subset highlighted.
pub async fn list_orders(
    State(state): State<ServerState>,
    Query(query): Query<StationQuery>,
) -> ApiResult<Json<ApiResponse<Vec<ActiveOrder>>>> {
    let station = parse_station(&query)?;
    let now = shared::util::now_millis();
    let orders = state.kitchen.list_active(station, now)?;
    Ok(Json(ApiResponse::ok(orders)))
}

/// Response for the timer board
#[derive(Debug, Serialize)]
pub struct TimersResponse {
    pub timers: Vec<ActiveTimer>,
    pub stats: TimerStats,
}

/// GET /api/kitchen/timers - live timers plus aggregate stats
pub async fn list_timers(
    State(state): State<ServerState>,
    Query(query): Query<StationQuery>,
) -> ApiResult<Json<ApiResponse<TimersResponse>>> {
    let station = parse_station(&query)?;
    let now = shared::util::now_millis();
    let timers = state.kitchen.list_timers(station, now)?;
    let stats = state.kitchen.timer_stats(now)?;
    Ok(Json(ApiResponse::ok(TimersResponse { timers, stats })))
}

/// GET /api/kitchen/workload - per-station queue workload
pub async fn station_workload(
    State(state): State<ServerState>,
) -> ApiResult<Json<ApiResponse<Vec<StationWorkload>>>> {
    Ok(Json(ApiResponse::ok(state.kitchen.station_workload()?)))
}

/// Display settings handed to polling clients
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    /// Suggested poll interval (clients re-tick timers locally in between)
    pub refresh_secs: u64,
    pub stations: Vec<Station>,
}

/// GET /api/kitchen/settings - polling hints for displays
pub async fn settings(
    State(state): State<ServerState>,
) -> ApiResult<Json<ApiResponse<SettingsResponse>>> {
    Ok(Json(ApiResponse::ok(SettingsResponse {
        refresh_secs: state.config.client_refresh_secs,
        stations: Station::ALL.to_vec(),
    })))
}

/// GET /api/kitchen/orders/{id} - one order
pub async fn get_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Order>>> {
    Ok(Json(ApiResponse::ok(state.kitchen.get_order(&id)?)))
}

/// GET /api/kitchen/orders/{id}/tickets - recomputed ticket preview
pub async fn get_tickets(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<Ticket>>>> {
    Ok(Json(ApiResponse::ok(state.kitchen.tickets(&id)?)))
}

// ========== Intake ==========

/// Line item of an admission request
#[derive(Debug, Deserialize, Validate)]
pub struct AdmitItemRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 60))]
    pub category: String,
    /// Preparation minutes per unit
    #[validate(range(min = 0, max = 600))]
    pub prep_minutes: i64,
    #[validate(range(min = 1, max = 99))]
    pub quantity: i32,
    pub note: Option<String>,
}

/// Admission request - a confirmed order handed over by intake
#[derive(Debug, Deserialize, Validate)]
pub struct AdmitOrderRequest {
    #[validate(length(min = 1, max = 32))]
    pub order_number: String,
    pub customer_name: Option<String>,
    pub table_name: Option<String>,
    #[serde(default)]
    pub service: ServiceKind,
    /// Priority wire name; defaults to NORMAL
    pub priority: Option<String>,
    #[validate(nested)]
    pub items: Vec<AdmitItemRequest>,
}

/// Response for an admitted order
#[derive(Debug, Serialize)]
pub struct AdmitOrderResponse {
    pub order_id: String,
}

/// POST /api/kitchen/orders - admit a confirmed order
pub async fn admit_order(
    State(state): State<ServerState>,
    Json(req): Json<AdmitOrderRequest>,
) -> ApiResult<Json<ApiResponse<AdmitOrderResponse>>> {
    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let priority = match req.priority.as_deref() {
        None => OrderPriority::Normal,
        Some(raw) => {
            OrderPriority::parse(raw).ok_or_else(|| ApiError::invalid_priority(raw.to_string()))?
        }
    };

    let items = req
        .items
        .into_iter()
        .map(|i| {
            let mut item = OrderItem::new(
                MenuItemRef {
                    name: i.name,
                    category: i.category,
                    prep_minutes: i.prep_minutes,
                },
                i.quantity,
            );
            item.note = i.note;
            item
        })
        .collect();

    let mut order = Order::confirmed(req.order_number, items);
    order.customer_name = req.customer_name;
    order.table_name = req.table_name;
    order.service = req.service;
    order.priority = priority;

    let order_id = state.kitchen.admit(order)?;
    Ok(Json(ApiResponse::ok(AdmitOrderResponse { order_id })))
}

// ========== Item operations ==========

/// POST /api/kitchen/orders/{id}/items/{item_id}/start - start the timer
pub async fn start_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<Timer>>> {
    let timer = state.kitchen.start_item(&id, &item_id)?;
    Ok(Json(ApiResponse::ok(timer)))
}

/// Response for a completed item
#[derive(Debug, Serialize)]
pub struct CompleteItemResponse {
    /// Whether this completion made the whole order ready
    pub order_ready: bool,
}

/// POST /api/kitchen/orders/{id}/items/{item_id}/complete
pub async fn complete_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<CompleteItemResponse>>> {
    let order_ready = state.kitchen.complete_item(&id, &item_id)?;
    Ok(Json(ApiResponse::ok(CompleteItemResponse { order_ready })))
}

/// POST /api/kitchen/orders/{id}/items/{item_id}/reset - undo a start
pub async fn reset_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<Empty>>> {
    state.kitchen.reset_item(&id, &item_id)?;
    Ok(Json(ApiResponse::ok(Empty)))
}

/// Request body for a timer extension
#[derive(Debug, Deserialize, Validate)]
pub struct ExtendTimerRequest {
    #[validate(range(min = 1, max = 240))]
    pub minutes: i64,
}

/// POST /api/kitchen/orders/{id}/items/{item_id}/extend - grace period
pub async fn extend_timer(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(req): Json<ExtendTimerRequest>,
) -> ApiResult<Json<ApiResponse<Timer>>> {
    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;
    let timer = state.kitchen.extend_timer(&id, &item_id, req.minutes)?;
    Ok(Json(ApiResponse::ok(timer)))
}

// ========== Order operations ==========

/// Request body for a priority change
#[derive(Debug, Deserialize)]
pub struct ChangePriorityRequest {
    /// Priority wire name (LOW | NORMAL | HIGH | URGENT)
    pub level: String,
}

/// PUT /api/kitchen/orders/{id}/priority - explicit operator escalation
pub async fn change_priority(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<ChangePriorityRequest>,
) -> ApiResult<Json<ApiResponse<Empty>>> {
    state.kitchen.change_priority(&id, &req.level)?;
    Ok(Json(ApiResponse::ok(Empty)))
}

/// POST /api/kitchen/orders/{id}/serve - front-of-house handoff
pub async fn serve_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Empty>>> {
    state.kitchen.serve(&id)?;
    Ok(Json(ApiResponse::ok(Empty)))
}

/// POST /api/kitchen/orders/{id}/cancel
pub async fn cancel_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Empty>>> {
    state.kitchen.cancel(&id)?;
    Ok(Json(ApiResponse::ok(Empty)))
}

// ========== Printing ==========

/// Which tickets to print
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketTypeParam {
    /// One station (requires `station`) or every station ticket
    Station,
    /// The consolidated kitchen ticket
    Consolidated,
    /// Station tickets plus the consolidated one
    All,
}

/// Request body for an explicit print
#[derive(Debug, Deserialize)]
pub struct PrintRequest {
    pub ticket_type: TicketTypeParam,
    pub station: Option<String>,
}

/// Response for a print request - per-ticket soft outcomes
#[derive(Debug, Serialize)]
pub struct PrintResponse {
    pub outcomes: Vec<PrintOutcome>,
}

/// POST /api/kitchen/orders/{id}/print
///
/// Printer failures are reported in the outcomes, not raised: the order
/// status is never touched by a failed print, and retrying is the
/// caller's decision.
pub async fn print_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<PrintRequest>,
) -> ApiResult<Json<ApiResponse<PrintResponse>>> {
    let order = state.kitchen.get_order(&id)?;

    let tickets: Vec<Ticket> = match (req.ticket_type, &req.station) {
        (TicketTypeParam::Consolidated, _) => ticket::consolidated(&order)
            .map(|t| vec![t])
            .unwrap_or_default(),
        (TicketTypeParam::Station, Some(raw)) => {
            let station = Station::parse(raw)
                .ok_or_else(|| ApiError::invalid(format!("Unknown station: {}", raw)))?;
            ticket::for_station(&order, station)
                .map(|t| vec![t])
                .ok_or_else(|| {
                    ApiError::not_found(format!("Ticket for station {} on order {}", station, id))
                })?
        }
        (TicketTypeParam::Station, None) => ticket::split(&order)
            .into_iter()
            .filter(|t| t.station().is_some())
            .collect(),
        (TicketTypeParam::All, _) => ticket::split(&order),
    };

    if tickets.is_empty() {
        return Err(ApiError::invalid(format!(
            "Order {} has no items to print",
            id
        )));
    }

    let outcomes = state.print.print_all(&tickets).await;
    Ok(Json(ApiResponse::ok(PrintResponse { outcomes })))
}
