//! Kitchen Operations API Module
//!
//! REST surface for kitchen displays and polling clients.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen", kitchen_routes())
}

fn kitchen_routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::list_orders).post(handler::admit_order))
        .route("/timers", get(handler::list_timers))
        .route("/workload", get(handler::station_workload))
        .route("/settings", get(handler::settings))
        .route("/orders/{id}", get(handler::get_order))
        .route("/orders/{id}/tickets", get(handler::get_tickets))
        .route("/orders/{id}/print", post(handler::print_order))
        .route("/orders/{id}/priority", put(handler::change_priority))
        .route("/orders/{id}/serve", post(handler::serve_order))
        .route("/orders/{id}/cancel", post(handler::cancel_order))
        .route(
            "/orders/{id}/items/{item_id}/start",
            post(handler::start_item),
        )
        .route(
            "/orders/{id}/items/{item_id}/complete",
            post(handler::complete_item),
        )
        .route(
            "/orders/{id}/items/{item_id}/reset",
            post(handler::reset_item),
        )
        .route(
            "/orders/{id}/items/{item_id}/extend",
            post(handler::extend_timer),
        )
}
