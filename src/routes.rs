use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/appliances", get(handlers::catalog::get_appliances))
        .route("/api/technicians", get(handlers::catalog::get_technicians))
        .route("/api/week", get(handlers::catalog::get_week))
        .route(
            "/api/payment-methods",
            get(handlers::catalog::get_payment_methods),
        )
        .route("/api/sessions", post(handlers::sessions::create_session))
        .route(
            "/api/sessions/:id",
            get(handlers::sessions::get_session).delete(handlers::sessions::abandon_session),
        )
        .route(
            "/api/sessions/:id/technician",
            post(handlers::sessions::select_technician),
        )
        .route("/api/sessions/:id/day", post(handlers::sessions::select_day))
        .route("/api/sessions/:id/slot", post(handlers::sessions::select_slot))
        .route(
            "/api/sessions/:id/payment",
            post(handlers::sessions::choose_payment),
        )
        .route(
            "/api/sessions/:id/back",
            post(handlers::sessions::return_to_scheduling),
        )
        .route(
            "/api/sessions/:id/commit",
            post(handlers::sessions::commit_session),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
