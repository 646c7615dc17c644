use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{Appliance, CalendarDay, PaymentMethod, Technician};
use crate::state::AppState;

// GET /api/appliances
#[derive(Deserialize)]
pub struct ApplianceQuery {
    pub q: Option<String>,
}

pub async fn get_appliances(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ApplianceQuery>,
) -> Json<Vec<Appliance>> {
    let q = query.q.as_deref().unwrap_or("");
    Json(
        state
            .catalog
            .search_appliances(q)
            .into_iter()
            .cloned()
            .collect(),
    )
}

// GET /api/technicians
pub async fn get_technicians(State(state): State<Arc<AppState>>) -> Json<Vec<Technician>> {
    Json(state.catalog.technicians.clone())
}

// GET /api/week
#[derive(Serialize)]
pub struct WeekResponse {
    days: Vec<CalendarDay>,
    default_day: CalendarDay,
}

pub async fn get_week(State(state): State<Arc<AppState>>) -> Json<WeekResponse> {
    Json(WeekResponse {
        days: state.catalog.week.clone(),
        default_day: state.catalog.default_day.clone(),
    })
}

// GET /api/payment-methods
#[derive(Serialize)]
pub struct PaymentOption {
    method: PaymentMethod,
    label: &'static str,
    description: &'static str,
    default: bool,
}

pub async fn get_payment_methods() -> Json<Vec<PaymentOption>> {
    Json(
        PaymentMethod::ALL
            .into_iter()
            .map(|method| PaymentOption {
                method,
                label: method.label(),
                description: method.description(),
                default: method == PaymentMethod::default(),
            })
            .collect(),
    )
}
