use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{
    Appliance, BookingRecord, CalendarDay, PaymentMethod, Technician, TimeSlot, WeekdayCode,
};
use crate::services::notify::Notification;
use crate::services::session::{BookingError, BookingSession, SessionStage, SlotSuggestion};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionView {
    id: String,
    stage: SessionStage,
    appliance: Option<Appliance>,
    technician: Option<Technician>,
    selected_day: Option<CalendarDay>,
    selected_slot: Option<TimeSlot>,
    payment_method: Option<PaymentMethod>,
    available_slots: Vec<TimeSlot>,
    suggestion: Option<SlotSuggestion>,
}

impl SessionView {
    fn new(id: &str, session: &BookingSession) -> Self {
        let draft = session.draft();
        Self {
            id: id.to_string(),
            stage: session.stage(),
            appliance: session.appliance().cloned(),
            technician: draft.map(|d| d.technician().clone()),
            selected_day: draft.map(|d| d.selected_day().clone()),
            selected_slot: draft.map(|d| d.selected_slot().clone()),
            payment_method: draft.and_then(|d| d.payment_method()),
            available_slots: session.available_slots(),
            suggestion: session.suggestion(),
        }
    }
}

fn session_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("session {id}"))
}

/// Run one transition against a stored session and render the result.
fn update_session<F>(state: &AppState, id: &str, apply: F) -> Result<Json<SessionView>, AppError>
where
    F: FnOnce(&mut BookingSession) -> Result<(), AppError>,
{
    let mut sessions = state.sessions();
    let session = sessions.get_mut(id).ok_or_else(|| session_not_found(id))?;
    apply(session)?;
    Ok(Json(SessionView::new(id, session)))
}

// POST /api/sessions
#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub appliance_id: String,
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let appliance = state
        .catalog
        .appliance(&payload.appliance_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("appliance {}", payload.appliance_id)))?;

    let session = BookingSession::begin(
        Arc::clone(&state.catalog),
        Arc::clone(&state.schedule),
        appliance,
    )?;
    let id = uuid::Uuid::new_v4().to_string();
    let view = SessionView::new(&id, &session);

    tracing::info!(session = %id, appliance = %payload.appliance_id, "session created");
    state.sessions().insert(id, session);

    Ok((StatusCode::CREATED, Json(view)))
}

// GET /api/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let sessions = state.sessions();
    let session = sessions.get(&id).ok_or_else(|| session_not_found(&id))?;
    Ok(Json(SessionView::new(&id, session)))
}

// DELETE /api/sessions/:id
pub async fn abandon_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .sessions()
        .remove(&id)
        .ok_or_else(|| session_not_found(&id))?;
    tracing::info!(session = %id, "session abandoned");
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/sessions/:id/technician
#[derive(Deserialize)]
pub struct SelectTechnicianRequest {
    pub technician_id: String,
}

pub async fn select_technician(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<SelectTechnicianRequest>,
) -> Result<Json<SessionView>, AppError> {
    let technician = state
        .catalog
        .technician(&payload.technician_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("technician {}", payload.technician_id)))?;

    update_session(&state, &id, |session| {
        session.select_technician(technician)?;
        Ok(())
    })
}

// POST /api/sessions/:id/day
#[derive(Deserialize)]
pub struct SelectDayRequest {
    pub weekday_code: String,
}

pub async fn select_day(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<SelectDayRequest>,
) -> Result<Json<SessionView>, AppError> {
    let day = WeekdayCode::parse(&payload.weekday_code)
        .and_then(|code| state.catalog.day(code))
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("day {}", payload.weekday_code)))?;

    update_session(&state, &id, |session| {
        session.select_day(day)?;
        Ok(())
    })
}

// POST /api/sessions/:id/slot
#[derive(Deserialize)]
pub struct SelectSlotRequest {
    pub range: String,
}

pub async fn select_slot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<SelectSlotRequest>,
) -> Result<Json<SessionView>, AppError> {
    update_session(&state, &id, |session| {
        let slot = session
            .available_slots()
            .into_iter()
            .find(|s| s.range == payload.range)
            .ok_or_else(|| {
                BookingError::PreconditionViolation(format!(
                    "slot {} is not offered",
                    payload.range
                ))
            })?;
        session.select_slot(slot)?;
        Ok(())
    })
}

// POST /api/sessions/:id/payment
#[derive(Deserialize)]
pub struct ChoosePaymentRequest {
    pub method: PaymentMethod,
}

pub async fn choose_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ChoosePaymentRequest>,
) -> Result<Json<SessionView>, AppError> {
    update_session(&state, &id, |session| {
        session.choose_payment_method(payload.method)?;
        Ok(())
    })
}

// POST /api/sessions/:id/back
pub async fn return_to_scheduling(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    update_session(&state, &id, |session| {
        session.return_to_scheduling()?;
        Ok(())
    })
}

// POST /api/sessions/:id/commit
#[derive(Serialize)]
pub struct ConfirmationResponse {
    booking_id: String,
    committed_at: String,
    record: BookingRecord,
    notification: Notification,
}

pub async fn commit_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ConfirmationResponse>, AppError> {
    let record = {
        let mut sessions = state.sessions();
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(&id))?;
        let record = session.commit()?;
        // The draft is not kept once it has been turned into a record.
        sessions.remove(&id);
        record
    };

    let booking_id = uuid::Uuid::new_v4().to_string();
    let notification = Notification::from_record(&record, &state.config.display_month);
    if let Err(e) = state.notifier.notify(&notification).await {
        tracing::error!(error = %e, booking = %booking_id, "failed to deliver confirmation");
    }

    tracing::info!(session = %id, booking = %booking_id, "booking confirmed");

    Ok(Json(ConfirmationResponse {
        booking_id,
        committed_at: Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string(),
        record,
        notification,
    }))
}
