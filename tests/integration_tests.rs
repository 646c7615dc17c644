use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use repairbook::config::AppConfig;
use repairbook::models::BookingCatalog;
use repairbook::routes;
use repairbook::services::notify::{BookingNotifier, Notification};
use repairbook::state::AppState;

// ── Mock Notifier ──

struct MockNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

#[async_trait]
impl BookingNotifier for MockNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

struct FailingNotifier;

#[async_trait]
impl BookingNotifier for FailingNotifier {
    async fn notify(&self, _notification: &Notification) -> anyhow::Result<()> {
        anyhow::bail!("delivery channel down")
    }
}

// ── Helpers ──

fn test_state_with_sent() -> (Arc<AppState>, Arc<Mutex<Vec<Notification>>>) {
    let sent = Arc::new(Mutex::new(vec![]));
    let notifier = MockNotifier {
        sent: Arc::clone(&sent),
    };
    let state = Arc::new(AppState::new(
        AppConfig::default(),
        BookingCatalog::default(),
        Box::new(notifier),
    ));
    (state, sent)
}

fn test_state() -> Arc<AppState> {
    test_state_with_sent().0
}

fn test_app(state: Arc<AppState>) -> Router {
    routes::app(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(res: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn send(state: &Arc<AppState>, req: Request<Body>) -> Response<Body> {
    test_app(state.clone()).oneshot(req).await.unwrap()
}

/// Create a session for the given appliance and return its id.
async fn start_session(state: &Arc<AppState>, appliance_id: &str) -> String {
    let res = send(
        state,
        post_json(
            "/api/sessions",
            &format!(r#"{{"appliance_id":"{appliance_id}"}}"#),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let json = body_json(res).await;
    json["id"].as_str().unwrap().to_string()
}

// ── Catalog Tests ──

#[tokio::test]
async fn test_health() {
    let res = send(&test_state(), get("/health")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_list_appliances() {
    let res = send(&test_state(), get("/api/appliances")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let json: Vec<serde_json::Value> = serde_json::from_value(body_json(res).await).unwrap();
    assert_eq!(json.len(), 4);
    assert_eq!(json[0]["display_name"], "Washing Machine");
    assert_eq!(json[3]["display_name"], "TV");
}

#[tokio::test]
async fn test_search_appliances() {
    let res = send(&test_state(), get("/api/appliances?q=FRIDGE")).await;
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 0);

    let res = send(&test_state(), get("/api/appliances?q=air")).await;
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], "3");
}

#[tokio::test]
async fn test_list_technicians_and_week() {
    let state = test_state();

    let res = send(&state, get("/api/technicians")).await;
    let json = body_json(res).await;
    assert_eq!(json[0]["display_name"], "Jane Doe");
    assert_eq!(json[0]["skill_tag"], "Plumbing");
    assert_eq!(json.as_array().unwrap().len(), 3);

    let res = send(&state, get("/api/week")).await;
    let json = body_json(res).await;
    assert_eq!(json["days"].as_array().unwrap().len(), 7);
    assert_eq!(json["default_day"]["weekday_code"], "We");
    assert_eq!(json["default_day"]["day_number"], 3);
}

#[tokio::test]
async fn test_payment_methods() {
    let res = send(&test_state(), get("/api/payment-methods")).await;
    let json = body_json(res).await;
    assert_eq!(json[0]["method"], "digital_wallet");
    assert_eq!(json[0]["label"], "G-cash");
    assert_eq!(json[0]["default"], true);
    assert_eq!(json[1]["method"], "cash_on_delivery");
    assert_eq!(json[1]["default"], false);
}

// ── Session Tests ──

#[tokio::test]
async fn test_create_session_applies_defaults() {
    let state = test_state();
    let id = start_session(&state, "1").await;

    let res = send(&state, get(&format!("/api/sessions/{id}"))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["stage"], "scheduling_in_progress");
    assert_eq!(json["appliance"]["display_name"], "Washing Machine");
    assert_eq!(json["technician"]["display_name"], "Jane Doe");
    assert_eq!(json["selected_day"]["weekday_code"], "We");
    assert_eq!(json["selected_slot"]["range"], "9:00 am - 10:00 am");
    assert_eq!(json["selected_slot"]["status_label"], "open slot");
    assert_eq!(json["available_slots"].as_array().unwrap().len(), 4);
    assert_eq!(json["suggestion"]["slot"]["range"], "9:00 am - 10:00 am");
    assert!(json["payment_method"].is_null());
}

#[tokio::test]
async fn test_create_session_unknown_appliance() {
    let state = test_state();
    let res = send(&state, post_json("/api/sessions", r#"{"appliance_id":"99"}"#)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(state.sessions().is_empty());
}

#[tokio::test]
async fn test_unknown_session() {
    let res = send(&test_state(), get("/api/sessions/does-not-exist")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let json = body_json(res).await;
    assert_eq!(json["error"], "not found: session does-not-exist");
}

#[tokio::test]
async fn test_day_change_resets_slot() {
    let state = test_state();
    let id = start_session(&state, "2").await;

    let res = send(
        &state,
        post_json(
            &format!("/api/sessions/{id}/slot"),
            r#"{"range":"4:00 pm - 5:00 pm"}"#,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["selected_slot"]["range"], "4:00 pm - 5:00 pm");

    let res = send(
        &state,
        post_json(&format!("/api/sessions/{id}/day"), r#"{"weekday_code":"Th"}"#),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["selected_day"]["day_number"], 4);
    assert_eq!(json["selected_slot"]["range"], "9:00 am - 10:00 am");
}

#[tokio::test]
async fn test_technician_change_keeps_slot() {
    let state = test_state();
    let id = start_session(&state, "1").await;

    send(
        &state,
        post_json(
            &format!("/api/sessions/{id}/slot"),
            r#"{"range":"10:00 am - 11:00 am"}"#,
        ),
    )
    .await;

    let res = send(
        &state,
        post_json(
            &format!("/api/sessions/{id}/technician"),
            r#"{"technician_id":"alice-johnson"}"#,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["technician"]["display_name"], "Alice Johnson");
    assert_eq!(json["selected_slot"]["range"], "10:00 am - 11:00 am");
    assert_eq!(json["selected_day"]["weekday_code"], "We");
}

#[tokio::test]
async fn test_unknown_technician_and_day() {
    let state = test_state();
    let id = start_session(&state, "1").await;

    let res = send(
        &state,
        post_json(
            &format!("/api/sessions/{id}/technician"),
            r#"{"technician_id":"bob"}"#,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(
        &state,
        post_json(&format!("/api/sessions/{id}/day"), r#"{"weekday_code":"Xx"}"#),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_slot_not_offered() {
    let state = test_state();
    let id = start_session(&state, "1").await;

    let res = send(
        &state,
        post_json(
            &format!("/api/sessions/{id}/slot"),
            r#"{"range":"11:00 pm - 12:00 am"}"#,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_commit_before_payment_is_unprocessable() {
    let state = test_state();
    let id = start_session(&state, "1").await;

    let res = send(&state, post_empty(&format!("/api/sessions/{id}/commit"))).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(res).await;
    assert_eq!(
        json["error"],
        "booking draft is incomplete: missing payment method"
    );

    // Session survives the failed commit.
    let res = send(&state, get(&format!("/api/sessions/{id}"))).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_scheduling_after_payment_conflicts() {
    let state = test_state();
    let id = start_session(&state, "1").await;

    send(
        &state,
        post_json(
            &format!("/api/sessions/{id}/payment"),
            r#"{"method":"digital_wallet"}"#,
        ),
    )
    .await;

    let res = send(
        &state,
        post_json(&format!("/api/sessions/{id}/day"), r#"{"weekday_code":"Mo"}"#),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = send(&state, post_empty(&format!("/api/sessions/{id}/back"))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["stage"], "scheduling_in_progress");
    assert!(json["payment_method"].is_null());

    let res = send(
        &state,
        post_json(&format!("/api/sessions/{id}/day"), r#"{"weekday_code":"Mo"}"#),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_full_booking_flow() {
    let (state, sent) = test_state_with_sent();
    let id = start_session(&state, "1").await;

    let res = send(
        &state,
        post_json(
            &format!("/api/sessions/{id}/slot"),
            r#"{"range":"2:00 pm - 4:00 pm"}"#,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(
        &state,
        post_json(
            &format!("/api/sessions/{id}/payment"),
            r#"{"method":"cash_on_delivery"}"#,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["stage"], "payment_chosen");
    assert_eq!(json["payment_method"], "cash_on_delivery");

    let res = send(&state, post_empty(&format!("/api/sessions/{id}/commit"))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert!(!json["booking_id"].as_str().unwrap().is_empty());
    assert_eq!(json["record"]["slot"]["range"], "2:00 pm - 4:00 pm");
    assert_eq!(json["record"]["payment_method"], "cash_on_delivery");
    assert_eq!(json["record"]["note"], "please call 30 minutes before arrival");
    assert_eq!(json["notification"]["heading"], "Booking with Jane Doe");
    assert_eq!(
        json["notification"]["schedule"],
        "We/Sep 3 (2:00 pm - 4:00 pm)"
    );

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].payment_method, "Cash on Delivery");
    assert_eq!(sent[0].appliance, "Washing Machine");
    drop(sent);

    // The session is gone once committed.
    let res = send(&state, post_empty(&format!("/api/sessions/{id}/commit"))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_commit_succeeds_when_notification_fails() {
    let state = Arc::new(AppState::new(
        AppConfig::default(),
        BookingCatalog::default(),
        Box::new(FailingNotifier),
    ));
    let id = start_session(&state, "4").await;

    send(
        &state,
        post_json(
            &format!("/api/sessions/{id}/payment"),
            r#"{"method":"digital_wallet"}"#,
        ),
    )
    .await;

    let res = send(&state, post_empty(&format!("/api/sessions/{id}/commit"))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["record"]["appliance"]["display_name"], "TV");
    assert_eq!(json["notification"]["payment_method"], "G-cash");
}

#[tokio::test]
async fn test_abandon_session() {
    let state = test_state();
    let id = start_session(&state, "3").await;

    let res = send(
        &state,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/sessions/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send(&state, get(&format!("/api/sessions/{id}"))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let state = test_state();
    let first = start_session(&state, "1").await;
    let second = start_session(&state, "2").await;

    send(
        &state,
        post_json(
            &format!("/api/sessions/{first}/day"),
            r#"{"weekday_code":"Su"}"#,
        ),
    )
    .await;

    let res = send(&state, get(&format!("/api/sessions/{second}"))).await;
    let json = body_json(res).await;
    assert_eq!(json["selected_day"]["weekday_code"], "We");
    assert_eq!(json["appliance"]["display_name"], "Refrigerator");
}
