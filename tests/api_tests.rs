use std::sync::Arc;

use anyhow::Result;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use hotel_booking_bot::bot::notifier::notify_admins;
use hotel_booking_bot::bot::roles::RoleStore;
use hotel_booking_bot::config::Config;
use hotel_booking_bot::database::connection::DatabaseManager;
use hotel_booking_bot::database::models::{Booking, NewBooking};
use hotel_booking_bot::services::api::ApiService;
use serde_json::{json, Value};
use teloxide::Bot;
use tempfile::TempDir;

const API_KEY: &str = "test-secret";

async fn create_test_api(api_key: &str) -> (TestServer, Arc<DatabaseManager>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let db = Arc::new(
        DatabaseManager::new(&db_url)
            .await
            .expect("Failed to create test database"),
    );
    db.run_migrations().await.expect("Failed to run migrations");

    let config = Arc::new(Config {
        telegram_bot_token: "123:TEST".to_string(),
        database_url: db_url,
        http_port: 0,
        admin_chat_ids: Vec::new(),
        api_key: api_key.to_string(),
        smtp: None,
    });

    let bot = Bot::new(&config.telegram_bot_token);
    let roles = RoleStore::new(db.pool.clone(), config.admin_chat_ids.clone());
    let api = ApiService::new(db.clone(), bot, roles, config, None);

    let server = TestServer::new(api.router).expect("Failed to create test server");
    (server, db, temp_dir)
}

fn api_key_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-api-key"),
        HeaderValue::from_static(API_KEY),
    )
}

fn valid_payload() -> Value {
    json!({
        "roomTitle": "Deluxe Suite",
        "guestName": "John Doe",
        "phone": "+998901234567",
        "checkin": "2025-10-16",
        "checkout": "2025-10-18",
        "nights": 2,
        "guests": 2,
        "totalPrice": 1250000.0
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _db, _tmp) = create_test_api(API_KEY).await;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (server, _db, _tmp) = create_test_api(API_KEY).await;

    let response = server.get("/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn test_booking_requires_api_key() {
    let (server, db, _tmp) = create_test_api(API_KEY).await;

    let response = server.post("/api/bot/booking/bot").json(&valid_payload()).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let (name, _) = api_key_header();
    let response = server
        .post("/api/bot/booking/bot")
        .add_header(name, HeaderValue::from_static("wrong"))
        .json(&valid_payload())
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    // nothing persisted on either attempt
    assert_eq!(Booking::count(&db.pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_booking_rejects_missing_fields() {
    let (server, db, _tmp) = create_test_api(API_KEY).await;
    let (name, value) = api_key_header();

    let response = server
        .post("/api/bot/booking/bot")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "roomTitle": "Deluxe" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // guests below one is rejected before persistence
    let mut payload = valid_payload();
    payload["guests"] = json!(0);
    let response = server
        .post("/api/bot/booking/bot")
        .add_header(name, value)
        .json(&payload)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    assert_eq!(Booking::count(&db.pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_booking_rejects_negative_price() {
    let (server, db, _tmp) = create_test_api(API_KEY).await;
    let (name, value) = api_key_header();

    let mut payload = valid_payload();
    payload["totalPrice"] = json!(-10.0);
    let response = server
        .post("/api/bot/booking/bot")
        .add_header(name, value)
        .json(&payload)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(Booking::count(&db.pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_booking_intake_persists_record() {
    let (server, db, _tmp) = create_test_api(API_KEY).await;
    let (name, value) = api_key_header();

    let response = server
        .post("/api/bot/booking/bot")
        .add_header(name, value)
        .json(&valid_payload())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["ok"], json!(true));
    let id = body["id"].as_str().expect("id in response");

    let booking = Booking::find_by_id(&db.pool, id).await.unwrap().unwrap();
    assert_eq!(booking.room_title, "Deluxe Suite");
    assert_eq!(booking.status, "new");
    assert_eq!(booking.guests, 2);
    assert_eq!(booking.total_price, Some(1_250_000.0));
}

#[tokio::test]
async fn test_empty_api_key_disables_guard() {
    let (server, db, _tmp) = create_test_api("").await;

    let response = server.post("/api/bot/booking/bot").json(&valid_payload()).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(Booking::count(&db.pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_email_route_without_mailer_fails_cleanly() {
    let (server, _db, _tmp) = create_test_api(API_KEY).await;
    let (name, value) = api_key_header();

    let response = server
        .post("/api/booking/email")
        .add_header(name, value)
        .json(&json!({
            "roomTitle": "Deluxe Suite",
            "guestName": "John Doe",
            "phone": "+998901234567",
            "checkin": "2025-10-16",
            "checkout": "2025-10-18",
            "nights": 2,
            "guests": 2,
            "totalPrice": 1250000.0
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn test_notify_with_no_admins_makes_no_send_attempts() -> Result<()> {
    let (_server, db, _tmp) = create_test_api(API_KEY).await;

    let booking = Booking::create(
        &db.pool,
        NewBooking {
            room_title: "Deluxe".to_string(),
            guest_name: "John".to_string(),
            phone: None,
            email: None,
            nationality: None,
            checkin: "2025-10-16".to_string(),
            checkout: "2025-10-18".to_string(),
            nights: None,
            guests: 1,
            total_price: None,
        },
    )
    .await?;

    // zero configured admins: logs a warning and returns without touching
    // the network, so this completes offline without error
    let bot = Bot::new("123:TEST");
    let roles = RoleStore::new(db.pool.clone(), Vec::new());
    notify_admins(&bot, &roles, &booking).await;

    Ok(())
}
