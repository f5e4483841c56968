use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use teloxide::Bot;
use tower_http::trace::TraceLayer;

use crate::bot::notifier::notify_admins;
use crate::bot::roles::RoleStore;
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::database::models::{Booking, NewBooking};
use crate::services::mailer::{BookingEmailPayload, Mailer};
use crate::utils::validation::{validate_booking_fields, validate_total_price};

/// Booking payload pushed by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub room_title: String,
    pub guest_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    pub checkin: String,
    pub checkout: String,
    #[serde(default)]
    pub nights: Option<i64>,
    pub guests: i64,
    #[serde(default)]
    pub total_price: Option<f64>,
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseManager>,
    pub bot: Bot,
    pub roles: RoleStore,
    pub config: Arc<Config>,
    pub mailer: Option<Mailer>,
}

/// HTTP surface: booking intake, booking email, health.
pub struct ApiService {
    pub router: Router,
}

impl ApiService {
    pub fn new(
        db: Arc<DatabaseManager>,
        bot: Bot,
        roles: RoleStore,
        config: Arc<Config>,
        mailer: Option<Mailer>,
    ) -> Self {
        let state = AppState {
            db,
            bot,
            roles,
            config,
            mailer,
        };

        let router = Router::new()
            .route("/api/bot/booking/bot", post(create_booking))
            .route("/api/booking/email", post(send_booking_email))
            .route("/health", get(health_check))
            .fallback(not_found)
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

type ApiResponse = (StatusCode, Json<Value>);

/// Constant-shape json error body used by every route.
fn error_body(status: StatusCode, message: &str) -> ApiResponse {
    (status, Json(json!({ "ok": false, "error": message })))
}

/// Shared secret guard. An empty configured key disables the check so local
/// development works without secrets.
fn check_api_key(state: &AppState, headers: &HeaderMap) -> Result<(), ApiResponse> {
    if state.config.api_key.is_empty() {
        return Ok(());
    }
    let got = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if got != state.config.api_key {
        return Err(error_body(StatusCode::UNAUTHORIZED, "Unauthorized"));
    }
    Ok(())
}

/// POST /api/bot/booking/bot: validate, persist, fan out to admins.
///
/// The notification runs on its own task with its own error boundary; the
/// HTTP response never waits on Telegram.
async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResponse {
    if let Err(resp) = check_api_key(&state, &headers) {
        return resp;
    }

    let payload: BookingPayload = match serde_json::from_value(body) {
        Ok(payload) => payload,
        Err(_) => return error_body(StatusCode::BAD_REQUEST, "Missing required fields"),
    };

    if validate_booking_fields(
        &payload.room_title,
        &payload.guest_name,
        &payload.checkin,
        &payload.checkout,
        payload.guests,
    )
    .is_err()
        || validate_total_price(payload.total_price).is_err()
    {
        return error_body(StatusCode::BAD_REQUEST, "Missing required fields");
    }

    let new = NewBooking {
        room_title: payload.room_title,
        guest_name: payload.guest_name,
        phone: payload.phone,
        email: payload.email,
        nationality: payload.nationality,
        checkin: payload.checkin,
        checkout: payload.checkout,
        nights: payload.nights,
        guests: payload.guests,
        total_price: payload.total_price,
    };

    match Booking::create(&state.db.pool, new).await {
        Ok(booking) => {
            let id = booking.id.clone();
            let bot = state.bot.clone();
            let roles = state.roles.clone();
            tokio::spawn(async move {
                notify_admins(&bot, &roles, &booking).await;
            });
            (StatusCode::OK, Json(json!({ "ok": true, "id": id })))
        }
        Err(e) => {
            tracing::error!("Failed to persist booking: {}", e);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

/// POST /api/booking/email: deliver a booking summary over SMTP.
async fn send_booking_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResponse {
    if let Err(resp) = check_api_key(&state, &headers) {
        return resp;
    }

    let payload: BookingEmailPayload = match serde_json::from_value(body) {
        Ok(payload) => payload,
        Err(_) => return error_body(StatusCode::BAD_REQUEST, "Missing required fields"),
    };

    if payload.room_title.trim().is_empty()
        || payload.guest_name.trim().is_empty()
        || payload.phone.trim().is_empty()
        || payload.checkin.trim().is_empty()
        || payload.checkout.trim().is_empty()
    {
        return error_body(StatusCode::BAD_REQUEST, "Missing required fields");
    }

    let Some(mailer) = state.mailer.as_ref() else {
        return error_body(StatusCode::INTERNAL_SERVER_ERROR, "Mailer not configured");
    };

    match mailer
        .send_booking_email(&payload, payload.to_email.as_deref())
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "ok": true, "message": "Email sent successfully" })),
        ),
        Err(e) => {
            tracing::error!("Email send error: {}", e);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Email send failed")
        }
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn not_found() -> ApiResponse {
    error_body(StatusCode::NOT_FOUND, "Not found")
}
