use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A booking record created by the intake API. Required fields are always
/// present; this side never mutates or deletes a booking.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub room_title: String,
    pub guest_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub nationality: Option<String>,
    pub checkin: String,  // calendar date string, no timezone
    pub checkout: String,
    pub nights: Option<i64>,
    pub guests: i64,
    pub total_price: Option<f64>,
    pub status: String, // 'new', 'approved', 'deleted'
    pub created_at: String,
}

/// Field set accepted from the intake API.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_title: String,
    pub guest_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub nationality: Option<String>,
    pub checkin: String,
    pub checkout: String,
    pub nights: Option<i64>,
    pub guests: i64,
    pub total_price: Option<f64>,
}

impl Booking {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        new: NewBooking,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, room_title, guest_name, phone, email, nationality,
                 checkin, checkout, nights, guests, total_price, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'new', ?)
            "#,
        )
        .bind(&id)
        .bind(&new.room_title)
        .bind(&new.guest_name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.nationality)
        .bind(&new.checkin)
        .bind(&new.checkout)
        .bind(new.nights)
        .bind(new.guests)
        .bind(new.total_price)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(Booking {
            id,
            room_title: new.room_title,
            guest_name: new.guest_name,
            phone: new.phone,
            email: new.email,
            nationality: new.nationality,
            checkin: new.checkin,
            checkout: new.checkout,
            nights: new.nights,
            guests: new.guests,
            total_price: new.total_price,
            status: "new".to_string(),
            created_at: now,
        })
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        booking_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "SELECT id, room_title, guest_name, phone, email, nationality, checkin, checkout, nights, guests, total_price, status, created_at FROM bookings WHERE id = ?"
        )
        .bind(booking_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(pool)
            .await
    }

    /// One page of bookings, newest first.
    pub async fn find_page(
        pool: &sqlx::SqlitePool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "SELECT id, room_title, guest_name, phone, email, nationality, checkin, checkout, nights, guests, total_price, status, created_at
             FROM bookings
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
