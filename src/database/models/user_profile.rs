use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Reverse lookup from a handle to a chat id. The platform only reveals the
/// id once the user messages the bot, so profiles are upserted on `/start`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserProfile {
    pub chat_id: String,
    /// Stored lowercase for lookups.
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub updated_at: String,
}

impl UserProfile {
    pub async fn upsert(
        pool: &sqlx::SqlitePool,
        chat_id: &str,
        username: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        let username = username.map(|u| u.to_lowercase());
        sqlx::query(
            "INSERT INTO user_profiles (chat_id, username, first_name, last_name, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT (chat_id) DO UPDATE SET
                 username = excluded.username,
                 first_name = excluded.first_name,
                 last_name = excluded.last_name,
                 updated_at = excluded.updated_at",
        )
        .bind(chat_id)
        .bind(&username)
        .bind(first_name)
        .bind(last_name)
        .bind(&now)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_username(
        pool: &sqlx::SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT chat_id, username, first_name, last_name, updated_at
             FROM user_profiles WHERE username = ?",
        )
        .bind(username.to_lowercase())
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_chat_id(
        pool: &sqlx::SqlitePool,
        chat_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT chat_id, username, first_name, last_name, updated_at
             FROM user_profiles WHERE chat_id = ?",
        )
        .bind(chat_id)
        .fetch_optional(pool)
        .await
    }
}
