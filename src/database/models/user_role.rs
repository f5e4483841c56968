use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// One role assignment per (chat_id, role). An id may hold both an admin and
/// a user row at the same time.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserRole {
    pub chat_id: String,
    pub role: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: String,
}

impl UserRole {
    /// Insert-if-absent. Concurrent callers never create duplicates or
    /// clobber metadata on an existing row; used for super-admin seeding.
    pub async fn insert_if_absent(
        pool: &sqlx::SqlitePool,
        chat_id: &str,
        role: &str,
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO user_roles (chat_id, role, created_at) VALUES (?, ?, ?)
             ON CONFLICT (chat_id, role) DO NOTHING",
        )
        .bind(chat_id)
        .bind(role)
        .bind(&now)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Upsert an assignment. A `None` username leaves any cached handle on
    /// the existing row untouched.
    pub async fn upsert(
        pool: &sqlx::SqlitePool,
        chat_id: &str,
        role: &str,
        username: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO user_roles (chat_id, role, username, created_at) VALUES (?, ?, ?, ?)
             ON CONFLICT (chat_id, role) DO UPDATE SET username = COALESCE(excluded.username, username)",
        )
        .bind(chat_id)
        .bind(role)
        .bind(username)
        .bind(&now)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// First-contact row for a fresh `/start`, with cached display names.
    pub async fn create_user_with_names(
        pool: &sqlx::SqlitePool,
        chat_id: &str,
        username: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO user_roles (chat_id, role, username, first_name, last_name, created_at)
             VALUES (?, 'user', ?, ?, ?, ?)
             ON CONFLICT (chat_id, role) DO NOTHING",
        )
        .bind(chat_id)
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(&now)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn has_role(
        pool: &sqlx::SqlitePool,
        chat_id: &str,
        role: &str,
    ) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_roles WHERE chat_id = ? AND role = ?",
        )
        .bind(chat_id)
        .bind(role)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn exists_any(
        pool: &sqlx::SqlitePool,
        chat_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_roles WHERE chat_id = ?",
        )
        .bind(chat_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn list_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserRole>(
            "SELECT chat_id, role, username, first_name, last_name, created_at
             FROM user_roles
             ORDER BY role DESC, chat_id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Removal strips every role row for the id, both admin and user.
    pub async fn delete_all_for(
        pool: &sqlx::SqlitePool,
        chat_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_roles WHERE chat_id = ?")
            .bind(chat_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Refresh cached display names on existing rows only.
    pub async fn update_names(
        pool: &sqlx::SqlitePool,
        chat_id: &str,
        username: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE user_roles SET username = ?, first_name = ?, last_name = ? WHERE chat_id = ?",
        )
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(chat_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
