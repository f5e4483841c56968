use sqlx::SqlitePool;
use teloxide::types::UserId;

use crate::database::models::{UserRole, ROLE_ADMIN, ROLE_USER};

/// Role resolution over the user_roles table plus the configured super-admin
/// set. Super-admins always evaluate as admin, stored rows or not, and are
/// immune to removal.
#[derive(Clone)]
pub struct RoleStore {
    pool: SqlitePool,
    super_admins: Vec<String>,
}

impl RoleStore {
    pub fn new(pool: SqlitePool, super_admins: Vec<String>) -> Self {
        Self { pool, super_admins }
    }

    pub fn super_admins(&self) -> &[String] {
        &self.super_admins
    }

    pub fn is_super_admin(&self, chat_id: &str) -> bool {
        self.super_admins.iter().any(|id| id == chat_id)
    }

    /// A missing principal is "not admin", not an error.
    pub async fn is_admin(&self, id: Option<UserId>) -> Result<bool, sqlx::Error> {
        let Some(id) = id else { return Ok(false) };
        let key = id.0.to_string();
        if self.is_super_admin(&key) {
            return Ok(true);
        }
        UserRole::has_role(&self.pool, &key, ROLE_ADMIN).await
    }

    /// Admin implies user-level access by policy.
    pub async fn is_user(&self, id: Option<UserId>) -> Result<bool, sqlx::Error> {
        let Some(id) = id else { return Ok(false) };
        if self.is_admin(Some(id)).await? {
            return Ok(true);
        }
        UserRole::has_role(&self.pool, &id.0.to_string(), ROLE_USER).await
    }

    /// Idempotently ensures an admin row for every configured super-admin.
    /// Safe to call on every process start and on every /start.
    pub async fn seed_super_admins(&self) -> Result<(), sqlx::Error> {
        for chat_id in &self.super_admins {
            UserRole::insert_if_absent(&self.pool, chat_id, ROLE_ADMIN).await?;
        }
        Ok(())
    }
}
