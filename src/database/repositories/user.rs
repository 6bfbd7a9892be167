//! User repository implementation

use sqlx::SqlitePool;
use chrono::Utc;
use crate::models::user::{User, UserProfile};
use crate::utils::errors::StoryBotError;

const USER_COLUMNS: &str = "user_id, username, first_name, last_name, is_approved, is_admin, is_subscribed, is_premium, joined_at, last_active_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the user on first contact, otherwise refresh the profile and
    /// last-active timestamp. Approval and subscription flags are never reset.
    pub async fn upsert_profile(&self, profile: &UserProfile) -> Result<User, StoryBotError> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (user_id, username, first_name, last_name, joined_at, last_active_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                username = excluded.username,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                last_active_at = excluded.last_active_at
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(profile.user_id)
        .bind(&profile.username)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Make sure the configured admin has an approved admin record
    pub async fn ensure_admin(&self, user_id: i64) -> Result<(), StoryBotError> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO users (user_id, first_name, is_approved, is_admin, joined_at, last_active_at)
            VALUES ($1, 'Admin', 1, 1, $2, $2)
            ON CONFLICT (user_id) DO UPDATE SET is_approved = 1, is_admin = 1
            "#
        )
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Find user by Telegram ID
    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, StoryBotError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Set the subscription flag. Only ever raised by a positive membership check.
    pub async fn mark_subscribed(&self, user_id: i64) -> Result<(), StoryBotError> {
        sqlx::query("UPDATE users SET is_subscribed = 1 WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List approved users, newest first
    pub async fn list_approved(&self) -> Result<Vec<User>, StoryBotError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_approved = 1 ORDER BY joined_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count approved users
    pub async fn count_approved(&self) -> Result<i64, StoryBotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_approved = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count premium users
    pub async fn count_premium(&self) -> Result<i64, StoryBotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_premium = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Delete user; pending requests go with it
    pub async fn delete(&self, user_id: i64) -> Result<bool, StoryBotError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
