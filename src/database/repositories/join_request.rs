//! Join request queue

use sqlx::SqlitePool;
use chrono::Utc;
use crate::models::join_request::{JoinRequest, CreateJoinRequest};
use crate::utils::errors::StoryBotError;

#[derive(Clone)]
#[derive(Debug)]
pub struct JoinRequestRepository {
    pool: SqlitePool,
}

impl JoinRequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or refresh the pending request for a user.
    ///
    /// Returns `true` when no request existed before. The user row must
    /// already exist. Both statements write straight away, so concurrent
    /// callers queue on the database lock instead of failing to upgrade it.
    pub async fn enqueue(&self, request: &CreateJoinRequest) -> Result<bool, StoryBotError> {
        let now = Utc::now();

        let inserted = sqlx::query(
            r#"
            INSERT INTO join_requests (user_id, username, display_name, requested_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO NOTHING
            "#
        )
        .bind(request.user_id)
        .bind(&request.username)
        .bind(&request.display_name)
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted == 1 {
            return Ok(true);
        }

        sqlx::query(
            "UPDATE join_requests SET username = $2, display_name = $3, requested_at = $4 WHERE user_id = $1"
        )
        .bind(request.user_id)
        .bind(&request.username)
        .bind(&request.display_name)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(false)
    }

    /// Remove the pending request, if any. Returns whether one was removed.
    pub async fn resolve(&self, user_id: i64) -> Result<bool, StoryBotError> {
        let result = sqlx::query("DELETE FROM join_requests WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find the pending request for a user
    pub async fn find(&self, user_id: i64) -> Result<Option<JoinRequest>, StoryBotError> {
        let request = sqlx::query_as::<_, JoinRequest>(
            "SELECT user_id, username, display_name, requested_at FROM join_requests WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// All pending requests, newest first
    pub async fn list(&self) -> Result<Vec<JoinRequest>, StoryBotError> {
        let requests = sqlx::query_as::<_, JoinRequest>(
            "SELECT user_id, username, display_name, requested_at FROM join_requests ORDER BY requested_at DESC, user_id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Count pending requests
    pub async fn count(&self) -> Result<i64, StoryBotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM join_requests")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
