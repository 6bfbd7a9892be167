//! Join request model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::user::UserProfile;

/// A user waiting for the admin's decision
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JoinRequest {
    pub user_id: i64,
    pub username: Option<String>,
    pub display_name: String,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJoinRequest {
    pub user_id: i64,
    pub username: Option<String>,
    pub display_name: String,
}

impl From<&UserProfile> for CreateJoinRequest {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.user_id,
            username: profile.username.clone(),
            display_name: profile.display_name(),
        }
    }
}
