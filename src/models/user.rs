//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::utils::helpers::display_name;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub is_approved: bool,
    pub is_admin: bool,
    pub is_subscribed: bool,
    pub is_premium: bool,
    pub joined_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, self.last_name.as_deref())
    }
}

/// Identity carried by every inbound update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl UserProfile {
    pub fn new(user_id: i64, first_name: impl Into<String>) -> Self {
        Self {
            user_id,
            username: None,
            first_name: first_name.into(),
            last_name: None,
        }
    }

    pub fn display_name(&self) -> String {
        display_name(&self.first_name, self.last_name.as_deref())
    }
}

impl From<&teloxide::types::User> for UserProfile {
    fn from(user: &teloxide::types::User) -> Self {
        Self {
            user_id: user.id.0 as i64,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}
