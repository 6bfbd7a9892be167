//! Story catalog models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Story {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category_id: i64,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}

/// Story listing row joined with its category name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StorySummary {
    pub id: i64,
    pub title: String,
    pub category_name: String,
    pub is_premium: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStoryRequest {
    pub title: String,
    pub content: String,
    pub category_id: i64,
    pub is_premium: bool,
}
