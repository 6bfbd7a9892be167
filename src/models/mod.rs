//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod join_request;
pub mod content;
pub mod settings;

// Re-export commonly used models
pub use user::{User, UserProfile};
pub use join_request::{JoinRequest, CreateJoinRequest};
pub use content::{Category, Story, StorySummary, CreateStoryRequest};
pub use settings::{SettingKey, AccessPolicy};
