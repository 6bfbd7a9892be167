//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod user;
pub mod join_request;
pub mod content;
pub mod settings;

// Re-export repositories
pub use user::UserRepository;
pub use join_request::JoinRequestRepository;
pub use content::{CategoryRepository, StoryRepository};
pub use settings::SettingsRepository;
