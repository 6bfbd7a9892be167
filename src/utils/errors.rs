//! Error handling for StoryBot
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for StoryBot application
#[derive(Error, Debug)]
pub enum StoryBotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for StoryBot operations
pub type Result<T> = std::result::Result<T, StoryBotError>;

impl StoryBotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoryBotError::Database(_) => false,
            StoryBotError::Migration(_) => false,
            StoryBotError::Telegram(_) => true,
            StoryBotError::Config(_) => false,
            StoryBotError::PermissionDenied(_) => true,
            StoryBotError::UserNotFound { .. } => true,
            StoryBotError::InvalidStateTransition { .. } => true,
            StoryBotError::Redis(_) => true,
            StoryBotError::Serialization(_) => false,
            StoryBotError::Io(_) => true,
            StoryBotError::UrlParse(_) => false,
            StoryBotError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StoryBotError::Database(_) => ErrorSeverity::Critical,
            StoryBotError::Migration(_) => ErrorSeverity::Critical,
            StoryBotError::Config(_) => ErrorSeverity::Critical,
            StoryBotError::PermissionDenied(_) => ErrorSeverity::Warning,
            StoryBotError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            StoryBotError::InvalidInput(_) => ErrorSeverity::Info,
            StoryBotError::UserNotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
