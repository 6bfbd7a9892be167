//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the StoryBot application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{ErrorSeverity, Result, StoryBotError};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.directory)?;

    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(stdout_layer)
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| StoryBotError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<i64>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log the outcome of an access gate evaluation
pub fn log_access_decision(user_id: i64, decision: &str) {
    debug!(user_id = user_id, decision = decision, "Access gate evaluated");
}

/// Log an outbound message that could not be delivered
pub fn log_notification_failure(chat_id: i64, purpose: &str, reason: &str) {
    warn!(
        chat_id = chat_id,
        purpose = purpose,
        reason = reason,
        "Notification not delivered"
    );
}

/// Log a handler error at the level matching its severity
pub fn log_handler_error(context: &str, err: &StoryBotError) {
    match err.severity() {
        ErrorSeverity::Info => info!(context = context, error = %err, "Handler finished with user error"),
        ErrorSeverity::Warning => warn!(context = context, error = %err, "Handler finished with warning"),
        ErrorSeverity::Error => error!(context = context, error = %err, recoverable = err.is_recoverable(), "Handler failed"),
        ErrorSeverity::Critical => error!(context = context, error = %err, severity = %err.severity(), "Handler failed with critical error"),
    }
}
