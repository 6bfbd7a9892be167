//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use tracing::warn;
use crate::utils::errors::{StoryBotError, Result};
use crate::utils::helpers::{is_valid_channel, normalize_channel};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_access_config(&settings.access)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(StoryBotError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.admin_id <= 0 {
        return Err(StoryBotError::Config(
            "Admin ID must be configured".to_string()
        ));
    }

    if let Some(ref api_url) = config.api_url {
        url::Url::parse(api_url)?;
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(StoryBotError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(StoryBotError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(StoryBotError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if matches!(config.url.as_deref(), Some(url) if url.is_empty()) {
        return Err(StoryBotError::Config(
            "Redis URL must not be empty when set".to_string()
        ));
    }

    if config.ttl_seconds == 0 {
        return Err(StoryBotError::Config(
            "Session TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate access policy configuration
fn validate_access_config(config: &super::AccessConfig) -> Result<()> {
    match normalize_channel(config.channel.as_deref()) {
        Some(channel) if !is_valid_channel(&channel) => {
            return Err(StoryBotError::Config(
                format!("Invalid channel identifier: {}", channel)
            ));
        }
        None if config.subscription_required => {
            warn!("Subscription is required but no channel is configured; the check is skipped");
        }
        _ => {}
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(StoryBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(StoryBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
