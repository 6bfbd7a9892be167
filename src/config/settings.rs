//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};
use crate::ui::texts;

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub access: AccessConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    pub token: String,
    pub admin_id: i64,
    /// Alternative Bot API server, e.g. a self-hosted one
    pub api_url: Option<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration for admin session storage.
///
/// Without a URL, sessions are kept in process memory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: Option<String>,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Initial access policy, seeded into the settings table on first start
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessConfig {
    pub approval_required: bool,
    pub auto_approve: bool,
    pub subscription_required: bool,
    pub channel: Option<String>,
}

/// Initial texts, seeded into the settings table on first start
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    pub welcome_message: String,
    pub about_text: String,
    pub contact_text: String,
    pub start_button_text: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_name: String,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("STORYBOT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        settings.apply_legacy_env();
        Ok(settings)
    }

    /// Honour the plain `TELEGRAM_BOT_TOKEN` / `ADMIN_ID` variables when the
    /// structured keys are not set.
    fn apply_legacy_env(&mut self) {
        if self.bot.token.is_empty() {
            if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
                self.bot.token = token;
            }
        }

        if self.bot.admin_id == 0 {
            if let Some(admin_id) = std::env::var("ADMIN_ID").ok().and_then(|v| v.trim().parse().ok()) {
                self.bot.admin_id = admin_id;
            }
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::StoryBotError> {
        super::validation::validate_settings(self)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://stories_bot.db?mode=rwc".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: None,
            prefix: "storybot:".to_string(),
            ttl_seconds: 3600,
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            approval_required: true,
            auto_approve: false,
            subscription_required: false,
            channel: None,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            welcome_message: texts::DEFAULT_WELCOME.to_string(),
            about_text: texts::DEFAULT_ABOUT.to_string(),
            contact_text: texts::DEFAULT_CONTACT.to_string(),
            start_button_text: texts::DEFAULT_START_BUTTON.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
            file_name: "storybot.log".to_string(),
            json: false,
        }
    }
}
