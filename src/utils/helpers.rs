//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use crate::utils::errors::{Result, StoryBotError};

/// Placeholder channel shipped in sample configurations
pub const PLACEHOLDER_CHANNEL: &str = "@your_channel";

/// Telegram rejects messages longer than 4096 characters
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Parse a user id typed by an admin
pub fn parse_user_id(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(StoryBotError::InvalidInput(format!("'{}' is not a valid user id", trimmed))),
    }
}

/// Normalize a channel identifier, returning `None` when no real channel is set.
///
/// Accepts `@username` or a numeric chat id such as `-1001234567890`.
pub fn normalize_channel(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() || value == PLACEHOLDER_CHANNEL {
        return None;
    }
    Some(value.to_string())
}

/// Check that a channel identifier is `@username` or a numeric chat id
pub fn is_valid_channel(value: &str) -> bool {
    let value = value.trim();
    if let Some(name) = value.strip_prefix('@') {
        name.len() >= 4 && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    } else {
        value.parse::<i64>().is_ok()
    }
}

/// Public link for a channel, when it has a username
pub fn channel_link(channel: &str) -> Option<String> {
    channel.strip_prefix('@').map(|name| format!("https://t.me/{}", name))
}

/// Build a display name from Telegram name parts
pub fn display_name(first_name: &str, last_name: Option<&str>) -> String {
    match last_name {
        Some(last) if !last.is_empty() => format!("{} {}", first_name, last),
        _ => first_name.to_string(),
    }
}
