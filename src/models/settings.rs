//! Runtime bot settings

use serde::{Deserialize, Serialize};
use crate::utils::helpers::normalize_channel;

/// Keys of the `bot_settings` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKey {
    WelcomeMessage,
    AboutText,
    ContactText,
    StartButtonText,
    ApprovalRequired,
    AutoApprove,
    SubscriptionRequired,
    Channel,
}

impl SettingKey {
    pub const ALL: [SettingKey; 8] = [
        SettingKey::WelcomeMessage,
        SettingKey::AboutText,
        SettingKey::ContactText,
        SettingKey::StartButtonText,
        SettingKey::ApprovalRequired,
        SettingKey::AutoApprove,
        SettingKey::SubscriptionRequired,
        SettingKey::Channel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::WelcomeMessage => "welcome_message",
            SettingKey::AboutText => "about_text",
            SettingKey::ContactText => "contact_text",
            SettingKey::StartButtonText => "start_button_text",
            SettingKey::ApprovalRequired => "approval_required",
            SettingKey::AutoApprove => "auto_approve",
            SettingKey::SubscriptionRequired => "subscription_required",
            SettingKey::Channel => "channel",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == value)
    }

    /// Whether the setting holds a "0"/"1" flag
    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            SettingKey::ApprovalRequired | SettingKey::AutoApprove | SettingKey::SubscriptionRequired
        )
    }
}

/// Access rules consulted by the gate on every update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    pub approval_required: bool,
    pub auto_approve: bool,
    pub subscription_required: bool,
    pub channel: Option<String>,
}

impl AccessPolicy {
    /// Channel users must join, or `None` when the subscription gate is off
    pub fn required_channel(&self) -> Option<&str> {
        if self.subscription_required {
            self.channel.as_deref()
        } else {
            None
        }
    }

    pub fn from_values(
        approval_required: Option<&str>,
        auto_approve: Option<&str>,
        subscription_required: Option<&str>,
        channel: Option<&str>,
    ) -> Self {
        Self {
            approval_required: approval_required.map(parse_flag).unwrap_or(true),
            auto_approve: auto_approve.map(parse_flag).unwrap_or(false),
            subscription_required: subscription_required.map(parse_flag).unwrap_or(false),
            channel: normalize_channel(channel),
        }
    }
}

/// Decode a stored flag
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "yes" | "on")
}

/// Encode a flag for storage
pub fn flag_value(enabled: bool) -> &'static str {
    if enabled { "1" } else { "0" }
}
