//! Admin wizard state machine
//!
//! Multi-step admin flows (add category, add story, delete user, edit a
//! setting, set the channel) are modelled as an [`AdminSession`] per admin.
//! [`AdminSession::advance`] is pure: it validates one input and returns the
//! next state together with the [`WizardEffect`] the handler must perform.
//! Invalid input leaves the session untouched so the admin can retry.

use serde::{Deserialize, Serialize};
use crate::models::content::CreateStoryRequest;
use crate::models::settings::SettingKey;
use crate::utils::errors::{Result, StoryBotError};
use crate::utils::helpers::{is_valid_channel, parse_user_id};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AdminSession {
    #[default]
    Idle,
    AwaitingCategoryName,
    AwaitingStoryTitle,
    AwaitingStoryContent { title: String },
    AwaitingStoryCategory { title: String, content: String },
    AwaitingStoryPremium { title: String, content: String, category_id: i64 },
    AwaitingUserId,
    AwaitingSettingText { key: SettingKey },
    AwaitingChannel,
}

/// One piece of admin input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardInput {
    Text(String),
    Category(i64),
    Premium(bool),
}

impl WizardInput {
    fn kind(&self) -> &'static str {
        match self {
            WizardInput::Text(_) => "text",
            WizardInput::Category(_) => "category",
            WizardInput::Premium(_) => "premium",
        }
    }
}

/// What the handler does after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    CreateCategory(String),
    AskContent,
    AskCategory,
    AskPremium,
    CreateStory(CreateStoryRequest),
    DeleteUser(i64),
    UpdateSetting { key: SettingKey, value: String },
    SetChannel(String),
}

impl AdminSession {
    pub fn name(&self) -> &'static str {
        match self {
            AdminSession::Idle => "idle",
            AdminSession::AwaitingCategoryName => "awaiting_category_name",
            AdminSession::AwaitingStoryTitle => "awaiting_story_title",
            AdminSession::AwaitingStoryContent { .. } => "awaiting_story_content",
            AdminSession::AwaitingStoryCategory { .. } => "awaiting_story_category",
            AdminSession::AwaitingStoryPremium { .. } => "awaiting_story_premium",
            AdminSession::AwaitingUserId => "awaiting_user_id",
            AdminSession::AwaitingSettingText { .. } => "awaiting_setting_text",
            AdminSession::AwaitingChannel => "awaiting_channel",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, AdminSession::Idle)
    }

    /// Whether the current step is answered by typing text
    pub fn expects_text(&self) -> bool {
        !matches!(
            self,
            AdminSession::Idle
                | AdminSession::AwaitingStoryCategory { .. }
                | AdminSession::AwaitingStoryPremium { .. }
        )
    }

    /// Reset to idle
    pub fn cancel(&self) -> AdminSession {
        AdminSession::Idle
    }

    pub fn advance(&self, input: WizardInput) -> Result<(AdminSession, WizardEffect)> {
        match (self, input) {
            (AdminSession::AwaitingCategoryName, WizardInput::Text(text)) => {
                let name = non_empty(&text)?;
                Ok((AdminSession::Idle, WizardEffect::CreateCategory(name)))
            }
            (AdminSession::AwaitingStoryTitle, WizardInput::Text(text)) => {
                let title = non_empty(&text)?;
                Ok((AdminSession::AwaitingStoryContent { title }, WizardEffect::AskContent))
            }
            (AdminSession::AwaitingStoryContent { title }, WizardInput::Text(text)) => {
                let content = non_empty(&text)?;
                Ok((
                    AdminSession::AwaitingStoryCategory { title: title.clone(), content },
                    WizardEffect::AskCategory,
                ))
            }
            (AdminSession::AwaitingStoryCategory { title, content }, WizardInput::Category(category_id)) => Ok((
                AdminSession::AwaitingStoryPremium {
                    title: title.clone(),
                    content: content.clone(),
                    category_id,
                },
                WizardEffect::AskPremium,
            )),
            (AdminSession::AwaitingStoryPremium { title, content, category_id }, WizardInput::Premium(is_premium)) => Ok((
                AdminSession::Idle,
                WizardEffect::CreateStory(CreateStoryRequest {
                    title: title.clone(),
                    content: content.clone(),
                    category_id: *category_id,
                    is_premium,
                }),
            )),
            (AdminSession::AwaitingUserId, WizardInput::Text(text)) => {
                let user_id = parse_user_id(&text)?;
                Ok((AdminSession::Idle, WizardEffect::DeleteUser(user_id)))
            }
            (AdminSession::AwaitingSettingText { key }, WizardInput::Text(text)) => {
                let value = non_empty(&text)?;
                Ok((AdminSession::Idle, WizardEffect::UpdateSetting { key: *key, value }))
            }
            (AdminSession::AwaitingChannel, WizardInput::Text(text)) => {
                let channel = text.trim();
                if !is_valid_channel(channel) {
                    return Err(StoryBotError::InvalidInput(format!("'{}' is not a valid channel", channel)));
                }
                Ok((AdminSession::Idle, WizardEffect::SetChannel(channel.to_string())))
            }
            (state, input) => Err(StoryBotError::InvalidStateTransition {
                from: state.name().to_string(),
                to: input.kind().to_string(),
            }),
        }
    }
}

fn non_empty(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(StoryBotError::InvalidInput("Value cannot be empty".to_string()))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    #[test]
    fn test_add_story_flow() {
        let session = AdminSession::AwaitingStoryTitle;

        let (session, effect) = session.advance(WizardInput::Text("The Night".into())).unwrap();
        assert_eq!(effect, WizardEffect::AskContent);

        let (session, effect) = session.advance(WizardInput::Text("It was dark.".into())).unwrap();
        assert_eq!(effect, WizardEffect::AskCategory);
        assert!(!session.expects_text());

        let (session, effect) = session.advance(WizardInput::Category(3)).unwrap();
        assert_eq!(effect, WizardEffect::AskPremium);

        let (session, effect) = session.advance(WizardInput::Premium(true)).unwrap();
        assert!(session.is_idle());
        assert_eq!(
            effect,
            WizardEffect::CreateStory(CreateStoryRequest {
                title: "The Night".to_string(),
                content: "It was dark.".to_string(),
                category_id: 3,
                is_premium: true,
            })
        );
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let session = AdminSession::AwaitingCategoryName;
        assert_matches!(
            session.advance(WizardInput::Text("   ".into())),
            Err(StoryBotError::InvalidInput(_))
        );
    }

    #[test]
    fn test_mismatched_input_kind() {
        let session = AdminSession::AwaitingStoryCategory {
            title: "t".into(),
            content: "c".into(),
        };
        assert_matches!(
            session.advance(WizardInput::Text("Horror".into())),
            Err(StoryBotError::InvalidStateTransition { .. })
        );
        assert_matches!(
            AdminSession::Idle.advance(WizardInput::Premium(false)),
            Err(StoryBotError::InvalidStateTransition { .. })
        );
    }

    #[test]
    fn test_delete_user_and_channel() {
        let (session, effect) = AdminSession::AwaitingUserId
            .advance(WizardInput::Text(" 12345 ".into()))
            .unwrap();
        assert!(session.is_idle());
        assert_eq!(effect, WizardEffect::DeleteUser(12345));

        assert_matches!(
            AdminSession::AwaitingChannel.advance(WizardInput::Text("no spaces allowed".into())),
            Err(StoryBotError::InvalidInput(_))
        );
        let (_, effect) = AdminSession::AwaitingChannel
            .advance(WizardInput::Text("@stories".into()))
            .unwrap();
        assert_eq!(effect, WizardEffect::SetChannel("@stories".to_string()));
    }

    #[test]
    fn test_setting_text() {
        let session = AdminSession::AwaitingSettingText { key: SettingKey::AboutText };
        let (_, effect) = session.advance(WizardInput::Text("About us".into())).unwrap();
        assert_eq!(
            effect,
            WizardEffect::UpdateSetting { key: SettingKey::AboutText, value: "About us".to_string() }
        );
    }

    #[test]
    fn test_cancel_and_serialization() {
        let session = AdminSession::AwaitingStoryContent { title: "t".into() };
        assert!(session.cancel().is_idle());

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("awaiting_story_content"));
        let restored: AdminSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }

    proptest! {
        #[test]
        fn prop_non_numeric_user_id_keeps_waiting(input in "[^0-9]*") {
            let session = AdminSession::AwaitingUserId;
            prop_assert!(session.advance(WizardInput::Text(input)).is_err());
            prop_assert_eq!(session, AdminSession::AwaitingUserId);
        }
    }
}
