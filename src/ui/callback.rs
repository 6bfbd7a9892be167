//! Inline button payloads

use std::fmt;
use std::str::FromStr;
use crate::models::settings::SettingKey;
use crate::utils::errors::StoryBotError;

/// Decoded `callback_data` of an inline button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackData {
    Approve(i64),
    Reject(i64),
    ApprovePremium(i64),
    CheckSubscription,
    Category(i64),
    Story(i64),
    Home,
    PickCategory(i64),
    Premium(bool),
    DeleteCategory(i64),
    DeleteStory(i64),
    Toggle(SettingKey),
}

impl fmt::Display for CallbackData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackData::Approve(id) => write!(f, "approve_{}", id),
            CallbackData::Reject(id) => write!(f, "reject_{}", id),
            CallbackData::ApprovePremium(id) => write!(f, "premium_{}", id),
            CallbackData::CheckSubscription => write!(f, "check_sub"),
            CallbackData::Category(id) => write!(f, "cat_{}", id),
            CallbackData::Story(id) => write!(f, "story_{}", id),
            CallbackData::Home => write!(f, "home"),
            CallbackData::PickCategory(id) => write!(f, "pickcat_{}", id),
            CallbackData::Premium(true) => write!(f, "prem_yes"),
            CallbackData::Premium(false) => write!(f, "prem_no"),
            CallbackData::DeleteCategory(id) => write!(f, "delcat_{}", id),
            CallbackData::DeleteStory(id) => write!(f, "delstory_{}", id),
            CallbackData::Toggle(key) => write!(f, "toggle_{}", key.as_str()),
        }
    }
}

impl FromStr for CallbackData {
    type Err = StoryBotError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        match data {
            "check_sub" => return Ok(CallbackData::CheckSubscription),
            "home" => return Ok(CallbackData::Home),
            "prem_yes" => return Ok(CallbackData::Premium(true)),
            "prem_no" => return Ok(CallbackData::Premium(false)),
            _ => {}
        }

        let invalid = || StoryBotError::InvalidInput(format!("Unknown callback data: {}", data));
        let (action, arg) = data.split_once('_').ok_or_else(invalid)?;

        if action == "toggle" {
            return SettingKey::parse(arg)
                .filter(|key| key.is_flag())
                .map(CallbackData::Toggle)
                .ok_or_else(invalid);
        }

        let id: i64 = arg.parse().map_err(|_| invalid())?;
        match action {
            "approve" => Ok(CallbackData::Approve(id)),
            "reject" => Ok(CallbackData::Reject(id)),
            "premium" => Ok(CallbackData::ApprovePremium(id)),
            "cat" => Ok(CallbackData::Category(id)),
            "story" => Ok(CallbackData::Story(id)),
            "pickcat" => Ok(CallbackData::PickCategory(id)),
            "delcat" => Ok(CallbackData::DeleteCategory(id)),
            "delstory" => Ok(CallbackData::DeleteStory(id)),
            _ => Err(invalid()),
        }
    }
}
