//! Access gate replies shared by all user-facing handlers

use teloxide::types::{ChatId, User};
use crate::models::settings::SettingKey;
use crate::models::user::UserProfile;
use crate::services::{AccessDecision, ServiceFactory};
use crate::ui::{keyboards, texts};
use crate::utils::errors::Result;

/// Run the access gate for `user` and tell them why they are blocked.
///
/// Returns `true` when the handler may continue.
pub async fn admit(services: &ServiceFactory, chat_id: ChatId, user: &User, recheck: bool) -> Result<bool> {
    let profile = UserProfile::from(user);
    let decision = services.access_gate.evaluate(&profile, recheck).await?;

    match decision {
        AccessDecision::Allow => return Ok(true),
        AccessDecision::BlockPending { newly_queued } => {
            let text = if newly_queued { texts::PENDING_REVIEW } else { texts::STILL_UNDER_REVIEW };
            let label = start_button_label(services).await?;
            services
                .notifier
                .send(chat_id.0, "pending", text, Some(keyboards::start_keyboard(&label).into()))
                .await;
        }
        AccessDecision::BlockSubscription { channel } => {
            let text = if recheck { texts::NOT_SUBSCRIBED_YET } else { texts::SUBSCRIBE_FIRST };
            services
                .notifier
                .send(chat_id.0, "subscription_prompt", text, Some(keyboards::subscription_prompt(&channel).into()))
                .await;
        }
    }

    Ok(false)
}

/// Whether the user may open premium stories
pub async fn can_see_premium(services: &ServiceFactory, user_id: i64) -> Result<bool> {
    if services.auth.is_admin(user_id) {
        return Ok(true);
    }

    Ok(services
        .database
        .users
        .find_by_id(user_id)
        .await?
        .map(|user| user.is_premium)
        .unwrap_or(false))
}

/// Label of the configurable start button
pub async fn start_button_label(services: &ServiceFactory) -> Result<String> {
    services
        .database
        .settings
        .text_or(SettingKey::StartButtonText, texts::DEFAULT_START_BUTTON)
        .await
}

/// Welcome text with the user main menu
pub async fn send_welcome(services: &ServiceFactory, chat_id: ChatId) -> Result<()> {
    let welcome = services
        .database
        .settings
        .text_or(SettingKey::WelcomeMessage, texts::DEFAULT_WELCOME)
        .await?;

    services
        .notifier
        .send(chat_id.0, "welcome", welcome, Some(keyboards::user_menu().into()))
        .await;
    Ok(())
}
