//! User main menu

use teloxide::{Bot, types::{ChatId, MessageId}, prelude::*};
use crate::handlers::access::{can_see_premium, send_welcome, start_button_label};
use crate::handlers::commands::stories;
use crate::models::settings::SettingKey;
use crate::services::ServiceFactory;
use crate::ui::{keyboards, texts, MenuCommand};
use crate::utils::errors::Result;

/// Handle text from an approved user
pub async fn handle_user_text(bot: &Bot, chat_id: ChatId, text: &str, services: &ServiceFactory) -> Result<()> {
    let start_label = start_button_label(services).await?;

    match MenuCommand::from_label(text).filter(MenuCommand::is_user_command) {
        Some(MenuCommand::Categories) => show_categories_menu(bot, chat_id, services).await,
        Some(MenuCommand::About) => send_setting_text(bot, chat_id, services, SettingKey::AboutText).await,
        Some(MenuCommand::Contact) => send_setting_text(bot, chat_id, services, SettingKey::ContactText).await,
        _ if text.trim() == start_label.trim() => send_welcome(services, chat_id).await,
        _ => {
            bot.send_message(chat_id, texts::UNKNOWN_COMMAND)
                .reply_markup(keyboards::user_menu())
                .await?;
            Ok(())
        }
    }
}

pub async fn show_categories_menu(bot: &Bot, chat_id: ChatId, services: &ServiceFactory) -> Result<()> {
    stories::show_categories(bot, chat_id, services, None).await
}

/// About / contact texts
pub async fn send_setting_text(bot: &Bot, chat_id: ChatId, services: &ServiceFactory, key: SettingKey) -> Result<()> {
    let fallback = match key {
        SettingKey::AboutText => texts::DEFAULT_ABOUT,
        SettingKey::ContactText => texts::DEFAULT_CONTACT,
        SettingKey::WelcomeMessage => texts::DEFAULT_WELCOME,
        _ => "",
    };
    let text = services.database.settings.text_or(key, fallback).await?;
    bot.send_message(chat_id, text).await?;
    Ok(())
}

/// Where an inline catalog button leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogView {
    Categories,
    Category(i64),
    Story(i64),
}

/// Open a catalog page, honouring premium visibility
pub async fn open_catalog(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    view: CatalogView,
    services: &ServiceFactory,
    edit: Option<MessageId>,
) -> Result<()> {
    match view {
        CatalogView::Categories => stories::show_categories(bot, chat_id, services, edit).await,
        CatalogView::Category(category_id) => {
            let with_premium = can_see_premium(services, user_id).await?;
            stories::show_stories(bot, chat_id, services, category_id, with_premium, edit).await
        }
        CatalogView::Story(story_id) => {
            let with_premium = can_see_premium(services, user_id).await?;
            stories::show_story(bot, chat_id, services, story_id, with_premium, edit).await
        }
    }
}
