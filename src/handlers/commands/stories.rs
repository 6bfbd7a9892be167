//! Story catalog browsing

use teloxide::{Bot, types::{ChatId, InlineKeyboardMarkup, MessageId}, prelude::*};
use tracing::{debug, warn};
use crate::services::ServiceFactory;
use crate::ui::{keyboards, texts};
use crate::utils::errors::Result;
use crate::utils::helpers::{truncate_text, MAX_MESSAGE_CHARS};

/// Send a new message, or edit `edit` in place when browsing via buttons
async fn show(
    bot: &Bot,
    chat_id: ChatId,
    edit: Option<MessageId>,
    text: String,
    keyboard: InlineKeyboardMarkup,
) -> Result<()> {
    if let Some(message_id) = edit {
        match bot.edit_message_text(chat_id, message_id, text.clone()).reply_markup(keyboard.clone()).await {
            Ok(_) => return Ok(()),
            Err(e) => warn!(chat_id = ?chat_id, error = %e, "Failed to edit catalog message, sending a new one"),
        }
    }

    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}

/// Category list
pub async fn show_categories(
    bot: &Bot,
    chat_id: ChatId,
    services: &ServiceFactory,
    edit: Option<MessageId>,
) -> Result<()> {
    let categories = services.database.categories.list().await?;

    if categories.is_empty() {
        bot.send_message(chat_id, texts::NO_CATEGORIES).await?;
        return Ok(());
    }

    show(bot, chat_id, edit, texts::CHOOSE_CATEGORY.to_string(), keyboards::category_list(&categories)).await
}

/// Stories of a category. Premium stories are listed only for premium viewers.
pub async fn show_stories(
    bot: &Bot,
    chat_id: ChatId,
    services: &ServiceFactory,
    category_id: i64,
    with_premium: bool,
    edit: Option<MessageId>,
) -> Result<()> {
    let Some(category) = services.database.categories.find_by_id(category_id).await? else {
        debug!(category_id = category_id, "Category no longer exists");
        return show_categories(bot, chat_id, services, edit).await;
    };

    let stories: Vec<_> = services
        .database
        .stories
        .list_by_category(category_id)
        .await?
        .into_iter()
        .filter(|story| with_premium || !story.is_premium)
        .collect();

    let text = if stories.is_empty() {
        format!("📂 {}\n\n{}", category.name, texts::NO_STORIES)
    } else {
        format!("📂 {}", category.name)
    };

    show(bot, chat_id, edit, text, keyboards::story_list(&stories)).await
}

pub async fn show_story(
    bot: &Bot,
    chat_id: ChatId,
    services: &ServiceFactory,
    story_id: i64,
    with_premium: bool,
    edit: Option<MessageId>,
) -> Result<()> {
    let Some(story) = services.database.stories.find_by_id(story_id).await? else {
        bot.send_message(chat_id, texts::STORY_NOT_FOUND).await?;
        return Ok(());
    };

    if story.is_premium && !with_premium {
        bot.send_message(chat_id, texts::PREMIUM_ONLY).await?;
        return Ok(());
    }

    let text = truncate_text(&format!("📖 {}\n\n{}", story.title, story.content), MAX_MESSAGE_CHARS);
    show(bot, chat_id, edit, text, keyboards::story_footer(story.category_id)).await
}
