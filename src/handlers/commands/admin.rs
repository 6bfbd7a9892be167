//! Admin panel handlers
//!
//! Reply keyboard navigation, the multi-step wizards and the inline admin
//! actions (delete pickers, access rule toggles).

use teloxide::{Bot, types::{ChatId, Message, MessageId, ReplyMarkup}, prelude::*};
use tracing::{debug, warn};
use crate::handlers::access::{send_welcome, start_button_label};
use crate::handlers::commands::user;
use crate::models::settings::{flag_value, SettingKey};
use crate::services::ServiceFactory;
use crate::state::{AdminSession, StateStorage, WizardEffect, WizardInput};
use crate::ui::{keyboards, texts, MenuCommand};
use crate::utils::errors::{Result, StoryBotError};
use crate::utils::helpers::{format_timestamp, truncate_text, MAX_MESSAGE_CHARS};
use crate::utils::logging::log_admin_action;

/// Handle /admin command
pub async fn handle_admin_command(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    if services.auth.check_admin_user(user).is_err() {
        bot.send_message(msg.chat.id, texts::NO_PERMISSION).await?;
        return Ok(());
    }

    let admin_id = user.id.0 as i64;
    state_storage.reset(admin_id).await?;
    show_admin_panel(&bot, msg.chat.id).await
}

pub async fn show_admin_panel(bot: &Bot, chat_id: ChatId) -> Result<()> {
    bot.send_message(chat_id, texts::ADMIN_PANEL)
        .reply_markup(keyboards::admin_panel())
        .await?;
    Ok(())
}

/// Abandon the current wizard
pub async fn cancel(bot: &Bot, chat_id: ChatId, admin_id: i64, state_storage: &StateStorage) -> Result<()> {
    state_storage.reset(admin_id).await?;
    bot.send_message(chat_id, texts::CANCELLED)
        .reply_markup(keyboards::admin_panel())
        .await?;
    Ok(())
}

async fn reply(bot: &Bot, chat_id: ChatId, text: impl Into<String>, keyboard: impl Into<ReplyMarkup>) -> Result<()> {
    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}

/// Start a wizard step that waits for typed text
async fn begin(
    bot: &Bot,
    chat_id: ChatId,
    admin_id: i64,
    state_storage: &StateStorage,
    session: AdminSession,
    prompt: String,
) -> Result<()> {
    state_storage.save(admin_id, &session).await?;
    reply(bot, chat_id, prompt, keyboards::cancel_keyboard()).await
}

/// Handle a reply keyboard button pressed by the admin
pub async fn handle_menu_command(
    bot: &Bot,
    chat_id: ChatId,
    admin_id: i64,
    command: MenuCommand,
    services: &ServiceFactory,
    state_storage: &StateStorage,
) -> Result<()> {
    debug!(admin_id = admin_id, command = ?command, "Admin menu command");

    match command {
        MenuCommand::Categories => user::show_categories_menu(bot, chat_id, services).await,
        MenuCommand::About => user::send_setting_text(bot, chat_id, services, SettingKey::AboutText).await,
        MenuCommand::Contact => user::send_setting_text(bot, chat_id, services, SettingKey::ContactText).await,

        MenuCommand::Users => reply(bot, chat_id, MenuCommand::Users.label(), keyboards::users_menu()).await,
        MenuCommand::ManageCategories => {
            reply(bot, chat_id, MenuCommand::ManageCategories.label(), keyboards::categories_menu()).await
        }
        MenuCommand::ManageStories => {
            reply(bot, chat_id, MenuCommand::ManageStories.label(), keyboards::stories_menu()).await
        }
        MenuCommand::Settings => show_settings(bot, chat_id, services).await,
        MenuCommand::Statistics => show_statistics(bot, chat_id, services).await,
        MenuCommand::UserMode => send_welcome(services, chat_id).await,

        MenuCommand::ListUsers => list_users(bot, chat_id, services).await,
        MenuCommand::PendingRequests => list_pending(bot, chat_id, admin_id, services).await,
        MenuCommand::DeleteUser => {
            begin(bot, chat_id, admin_id, state_storage, AdminSession::AwaitingUserId, texts::ENTER_USER_ID.to_string()).await
        }

        MenuCommand::ListCategories => list_categories(bot, chat_id, services).await,
        MenuCommand::AddCategory => {
            let prompt = texts::ENTER_CATEGORY_NAME.to_string();
            begin(bot, chat_id, admin_id, state_storage, AdminSession::AwaitingCategoryName, prompt).await
        }
        MenuCommand::DeleteCategory => {
            let categories = services.database.categories.list().await?;
            if categories.is_empty() {
                return reply(bot, chat_id, texts::NO_CATEGORIES, keyboards::categories_menu()).await;
            }
            reply(bot, chat_id, "🗑 Choose a category to delete (its stories are deleted too):", keyboards::delete_category_picker(&categories)).await
        }

        MenuCommand::ListStories => list_stories(bot, chat_id, services).await,
        MenuCommand::AddStory => {
            if services.database.categories.count().await? == 0 {
                return reply(bot, chat_id, texts::NEED_CATEGORY_FIRST, keyboards::stories_menu()).await;
            }
            let prompt = texts::ENTER_STORY_TITLE.to_string();
            begin(bot, chat_id, admin_id, state_storage, AdminSession::AwaitingStoryTitle, prompt).await
        }
        MenuCommand::DeleteStory => {
            let stories = services.database.stories.list_summaries().await?;
            if stories.is_empty() {
                return reply(bot, chat_id, "📭 There are no stories yet.", keyboards::stories_menu()).await;
            }
            reply(bot, chat_id, "🗑 Choose a story to delete:", keyboards::delete_story_picker(&stories)).await
        }

        MenuCommand::EditWelcome => edit_setting(bot, chat_id, admin_id, services, state_storage, SettingKey::WelcomeMessage).await,
        MenuCommand::EditAbout => edit_setting(bot, chat_id, admin_id, services, state_storage, SettingKey::AboutText).await,
        MenuCommand::EditContact => edit_setting(bot, chat_id, admin_id, services, state_storage, SettingKey::ContactText).await,
        MenuCommand::EditStartButton => {
            edit_setting(bot, chat_id, admin_id, services, state_storage, SettingKey::StartButtonText).await
        }
        MenuCommand::AccessRules => {
            let policy = services.database.settings.access_policy().await?;
            reply(bot, chat_id, "🔐 Access rules:", keyboards::access_toggles(&policy)).await
        }
        MenuCommand::SetChannel => {
            let current = services.database.settings.get(SettingKey::Channel).await?;
            let prompt = format!(
                "📢 Current channel: {}\n\n{}",
                current.as_deref().unwrap_or("-"),
                texts::ENTER_CHANNEL
            );
            begin(bot, chat_id, admin_id, state_storage, AdminSession::AwaitingChannel, prompt).await
        }

        MenuCommand::Back => show_admin_panel(bot, chat_id).await,
        MenuCommand::Cancel => cancel(bot, chat_id, admin_id, state_storage).await,
    }
}

async fn edit_setting(
    bot: &Bot,
    chat_id: ChatId,
    admin_id: i64,
    services: &ServiceFactory,
    state_storage: &StateStorage,
    key: SettingKey,
) -> Result<()> {
    let current = services.database.settings.get(key).await?.unwrap_or_default();
    let prompt = format!("📝 Current value:\n{}\n\n{}", current, texts::ENTER_SETTING_TEXT);
    begin(bot, chat_id, admin_id, state_storage, AdminSession::AwaitingSettingText { key }, prompt).await
}

async fn show_settings(bot: &Bot, chat_id: ChatId, services: &ServiceFactory) -> Result<()> {
    let policy = services.database.settings.access_policy().await?;
    let start_label = start_button_label(services).await?;
    let on_off = |enabled: bool| if enabled { "on" } else { "off" };

    let text = format!(
        "⚙️ Settings\n\n🔐 Approval required: {}\n⚡ Auto-approve: {}\n📢 Subscription required: {}\n📡 Channel: {}\n🚀 Start button: {}",
        on_off(policy.approval_required),
        on_off(policy.auto_approve),
        on_off(policy.subscription_required),
        policy.channel.as_deref().unwrap_or("-"),
        start_label,
    );

    reply(bot, chat_id, text, keyboards::settings_menu()).await
}

async fn show_statistics(bot: &Bot, chat_id: ChatId, services: &ServiceFactory) -> Result<()> {
    let stats = services.database.get_stats().await?;
    let text = format!(
        "📊 Statistics\n\n👥 Approved users: {}\n🌟 Premium users: {}\n⏳ Pending requests: {}\n📂 Categories: {}\n📖 Stories: {}",
        stats.approved_users, stats.premium_users, stats.pending_requests, stats.categories, stats.stories,
    );
    reply(bot, chat_id, text, keyboards::admin_panel()).await
}

async fn list_users(bot: &Bot, chat_id: ChatId, services: &ServiceFactory) -> Result<()> {
    let users = services.database.users.list_approved().await?;
    if users.is_empty() {
        return reply(bot, chat_id, texts::NO_USERS, keyboards::users_menu()).await;
    }

    let mut text = format!("👥 Approved users ({})\n", users.len());
    for user in &users {
        let username = user.username.as_deref().map(|name| format!(" @{}", name)).unwrap_or_default();
        let premium = if user.is_premium { " 🌟" } else { "" };
        text.push_str(&format!(
            "\n• {}{} ({}){} - {}",
            user.display_name(),
            username,
            user.user_id,
            premium,
            format_timestamp(user.joined_at),
        ));
    }

    reply(bot, chat_id, truncate_text(&text, MAX_MESSAGE_CHARS), keyboards::users_menu()).await
}

/// Re-send every pending request with its decision controls
async fn list_pending(bot: &Bot, chat_id: ChatId, admin_id: i64, services: &ServiceFactory) -> Result<()> {
    let requests = services.database.join_requests.list().await?;
    if requests.is_empty() {
        return reply(bot, chat_id, texts::NO_PENDING_REQUESTS, keyboards::users_menu()).await;
    }

    reply(bot, chat_id, format!("⏳ Pending requests: {}", requests.len()), keyboards::users_menu()).await?;
    for request in &requests {
        services.notifier.notify_join_request(admin_id, request).await;
    }
    Ok(())
}

async fn list_categories(bot: &Bot, chat_id: ChatId, services: &ServiceFactory) -> Result<()> {
    let categories = services.database.categories.list().await?;
    if categories.is_empty() {
        return reply(bot, chat_id, texts::NO_CATEGORIES, keyboards::categories_menu()).await;
    }

    let lines: Vec<String> = categories.iter().map(|c| format!("• {} (#{})", c.name, c.id)).collect();
    let text = format!("📂 Categories ({})\n\n{}", categories.len(), lines.join("\n"));
    reply(bot, chat_id, truncate_text(&text, MAX_MESSAGE_CHARS), keyboards::categories_menu()).await
}

async fn list_stories(bot: &Bot, chat_id: ChatId, services: &ServiceFactory) -> Result<()> {
    let stories = services.database.stories.list_summaries().await?;
    if stories.is_empty() {
        return reply(bot, chat_id, "📭 There are no stories yet.", keyboards::stories_menu()).await;
    }

    let lines: Vec<String> = stories
        .iter()
        .map(|s| {
            let premium = if s.is_premium { " 🌟" } else { "" };
            format!("• {}{} [{}]", s.title, premium, s.category_name)
        })
        .collect();
    let text = format!("📖 Stories ({})\n\n{}", stories.len(), lines.join("\n"));
    reply(bot, chat_id, truncate_text(&text, MAX_MESSAGE_CHARS), keyboards::stories_menu()).await
}

/// Feed one input into the admin's wizard
pub async fn handle_wizard_input(
    bot: &Bot,
    chat_id: ChatId,
    admin_id: i64,
    input: WizardInput,
    services: &ServiceFactory,
    state_storage: &StateStorage,
) -> Result<()> {
    let session = state_storage.load(admin_id).await?;

    let (next, effect) = match session.advance(input) {
        Ok(transition) => transition,
        Err(StoryBotError::InvalidInput(reason)) => {
            debug!(admin_id = admin_id, state = session.name(), reason = %reason, "Rejected wizard input");
            let text = match session {
                AdminSession::AwaitingUserId => texts::INVALID_USER_ID,
                AdminSession::AwaitingChannel => texts::INVALID_CHANNEL,
                _ => texts::EMPTY_INPUT,
            };
            bot.send_message(chat_id, text).await?;
            return Ok(());
        }
        Err(StoryBotError::InvalidStateTransition { from, to }) => {
            warn!(admin_id = admin_id, from = %from, to = %to, "Unexpected wizard input");
            return reprompt(bot, chat_id, &session, services).await;
        }
        Err(e) => return Err(e),
    };

    match effect {
        WizardEffect::CreateCategory(name) => {
            if services.database.categories.find_by_name(&name).await?.is_some() {
                bot.send_message(chat_id, texts::CATEGORY_EXISTS).await?;
                return Ok(());
            }
            let category = services.database.categories.create(&name).await?;
            log_admin_action(admin_id, "create_category", Some(category.id), Some(&category.name));
            state_storage.save(admin_id, &next).await?;
            reply(bot, chat_id, format!("✅ Category \"{}\" created.", category.name), keyboards::categories_menu()).await
        }
        WizardEffect::AskContent => {
            state_storage.save(admin_id, &next).await?;
            bot.send_message(chat_id, texts::ENTER_STORY_CONTENT).await?;
            Ok(())
        }
        WizardEffect::AskCategory => {
            let categories = services.database.categories.list().await?;
            if categories.is_empty() {
                state_storage.reset(admin_id).await?;
                return reply(bot, chat_id, texts::NEED_CATEGORY_FIRST, keyboards::stories_menu()).await;
            }
            state_storage.save(admin_id, &next).await?;
            reply(bot, chat_id, texts::PICK_STORY_CATEGORY, keyboards::pick_category(&categories)).await
        }
        WizardEffect::AskPremium => {
            state_storage.save(admin_id, &next).await?;
            reply(bot, chat_id, texts::ASK_PREMIUM, keyboards::premium_choice()).await
        }
        WizardEffect::CreateStory(request) => {
            state_storage.save(admin_id, &next).await?;
            if services.database.categories.find_by_id(request.category_id).await?.is_none() {
                return reply(bot, chat_id, "❌ The chosen category no longer exists.", keyboards::stories_menu()).await;
            }
            let story = services.database.stories.create(&request).await?;
            log_admin_action(admin_id, "create_story", Some(story.id), Some(&story.title));
            reply(bot, chat_id, format!("✅ Story \"{}\" saved.", story.title), keyboards::stories_menu()).await
        }
        WizardEffect::DeleteUser(user_id) => {
            state_storage.save(admin_id, &next).await?;
            if services.auth.is_admin(user_id) {
                return reply(bot, chat_id, "❌ The admin account cannot be deleted.", keyboards::users_menu()).await;
            }
            match services.database.delete_user(user_id).await {
                Ok(()) => {
                    log_admin_action(admin_id, "delete_user", Some(user_id), None);
                    reply(bot, chat_id, format!("✅ User {} deleted.", user_id), keyboards::users_menu()).await
                }
                Err(StoryBotError::UserNotFound { user_id }) => {
                    reply(bot, chat_id, format!("❌ User {} not found.", user_id), keyboards::users_menu()).await
                }
                Err(e) => Err(e),
            }
        }
        WizardEffect::UpdateSetting { key, value } => {
            services.database.settings.set(key, &value).await?;
            log_admin_action(admin_id, "update_setting", None, Some(key.as_str()));
            state_storage.save(admin_id, &next).await?;
            reply(bot, chat_id, texts::SETTING_SAVED, keyboards::settings_menu()).await
        }
        WizardEffect::SetChannel(channel) => {
            services.database.settings.set(SettingKey::Channel, &channel).await?;
            log_admin_action(admin_id, "set_channel", None, Some(&channel));
            state_storage.save(admin_id, &next).await?;
            reply(bot, chat_id, format!("✅ Channel set to {}.", channel), keyboards::settings_menu()).await
        }
    }
}

/// Repeat the question of the current wizard step
pub async fn reprompt(bot: &Bot, chat_id: ChatId, session: &AdminSession, services: &ServiceFactory) -> Result<()> {
    match session {
        AdminSession::Idle => show_admin_panel(bot, chat_id).await,
        AdminSession::AwaitingStoryCategory { .. } => {
            let categories = services.database.categories.list().await?;
            reply(bot, chat_id, texts::PICK_STORY_CATEGORY, keyboards::pick_category(&categories)).await
        }
        AdminSession::AwaitingStoryPremium { .. } => {
            reply(bot, chat_id, texts::ASK_PREMIUM, keyboards::premium_choice()).await
        }
        AdminSession::AwaitingCategoryName => reply(bot, chat_id, texts::ENTER_CATEGORY_NAME, keyboards::cancel_keyboard()).await,
        AdminSession::AwaitingStoryTitle => reply(bot, chat_id, texts::ENTER_STORY_TITLE, keyboards::cancel_keyboard()).await,
        AdminSession::AwaitingStoryContent { .. } => reply(bot, chat_id, texts::ENTER_STORY_CONTENT, keyboards::cancel_keyboard()).await,
        AdminSession::AwaitingUserId => reply(bot, chat_id, texts::ENTER_USER_ID, keyboards::cancel_keyboard()).await,
        AdminSession::AwaitingSettingText { .. } => reply(bot, chat_id, texts::ENTER_SETTING_TEXT, keyboards::cancel_keyboard()).await,
        AdminSession::AwaitingChannel => reply(bot, chat_id, texts::ENTER_CHANNEL, keyboards::cancel_keyboard()).await,
    }
}

/// Delete a category picked from the inline list
pub async fn delete_category(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    admin_id: i64,
    category_id: i64,
    services: &ServiceFactory,
) -> Result<()> {
    let text = if services.database.categories.delete(category_id).await? {
        log_admin_action(admin_id, "delete_category", Some(category_id), None);
        "✅ Category deleted."
    } else {
        "ℹ️ The category was already deleted."
    };
    edit_or_send(bot, chat_id, message_id, text).await
}

/// Delete a story picked from the inline list
pub async fn delete_story(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    admin_id: i64,
    story_id: i64,
    services: &ServiceFactory,
) -> Result<()> {
    let text = if services.database.stories.delete(story_id).await? {
        log_admin_action(admin_id, "delete_story", Some(story_id), None);
        "✅ Story deleted."
    } else {
        "ℹ️ The story was already deleted."
    };
    edit_or_send(bot, chat_id, message_id, text).await
}

/// Flip an access rule and refresh the toggle keyboard
pub async fn toggle_setting(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    admin_id: i64,
    key: SettingKey,
    services: &ServiceFactory,
) -> Result<()> {
    let settings = &services.database.settings;
    let policy = settings.access_policy().await?;
    let enabled = match key {
        SettingKey::ApprovalRequired => policy.approval_required,
        SettingKey::AutoApprove => policy.auto_approve,
        SettingKey::SubscriptionRequired => policy.subscription_required,
        _ => return Err(StoryBotError::InvalidInput(format!("{} is not a flag", key.as_str()))),
    };

    settings.set(key, flag_value(!enabled)).await?;
    log_admin_action(admin_id, "toggle_setting", None, Some(key.as_str()));

    let policy = settings.access_policy().await?;
    let keyboard = keyboards::access_toggles(&policy);
    if let Some(message_id) = message_id {
        if let Err(e) = bot.edit_message_reply_markup(chat_id, message_id).reply_markup(keyboard.clone()).await {
            warn!(chat_id = ?chat_id, error = %e, "Failed to refresh access rules keyboard");
        } else {
            return Ok(());
        }
    }
    reply(bot, chat_id, "🔐 Access rules:", keyboard).await
}

/// Replace the text of an inline-keyboard message, or send it when that fails
pub async fn edit_or_send(bot: &Bot, chat_id: ChatId, message_id: Option<MessageId>, text: &str) -> Result<()> {
    if let Some(message_id) = message_id {
        match bot.edit_message_text(chat_id, message_id, text).await {
            Ok(_) => return Ok(()),
            Err(e) => warn!(chat_id = ?chat_id, error = %e, "Failed to edit message"),
        }
    }
    bot.send_message(chat_id, text).await?;
    Ok(())
}
