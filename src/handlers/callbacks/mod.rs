//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks

pub mod decisions;

use teloxide::{Bot, types::{CallbackQuery, ChatId, MessageId}, prelude::*};
use tracing::{debug, warn};
use crate::handlers::access::{admit, send_welcome};
use crate::handlers::commands::admin;
use crate::handlers::commands::user::{open_catalog, CatalogView};
use crate::services::ServiceFactory;
use crate::state::{StateStorage, WizardInput};
use crate::ui::{texts, CallbackData};
use crate::utils::errors::Result;

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let chat_id = query.message.as_ref().map(|m| m.chat().id).unwrap_or(ChatId(user_id));
    let message_id = query.message.as_ref().map(|m| m.id());

    // Answer first to stop the button spinner
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(user_id = user_id, error = %e, "Failed to answer callback query");
    }

    let Some(raw) = query.data.as_deref() else {
        return Ok(());
    };

    let data = match raw.parse::<CallbackData>() {
        Ok(data) => data,
        Err(e) => {
            warn!(user_id = user_id, callback_data = raw, error = %e, "Ignoring unknown callback");
            return Ok(());
        }
    };

    debug!(user_id = user_id, callback = ?data, "Routing callback");

    if let Some(decision) = decisions::decision_from_callback(data) {
        return decisions::handle_decision(&bot, chat_id, message_id, user_id, decision, &services).await;
    }

    match data {
        CallbackData::CheckSubscription => {
            if admit(&services, chat_id, &query.from, true).await? {
                admin::edit_or_send(&bot, chat_id, message_id, texts::SUBSCRIPTION_CONFIRMED).await?;
                send_welcome(&services, chat_id).await?;
            }
            Ok(())
        }
        CallbackData::Home => browse(&bot, &query, chat_id, message_id, CatalogView::Categories, &services).await,
        CallbackData::Category(id) => browse(&bot, &query, chat_id, message_id, CatalogView::Category(id), &services).await,
        CallbackData::Story(id) => browse(&bot, &query, chat_id, message_id, CatalogView::Story(id), &services).await,
        admin_action => {
            if services.auth.check_admin(user_id).is_err() {
                bot.send_message(chat_id, texts::NO_PERMISSION).await?;
                return Ok(());
            }
            handle_admin_callback(&bot, chat_id, message_id, user_id, admin_action, &services, &state_storage).await
        }
    }
}

async fn browse(
    bot: &Bot,
    query: &CallbackQuery,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    view: CatalogView,
    services: &ServiceFactory,
) -> Result<()> {
    if !admit(services, chat_id, &query.from, false).await? {
        return Ok(());
    }
    open_catalog(bot, chat_id, query.from.id.0 as i64, view, services, message_id).await
}

async fn handle_admin_callback(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    admin_id: i64,
    data: CallbackData,
    services: &ServiceFactory,
    state_storage: &StateStorage,
) -> Result<()> {
    match data {
        CallbackData::PickCategory(category_id) => {
            let input = WizardInput::Category(category_id);
            admin::handle_wizard_input(bot, chat_id, admin_id, input, services, state_storage).await
        }
        CallbackData::Premium(is_premium) => {
            let input = WizardInput::Premium(is_premium);
            admin::handle_wizard_input(bot, chat_id, admin_id, input, services, state_storage).await
        }
        CallbackData::DeleteCategory(id) => admin::delete_category(bot, chat_id, message_id, admin_id, id, services).await,
        CallbackData::DeleteStory(id) => admin::delete_story(bot, chat_id, message_id, admin_id, id, services).await,
        CallbackData::Toggle(key) => admin::toggle_setting(bot, chat_id, message_id, admin_id, key, services).await,
        other => {
            debug!(callback = ?other, "Callback handled elsewhere");
            Ok(())
        }
    }
}
