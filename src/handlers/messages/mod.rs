//! Message handlers module
//!
//! Handles plain text: reply keyboard buttons, admin wizard input and the
//! configurable start button.

use teloxide::{Bot, types::{ChatId, Message}, prelude::*};
use tracing::debug;
use crate::handlers::access::{admit, start_button_label};
use crate::handlers::commands::{admin, user};
use crate::services::ServiceFactory;
use crate::state::{StateStorage, WizardInput};
use crate::ui::{keyboards, texts, MenuCommand};
use crate::utils::errors::Result;

/// Handle incoming messages that are not commands
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };

    let user_id = from.id.0 as i64;
    let chat_id = msg.chat.id;

    debug!(user_id = user_id, chat_id = ?chat_id, "Processing message");

    if !admit(&services, chat_id, from, false).await? {
        return Ok(());
    }

    let Some(text) = msg.text() else {
        bot.send_message(chat_id, texts::UNKNOWN_COMMAND).await?;
        return Ok(());
    };

    if services.auth.is_admin(user_id) {
        return handle_admin_text(&bot, chat_id, user_id, text, &services, &state_storage).await;
    }

    user::handle_user_text(&bot, chat_id, text, &services).await
}

/// Menu buttons win over wizard input; anything else feeds the wizard
async fn handle_admin_text(
    bot: &Bot,
    chat_id: ChatId,
    admin_id: i64,
    text: &str,
    services: &ServiceFactory,
    state_storage: &StateStorage,
) -> Result<()> {
    let session = state_storage.load(admin_id).await?;

    if let Some(command) = MenuCommand::from_label(text) {
        if !session.is_idle() {
            debug!(admin_id = admin_id, state = session.name(), "Menu button leaves the wizard");
            state_storage.reset(admin_id).await?;
        }
        return admin::handle_menu_command(bot, chat_id, admin_id, command, services, state_storage).await;
    }

    if !session.is_idle() {
        if !session.expects_text() {
            debug!(admin_id = admin_id, state = session.name(), "Step is answered with a button");
            return admin::reprompt(bot, chat_id, &session, services).await;
        }
        let input = WizardInput::Text(text.to_string());
        return admin::handle_wizard_input(bot, chat_id, admin_id, input, services, state_storage).await;
    }

    if text.trim() == start_button_label(services).await?.trim() {
        return admin::show_admin_panel(bot, chat_id).await;
    }

    bot.send_message(chat_id, texts::UNKNOWN_COMMAND)
        .reply_markup(keyboards::admin_panel())
        .await?;
    Ok(())
}
