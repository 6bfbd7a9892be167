//! Start command handler
//!
//! Entry point for every user: runs the access gate and shows the main menu,
//! or the admin panel for the admin.

use teloxide::{Bot, types::Message};
use tracing::debug;
use crate::handlers::access::{admit, send_welcome};
use crate::handlers::commands::admin;
use crate::services::ServiceFactory;
use crate::state::StateStorage;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

/// Handle /start command
pub async fn handle_start(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    debug!(user_id = user_id, chat_id = ?chat_id, "Processing /start command");
    log_user_action(user_id, "start", None);

    if !admit(&services, chat_id, user, false).await? {
        return Ok(());
    }

    if services.auth.is_admin(user_id) {
        state_storage.reset(user_id).await?;
        return admin::show_admin_panel(&bot, chat_id).await;
    }

    send_welcome(&services, chat_id).await
}

/// Handle /cancel command
pub async fn handle_cancel(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let user_id = user.id.0 as i64;
    if services.auth.is_admin(user_id) {
        return admin::cancel(&bot, msg.chat.id, user_id, &state_storage).await;
    }

    if admit(&services, msg.chat.id, user, false).await? {
        send_welcome(&services, msg.chat.id).await?;
    }
    Ok(())
}
