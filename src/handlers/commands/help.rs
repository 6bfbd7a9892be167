//! Help command handler

use teloxide::{Bot, types::Message, prelude::*};
use crate::ui::texts;
use crate::utils::errors::Result;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, texts::HELP).await?;
    Ok(())
}
