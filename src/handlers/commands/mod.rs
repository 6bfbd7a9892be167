//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod admin;
pub mod help;
pub mod start;
pub mod stories;
pub mod user;

use teloxide::{Bot, types::Message, utils::command::BotCommands};
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use crate::state::StateStorage;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Story bot commands:")]
pub enum Command {
    #[command(description = "Open the main menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Admin panel (admin only)")]
    Admin,
    #[command(description = "Cancel the current action")]
    Cancel,
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(bot, msg, services, state_storage).await,
        Command::Help => help::handle_help(bot, msg).await,
        Command::Admin => admin::handle_admin_command(bot, msg, services, state_storage).await,
        Command::Cancel => start::handle_cancel(bot, msg, services, state_storage).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start", "story_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/cancel", "story_bot").unwrap(), Command::Cancel);
        assert!(Command::parse("/events", "story_bot").is_err());
    }
}
