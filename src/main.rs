//! Story Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::{ChatId, Update}};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use story_bot::{
    config::Settings,
    utils::logging::{self, log_handler_error},
    database::{DatabaseService, connection::{create_pool, health_check, run_migrations, DatabaseConfig}},
    services::ServiceFactory,
    state::StateStorage,
    handlers::{Command, handle_command, handle_callback_query, handle_message},
    ui::texts,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", story_bot::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&DatabaseConfig::from_settings(&settings.database)).await?;
    run_migrations(&db_pool).await?;
    health_check(&db_pool).await?;

    let database = DatabaseService::new(db_pool);
    database.seed_settings(&settings).await?;
    database.users.ensure_admin(settings.bot.admin_id).await?;

    // Initialize state management
    let state_storage = StateStorage::new(&settings.redis).await?;

    // Initialize bot
    let mut bot = Bot::new(&settings.bot.token);
    if let Some(api_url) = &settings.bot.api_url {
        info!(api_url = %api_url, "Using custom Bot API server");
        bot = bot.set_api_url(api_url.parse()?);
    }

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    // Initialize services
    let services = ServiceFactory::new(bot.clone(), settings, database);
    info!(admin_id = services.admin_id(), "Services initialized");

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![Arc::new(services), Arc::new(state_storage)])
        .default_handler(|upd| async move {
            warn!(update_id = ?upd.id, "Unhandled update");
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    info!("Story bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter(|msg: Message| msg.chat.is_private())
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Handle buttons and wizard input
                    dptree::endpoint(handle_messages),
                ),
        )
        .branch(
            // Handle callback queries
            Update::filter_callback_query().endpoint(handle_callbacks),
        )
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: Arc<ServiceFactory>,
    state_storage: Arc<StateStorage>,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    if let Err(e) = handle_command(bot.clone(), msg, cmd, (*services).clone(), (*state_storage).clone()).await {
        log_handler_error("command", &e);
        report_failure(&bot, chat_id).await;
    }
    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    state_storage: Arc<StateStorage>,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    if let Err(e) = handle_message(bot.clone(), msg, (*services).clone(), (*state_storage).clone()).await {
        log_handler_error("message", &e);
        report_failure(&bot, chat_id).await;
    }
    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: CallbackQuery,
    services: Arc<ServiceFactory>,
    state_storage: Arc<StateStorage>,
) -> HandlerResult {
    let chat_id = query.message.as_ref().map(|m| m.chat().id).unwrap_or(ChatId(query.from.id.0 as i64));
    if let Err(e) = handle_callback_query(bot.clone(), query, (*services).clone(), (*state_storage).clone()).await {
        log_handler_error("callback", &e);
        report_failure(&bot, chat_id).await;
    }
    Ok(())
}

/// Let the user know the update was not processed; the dispatcher keeps running
async fn report_failure(bot: &Bot, chat_id: ChatId) {
    if let Err(e) = bot.send_message(chat_id, texts::ERROR).await {
        warn!(chat_id = ?chat_id, error = %e, "Failed to report handler error");
    }
}
