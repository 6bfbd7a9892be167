//! Test context for unified test setup
//!
//! Wires an in-memory database, the mock Telegram server and in-memory admin
//! sessions into a [`ServiceFactory`], the same way `main` does for the real bot.

use serde_json::json;
use teloxide::types::{CallbackQuery, Message, User};
use teloxide::Bot;

use story_bot::config::Settings;
use story_bot::database::{create_pool, run_migrations, DatabaseConfig, DatabaseService};
use story_bot::handlers::{handle_callback_query, handle_command, handle_message, Command};
use story_bot::models::settings::{flag_value, SettingKey};
use story_bot::models::user::UserProfile;
use story_bot::services::ServiceFactory;
use story_bot::state::StateStorage;

use super::telegram_mock::{TelegramMockServer, TEST_BOT_TOKEN};

pub const ADMIN_ID: i64 = 555;
pub const ALICE_ID: i64 = 100;
pub const BOB_ID: i64 = 200;

/// Unified test context that manages all test components
pub struct TestContext {
    pub telegram: TelegramMockServer,
    pub bot: Bot,
    pub services: ServiceFactory,
    pub state_storage: StateStorage,
}

impl TestContext {
    /// Context with default settings and all Telegram endpoints succeeding
    pub async fn new() -> Self {
        Self::with_settings(test_settings()).await
    }

    pub async fn with_settings(settings: Settings) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let pool = create_pool(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to create test database");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let database = DatabaseService::new(pool);
        database.seed_settings(&settings).await.expect("Failed to seed settings");
        database
            .users
            .ensure_admin(settings.bot.admin_id)
            .await
            .expect("Failed to create admin");

        let telegram = TelegramMockServer::new().await;
        telegram.setup_default_mocks().await;

        let bot = telegram.bot();
        let services = ServiceFactory::new(bot.clone(), settings, database);

        Self {
            telegram,
            bot,
            services,
            state_storage: StateStorage::in_memory(),
        }
    }

    pub fn database(&self) -> &DatabaseService {
        &self.services.database
    }

    /// Change an access flag at runtime, like the admin toggles do
    pub async fn set_flag(&self, key: SettingKey, enabled: bool) {
        self.database()
            .settings
            .set(key, flag_value(enabled))
            .await
            .expect("Failed to update flag");
    }

    /// Turn the subscription gate on for `channel`
    pub async fn require_channel(&self, channel: &str) {
        self.set_flag(SettingKey::SubscriptionRequired, true).await;
        self.database()
            .settings
            .set(SettingKey::Channel, channel)
            .await
            .expect("Failed to set channel");
    }

    /// Deliver a plain text message from `user_id`
    pub async fn send_text(&self, user_id: i64, text: &str) {
        let msg = message_from(user_id, text);
        handle_message(self.bot.clone(), msg, self.services.clone(), self.state_storage.clone())
            .await
            .expect("message handler failed");
    }

    /// Deliver a bot command from `user_id`
    pub async fn send_command(&self, user_id: i64, command: Command) {
        let text = match command {
            Command::Start => "/start",
            Command::Help => "/help",
            Command::Admin => "/admin",
            Command::Cancel => "/cancel",
        };
        let msg = message_from(user_id, text);
        handle_command(self.bot.clone(), msg, command, self.services.clone(), self.state_storage.clone())
            .await
            .expect("command handler failed");
    }

    /// Deliver an inline button press from `user_id`
    pub async fn press(&self, user_id: i64, data: &str) {
        let query = callback_from(user_id, data);
        handle_callback_query(self.bot.clone(), query, self.services.clone(), self.state_storage.clone())
            .await
            .expect("callback handler failed");
    }

    /// Run the access gate directly
    pub async fn evaluate(&self, user_id: i64, recheck: bool) -> story_bot::services::AccessDecision {
        self.services
            .access_gate
            .evaluate(&profile(user_id), recheck)
            .await
            .expect("access gate failed")
    }
}

/// Settings used by every test: admin 555, approval required, no channel
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.bot.token = TEST_BOT_TOKEN.to_string();
    settings.bot.admin_id = ADMIN_ID;
    settings.access.approval_required = true;
    settings.access.auto_approve = false;
    settings.access.subscription_required = false;
    settings.access.channel = None;
    settings.logging.level = "debug".to_string();
    settings
}

pub fn first_name_of(user_id: i64) -> &'static str {
    match user_id {
        ALICE_ID => "Alice",
        BOB_ID => "Bob",
        ADMIN_ID => "Admin",
        _ => "Tester",
    }
}

pub fn profile(user_id: i64) -> UserProfile {
    let mut profile = UserProfile::new(user_id, first_name_of(user_id));
    profile.username = Some(first_name_of(user_id).to_lowercase());
    profile
}

fn user_json(user_id: i64) -> serde_json::Value {
    json!({
        "id": user_id,
        "is_bot": false,
        "first_name": first_name_of(user_id),
        "username": first_name_of(user_id).to_lowercase()
    })
}

pub fn telegram_user(user_id: i64) -> User {
    serde_json::from_value(user_json(user_id)).expect("valid user json")
}

/// Private-chat message from `user_id`
pub fn message_from(user_id: i64, text: &str) -> Message {
    serde_json::from_value(json!({
        "message_id": 1,
        "date": 1717200000,
        "chat": {
            "id": user_id,
            "type": "private",
            "first_name": first_name_of(user_id)
        },
        "from": user_json(user_id),
        "text": text
    }))
    .expect("valid message json")
}

/// Button press on a bot message in the private chat with `user_id`
pub fn callback_from(user_id: i64, data: &str) -> CallbackQuery {
    serde_json::from_value(json!({
        "id": "4382bfdwdsb323b2d9",
        "from": user_json(user_id),
        "chat_instance": "-5716374582412345",
        "data": data,
        "message": {
            "message_id": 42,
            "date": 1717200000,
            "chat": {
                "id": user_id,
                "type": "private",
                "first_name": first_name_of(user_id)
            },
            "from": {
                "id": 12345,
                "is_bot": true,
                "first_name": "StoryBot",
                "username": "story_bot"
            },
            "text": "menu"
        }
    }))
    .expect("valid callback query json")
}
