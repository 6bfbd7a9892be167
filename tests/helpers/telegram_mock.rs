//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses
//! and exposes the JSON bodies the bot sent, so tests can assert on them.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_BOT_TOKEN: &str = "12345:test_token";

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot whose requests all land on this server
    pub fn bot(&self) -> Bot {
        let api_url = self.server.uri().parse().expect("mock server uri is a valid url");
        Bot::new(TEST_BOT_TOKEN).set_api_url(api_url)
    }

    /// Request path for a Bot API method.
    ///
    /// teloxide posts to the PascalCase method name (`SendMessage`), while
    /// tests use the documented camelCase one (`sendMessage`).
    fn endpoint(method_name: &str) -> String {
        let mut chars = method_name.chars();
        let method_path: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("/bot{}/{}", TEST_BOT_TOKEN, method_path)
    }

    fn message_json(chat_id: i64, text: &str) -> Value {
        json!({
            "message_id": 123,
            "from": {
                "id": 12345,
                "is_bot": true,
                "first_name": "StoryBot",
                "username": "story_bot"
            },
            "chat": {
                "id": chat_id,
                "type": "private",
                "first_name": "Test"
            },
            "date": 1717200000,
            "text": text
        })
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint("sendMessage")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": true, "result": Self::message_json(100, "Test message") })),
            )
            .mount(&self.server)
            .await;
    }

    /// Make sendMessage to `chat_id` fail as if the user blocked the bot
    pub async fn mock_blocked_chat(&self, chat_id: i64) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint("sendMessage")))
            .and(body_partial_json(json!({ "chat_id": chat_id })))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "ok": false,
                "error_code": 403,
                "description": "Forbidden: bot was blocked by the user"
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for editMessageText endpoint
    pub async fn mock_edit_message_text(&self) {
        let mut message = Self::message_json(555, "Edited test message");
        message["edit_date"] = json!(1717200060);

        Mock::given(method("POST"))
            .and(path(Self::endpoint("editMessageText")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": message })))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for editMessageReplyMarkup endpoint
    pub async fn mock_edit_message_reply_markup(&self) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint("editMessageReplyMarkup")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": true, "result": Self::message_json(555, "🔐 Access rules:") })),
            )
            .mount(&self.server)
            .await;
    }

    /// Setup mock for answerCallbackQuery endpoint
    pub async fn mock_answer_callback_query(&self) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint("answerCallbackQuery")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": true })))
            .mount(&self.server)
            .await;
    }

    /// getChatMember answers with the given membership status
    /// (`member`, `left`, `kicked`, ...) for every user
    pub async fn mock_chat_member_status(&self, status: &str) {
        let member = match status {
            "kicked" => json!({
                "status": status,
                "user": { "id": 100, "is_bot": false, "first_name": "Alice" },
                "until_date": 0
            }),
            _ => json!({
                "status": status,
                "user": { "id": 100, "is_bot": false, "first_name": "Alice" }
            }),
        };

        Mock::given(method("POST"))
            .and(path(Self::endpoint("getChatMember")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": member })))
            .mount(&self.server)
            .await;
    }

    /// getChatMember fails, e.g. because the bot is not in the channel
    pub async fn mock_chat_member_error(&self) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint("getChatMember")))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&self.server)
            .await;
    }

    /// Setup all common mocks with default success responses
    pub async fn setup_default_mocks(&self) {
        self.mock_send_message().await;
        self.mock_edit_message_text().await;
        self.mock_edit_message_reply_markup().await;
        self.mock_answer_callback_query().await;
    }

    /// Reset all mocks and recorded requests
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// JSON bodies of every request made to `method_name`, oldest first
    pub async fn requests_to(&self, method_name: &str) -> Vec<Value> {
        let endpoint = Self::endpoint(method_name);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path() == endpoint)
            .filter_map(|req| serde_json::from_slice(&req.body).ok())
            .collect()
    }

    /// Bodies of the messages sent to `chat_id`
    pub async fn messages_to(&self, chat_id: i64) -> Vec<Value> {
        self.requests_to("sendMessage")
            .await
            .into_iter()
            .filter(|body| body["chat_id"].as_i64() == Some(chat_id))
            .collect()
    }

    /// Texts of the messages sent to `chat_id`
    pub async fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.messages_to(chat_id)
            .await
            .iter()
            .filter_map(|body| body["text"].as_str().map(str::to_string))
            .collect()
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, method_name: &str, times: usize) {
        let calls = self.requests_to(method_name).await.len();
        assert_eq!(
            calls, times,
            "Expected {} calls to {}, but got {}",
            times, method_name, calls
        );
    }
}

/// Every `callback_data` of an inline keyboard in a request body
pub fn callback_data_of(body: &Value) -> Vec<String> {
    body["reply_markup"]["inline_keyboard"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(Value::as_array)
                .flatten()
                .filter_map(|button| button["callback_data"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Every button label of a reply keyboard in a request body
pub fn reply_buttons_of(body: &Value) -> Vec<String> {
    body["reply_markup"]["keyboard"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(Value::as_array)
                .flatten()
                .filter_map(|button| button["text"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
