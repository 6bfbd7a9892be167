//! Outbound notifications through the mocked Bot API

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use story_bot::services::{NotificationResult, NotificationService};

#[tokio::test]
async fn test_send_reaches_the_mocked_api() {
    let telegram = TelegramMockServer::new().await;
    telegram.setup_default_mocks().await;
    let notifications = NotificationService::new(telegram.bot());

    let result = notifications.send(ALICE_ID, "greeting", "Hello, Alice", None).await;

    assert_eq!(result, NotificationResult::Sent);
    telegram.verify_endpoint_called("sendMessage", 1).await;
    assert_eq!(telegram.texts_to(ALICE_ID).await, vec!["Hello, Alice".to_string()]);
}

#[tokio::test]
async fn test_blocked_chat_is_reported_as_failed() {
    let telegram = TelegramMockServer::new().await;
    telegram.setup_default_mocks().await;
    telegram.mock_blocked_chat(BOB_ID).await;
    let notifications = NotificationService::new(telegram.bot());

    assert!(notifications.send(ALICE_ID, "greeting", "Hi", None).await.is_sent());
    assert_matches!(
        notifications.send(BOB_ID, "greeting", "Hi", None).await,
        NotificationResult::Failed(reason) if reason.contains("blocked")
    );
}
