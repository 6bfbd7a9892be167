//! Subscription verifier against the mocked membership API

mod helpers;

use helpers::*;
use story_bot::services::SubscriptionVerifier;

async fn verifier_with_status(status: &str) -> (TelegramMockServer, SubscriptionVerifier) {
    let telegram = TelegramMockServer::new().await;
    telegram.mock_chat_member_status(status).await;
    let verifier = SubscriptionVerifier::new(telegram.bot());
    (telegram, verifier)
}

#[tokio::test]
async fn test_member_is_subscribed() {
    let (telegram, verifier) = verifier_with_status("member").await;

    assert!(verifier.is_subscribed(ALICE_ID, "@stories").await);

    let requests = telegram.requests_to("getChatMember").await;
    assert_eq!(requests[0]["chat_id"], "@stories");
    assert_eq!(requests[0]["user_id"], ALICE_ID);
}

#[tokio::test]
async fn test_left_is_not_subscribed() {
    let (_telegram, verifier) = verifier_with_status("left").await;

    assert!(!verifier.is_subscribed(ALICE_ID, "@stories").await);
}

#[tokio::test]
async fn test_kicked_is_not_subscribed() {
    let (_telegram, verifier) = verifier_with_status("kicked").await;

    assert!(!verifier.is_subscribed(ALICE_ID, "@stories").await);
}

#[tokio::test]
async fn test_api_error_counts_as_not_subscribed() {
    let telegram = TelegramMockServer::new().await;
    telegram.mock_chat_member_error().await;
    let verifier = SubscriptionVerifier::new(telegram.bot());

    assert!(!verifier.is_subscribed(ALICE_ID, "@stories").await);
}

#[tokio::test]
async fn test_unreachable_api_counts_as_not_subscribed() {
    // No mocks mounted: every call fails
    let telegram = TelegramMockServer::new().await;
    let verifier = SubscriptionVerifier::new(telegram.bot());

    assert!(!verifier.is_subscribed(ALICE_ID, "stories").await);

    let requests = telegram.requests_to("getChatMember").await;
    assert_eq!(requests[0]["chat_id"], "@stories");
}
