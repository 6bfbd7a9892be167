//! Admin decision integration tests

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use story_bot::services::{AdminDecision, DecisionKind, DecisionOutcome, NotificationResult};
use story_bot::ui::texts;
use story_bot::utils::errors::StoryBotError;

fn decision(kind: DecisionKind, target: i64) -> AdminDecision {
    AdminDecision { kind, target }
}

/// Context where Alice already has a pending request
async fn with_pending_alice() -> TestContext {
    let ctx = TestContext::new().await;
    ctx.evaluate(ALICE_ID, false).await;
    ctx
}

#[tokio::test]
async fn test_approve_removes_request_and_notifies() {
    let ctx = with_pending_alice().await;

    let outcome = ctx
        .services
        .approvals
        .decide(ADMIN_ID, decision(DecisionKind::Approve, ALICE_ID))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DecisionOutcome::Approved { premium: false, notification: NotificationResult::Sent }
    );
    assert!(ctx.database().join_requests.find(ALICE_ID).await.unwrap().is_none());
    assert!(ctx.database().users.find_by_id(ALICE_ID).await.unwrap().unwrap().is_approved);

    let messages = ctx.telegram.messages_to(ALICE_ID).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["text"], texts::APPROVED);
    assert!(reply_buttons_of(&messages[0]).contains(&"📚 Categories".to_string()));
}

#[tokio::test]
async fn test_premium_approval_sets_premium() {
    let ctx = with_pending_alice().await;

    let outcome = ctx
        .services
        .approvals
        .decide(ADMIN_ID, decision(DecisionKind::ApprovePremium, ALICE_ID))
        .await
        .unwrap();

    assert_matches!(outcome, DecisionOutcome::Approved { premium: true, .. });
    let alice = ctx.database().users.find_by_id(ALICE_ID).await.unwrap().unwrap();
    assert!(alice.is_approved);
    assert!(alice.is_premium);
    assert_eq!(ctx.telegram.texts_to(ALICE_ID).await, vec![texts::APPROVED_PREMIUM.to_string()]);
}

#[tokio::test]
async fn test_approval_with_channel_sends_subscription_prompt() {
    let ctx = with_pending_alice().await;
    ctx.require_channel("@stories").await;

    ctx.services
        .approvals
        .decide(ADMIN_ID, decision(DecisionKind::Approve, ALICE_ID))
        .await
        .unwrap();

    let messages = ctx.telegram.messages_to(ALICE_ID).await;
    let text = messages[0]["text"].as_str().unwrap();
    assert!(text.starts_with(texts::APPROVED));
    assert!(text.contains(texts::SUBSCRIBE_FIRST));
    assert!(callback_data_of(&messages[0]).contains(&"check_sub".to_string()));

    let url = &messages[0]["reply_markup"]["inline_keyboard"][0][0]["url"];
    assert_eq!(url.as_str().map(|u| u.trim_end_matches('/')), Some("https://t.me/stories"));
}

#[tokio::test]
async fn test_reject_then_approve_is_a_noop() {
    let ctx = with_pending_alice().await;
    let approvals = &ctx.services.approvals;

    let first = approvals.decide(ADMIN_ID, decision(DecisionKind::Reject, ALICE_ID)).await.unwrap();
    let second = approvals.decide(ADMIN_ID, decision(DecisionKind::Approve, ALICE_ID)).await.unwrap();

    assert_eq!(first, DecisionOutcome::Rejected { notification: NotificationResult::Sent });
    assert_eq!(second, DecisionOutcome::AlreadyResolved);
    assert!(!ctx.database().users.find_by_id(ALICE_ID).await.unwrap().unwrap().is_approved);
    assert_eq!(ctx.telegram.texts_to(ALICE_ID).await, vec![texts::REJECTED.to_string()]);
}

#[tokio::test]
async fn test_approve_then_reject_is_a_noop() {
    let ctx = with_pending_alice().await;
    let approvals = &ctx.services.approvals;

    approvals.decide(ADMIN_ID, decision(DecisionKind::Approve, ALICE_ID)).await.unwrap();
    let second = approvals.decide(ADMIN_ID, decision(DecisionKind::Reject, ALICE_ID)).await.unwrap();

    assert_eq!(second, DecisionOutcome::AlreadyResolved);
    assert!(ctx.database().users.find_by_id(ALICE_ID).await.unwrap().unwrap().is_approved);
    assert_eq!(ctx.telegram.texts_to(ALICE_ID).await, vec![texts::APPROVED.to_string()]);
}

#[tokio::test]
async fn test_unknown_target_is_silently_ignored() {
    let ctx = TestContext::new().await;

    let outcome = ctx
        .services
        .approvals
        .decide(ADMIN_ID, decision(DecisionKind::Approve, 999))
        .await
        .unwrap();

    assert_eq!(outcome, DecisionOutcome::AlreadyResolved);
    assert!(ctx.database().users.find_by_id(999).await.unwrap().is_none());
    ctx.telegram.verify_endpoint_called("sendMessage", 0).await;
}

#[tokio::test]
async fn test_non_admin_gets_permission_denied() {
    let ctx = with_pending_alice().await;

    let result = ctx
        .services
        .approvals
        .decide(BOB_ID, decision(DecisionKind::Approve, ALICE_ID))
        .await;

    assert_matches!(result, Err(StoryBotError::PermissionDenied(_)));
    assert!(ctx.database().join_requests.find(ALICE_ID).await.unwrap().is_some());
    assert!(!ctx.database().users.find_by_id(ALICE_ID).await.unwrap().unwrap().is_approved);
}

#[tokio::test]
async fn test_blocked_user_does_not_undo_approval() {
    let ctx = with_pending_alice().await;
    ctx.telegram.mock_blocked_chat(ALICE_ID).await;

    let outcome = ctx
        .services
        .approvals
        .decide(ADMIN_ID, decision(DecisionKind::Approve, ALICE_ID))
        .await
        .unwrap();

    assert_matches!(
        outcome,
        DecisionOutcome::Approved { notification: NotificationResult::Failed(ref reason), .. }
            if reason.contains("blocked")
    );
    assert!(ctx.database().users.find_by_id(ALICE_ID).await.unwrap().unwrap().is_approved);
    assert!(ctx.database().join_requests.find(ALICE_ID).await.unwrap().is_none());
}

#[tokio::test]
async fn test_blocked_user_warning_shown_to_admin() {
    let ctx = with_pending_alice().await;
    ctx.telegram.mock_blocked_chat(ALICE_ID).await;

    ctx.press(ADMIN_ID, "reject_100").await;

    let edits = ctx.telegram.requests_to("editMessageText").await;
    let text = edits[0]["text"].as_str().unwrap();
    assert!(text.starts_with("❌ User 100 rejected."));
    assert!(text.contains("was not notified"));
}
