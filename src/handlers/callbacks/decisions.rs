//! Approve / reject / premium buttons on join request notifications

use teloxide::{Bot, types::{ChatId, MessageId}, prelude::*};
use crate::handlers::commands::admin::edit_or_send;
use crate::services::{AdminDecision, DecisionKind, DecisionOutcome, NotificationResult, ServiceFactory};
use crate::ui::{texts, CallbackData};
use crate::utils::errors::{Result, StoryBotError};

/// Decision carried by a callback payload, if any
pub fn decision_from_callback(data: CallbackData) -> Option<AdminDecision> {
    let (kind, target) = match data {
        CallbackData::Approve(target) => (DecisionKind::Approve, target),
        CallbackData::Reject(target) => (DecisionKind::Reject, target),
        CallbackData::ApprovePremium(target) => (DecisionKind::ApprovePremium, target),
        _ => return None,
    };
    Some(AdminDecision { kind, target })
}

/// Text that replaces the notification once the admin decided
pub fn outcome_text(target: i64, outcome: &DecisionOutcome) -> String {
    let (mut text, notification) = match outcome {
        DecisionOutcome::Approved { premium: true, notification } => {
            (format!("🌟 User {} approved with premium access.", target), notification)
        }
        DecisionOutcome::Approved { premium: false, notification } => {
            (format!("✅ User {} approved.", target), notification)
        }
        DecisionOutcome::Rejected { notification } => (format!("❌ User {} rejected.", target), notification),
        DecisionOutcome::AlreadyResolved => return texts::ALREADY_RESOLVED.to_string(),
    };

    if let NotificationResult::Failed(reason) = notification {
        text.push_str(&format!("\n⚠️ The user was not notified: {}", reason));
    }
    text
}

pub async fn handle_decision(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    acting_user_id: i64,
    decision: AdminDecision,
    services: &ServiceFactory,
) -> Result<()> {
    let outcome = match services.approvals.decide(acting_user_id, decision).await {
        Ok(outcome) => outcome,
        Err(StoryBotError::PermissionDenied(_)) => {
            bot.send_message(chat_id, texts::NO_PERMISSION).await?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    edit_or_send(bot, chat_id, message_id, &outcome_text(decision.target, &outcome)).await
}
