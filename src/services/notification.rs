//! Notification service implementation
//!
//! Best-effort outbound messages. Delivery failures (blocked bot, network
//! errors) are logged and reported as [`NotificationResult::Failed`]; they
//! never abort the state change that triggered the message.

use teloxide::{Bot, types::{ChatId, ReplyMarkup}, requests::Requester, payloads::SendMessageSetters};
use tracing::debug;
use crate::models::join_request::JoinRequest;
use crate::ui::{keyboards, texts};
use crate::utils::helpers::format_timestamp;
use crate::utils::logging::log_notification_failure;

/// Outcome of a best-effort send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationResult {
    Sent,
    Failed(String),
}

impl NotificationResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationResult::Sent)
    }
}

#[derive(Clone)]
pub struct NotificationService {
    bot: Bot,
}

impl NotificationService {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Send a message, logging instead of propagating failures
    pub async fn send(
        &self,
        chat_id: i64,
        purpose: &str,
        text: impl Into<String>,
        markup: Option<ReplyMarkup>,
    ) -> NotificationResult {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if let Some(markup) = markup {
            request = request.reply_markup(markup);
        }

        match request.await {
            Ok(_) => {
                debug!(chat_id = chat_id, purpose = purpose, "Notification sent");
                NotificationResult::Sent
            }
            Err(e) => {
                let reason = e.to_string();
                log_notification_failure(chat_id, purpose, &reason);
                NotificationResult::Failed(reason)
            }
        }
    }

    /// Tell the admin about a new join request, with decision controls
    pub async fn notify_join_request(&self, admin_id: i64, request: &JoinRequest) -> NotificationResult {
        let username = request
            .username
            .as_deref()
            .map(|name| format!("@{}", name))
            .unwrap_or_else(|| "-".to_string());

        let text = format!(
            "🆕 New join request\n\n👤 Name: {}\n🔗 Username: {}\n🆔 ID: {}\n🕒 Requested: {}",
            request.display_name,
            username,
            request.user_id,
            format_timestamp(request.requested_at),
        );

        self.send(
            admin_id,
            "join_request",
            text,
            Some(keyboards::join_request_controls(request.user_id).into()),
        )
        .await
    }

    /// Tell a user they were approved.
    ///
    /// With `channel` set the user gets the subscription prompt instead of
    /// the main menu.
    pub async fn notify_approved(&self, user_id: i64, premium: bool, channel: Option<&str>) -> NotificationResult {
        let greeting = if premium { texts::APPROVED_PREMIUM } else { texts::APPROVED };

        match channel {
            Some(channel) => {
                let text = format!("{}\n\n{}", greeting, texts::SUBSCRIBE_FIRST);
                self.send(user_id, "approved", text, Some(keyboards::subscription_prompt(channel).into()))
                    .await
            }
            None => {
                self.send(user_id, "approved", greeting, Some(keyboards::user_menu().into()))
                    .await
            }
        }
    }

    pub async fn notify_rejected(&self, user_id: i64) -> NotificationResult {
        self.send(user_id, "rejected", texts::REJECTED, None).await
    }
}
