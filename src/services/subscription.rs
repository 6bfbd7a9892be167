//! Channel membership checks

use teloxide::{Bot, requests::Requester};
use teloxide::types::{ChatId, ChatMemberKind, Recipient, UserId};
use tracing::{debug, warn};

/// Asks Telegram whether a user belongs to the configured channel
#[derive(Clone)]
pub struct SubscriptionVerifier {
    bot: Bot,
}

impl SubscriptionVerifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Membership check that never fails: any error counts as "not subscribed"
    pub async fn is_subscribed(&self, user_id: i64, channel: &str) -> bool {
        let recipient = channel_recipient(channel);

        match self.bot.get_chat_member(recipient, UserId(user_id as u64)).await {
            Ok(member) => {
                let subscribed = counts_as_subscribed(&member.kind);
                debug!(
                    user_id = user_id,
                    channel = channel,
                    member_kind = ?member.kind,
                    subscribed = subscribed,
                    "Channel membership retrieved"
                );
                subscribed
            }
            Err(e) => {
                warn!(user_id = user_id, channel = channel, error = %e, "Failed to check channel membership");
                false
            }
        }
    }
}

/// `creator`, `administrator` and `member` count; everything else does not
pub fn counts_as_subscribed(kind: &ChatMemberKind) -> bool {
    matches!(
        kind,
        ChatMemberKind::Owner { .. } | ChatMemberKind::Administrator { .. } | ChatMemberKind::Member { .. }
    )
}

/// Numeric ids address the chat directly, anything else is a username
pub fn channel_recipient(channel: &str) -> Recipient {
    let channel = channel.trim();
    match channel.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if channel.starts_with('@') => Recipient::ChannelUsername(channel.to_string()),
        Err(_) => Recipient::ChannelUsername(format!("@{}", channel)),
    }
}
