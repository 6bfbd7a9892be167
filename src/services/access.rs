//! Access gate
//!
//! Runs on every inbound message and callback from a private chat and
//! decides whether the user may reach the story catalog.
//!
//! Order of checks:
//! 1. the configured admin is always allowed;
//! 2. unapproved users are approved on the spot when auto-approve is on or
//!    approval is not required, otherwise queued for review;
//! 3. approved users must be subscribed to the channel when the
//!    subscription gate is on and a channel is configured.

use tracing::info;
use crate::database::DatabaseService;
use crate::models::join_request::CreateJoinRequest;
use crate::models::user::UserProfile;
use crate::utils::errors::Result;
use crate::utils::logging::log_access_decision;
use super::notification::NotificationService;
use super::subscription::SubscriptionVerifier;

/// Result of an access check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Waiting for the admin; `newly_queued` is set on the first request
    BlockPending { newly_queued: bool },
    /// Approved, but not a member of `channel` yet
    BlockSubscription { channel: String },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessDecision::Allow => "allow",
            AccessDecision::BlockPending { .. } => "pending",
            AccessDecision::BlockSubscription { .. } => "subscription",
        }
    }
}

#[derive(Clone)]
pub struct AccessGate {
    database: DatabaseService,
    notifier: NotificationService,
    verifier: SubscriptionVerifier,
    admin_id: i64,
}

impl AccessGate {
    pub fn new(
        database: DatabaseService,
        notifier: NotificationService,
        verifier: SubscriptionVerifier,
        admin_id: i64,
    ) -> Self {
        Self { database, notifier, verifier, admin_id }
    }

    /// Decide whether the user may proceed.
    ///
    /// `recheck` is set when the user pressed "check subscription"; only then
    /// is the membership API consulted.
    pub async fn evaluate(&self, profile: &UserProfile, recheck: bool) -> Result<AccessDecision> {
        let user_id = profile.user_id;
        let mut user = self.database.users.upsert_profile(profile).await?;

        if user_id == self.admin_id {
            if !user.is_admin || !user.is_approved {
                self.database.users.ensure_admin(user_id).await?;
            }
            return Ok(self.decided(user_id, AccessDecision::Allow));
        }

        let policy = self.database.settings.access_policy().await?;

        if !user.is_approved {
            if policy.auto_approve || !policy.approval_required {
                self.database.approve_user(user_id).await?;
                user.is_approved = true;
                info!(user_id = user_id, auto_approve = policy.auto_approve, "User approved without review");
            } else {
                let newly_queued = self
                    .database
                    .join_requests
                    .enqueue(&CreateJoinRequest::from(profile))
                    .await?;

                if newly_queued {
                    info!(user_id = user_id, "Join request queued");
                    if let Some(request) = self.database.join_requests.find(user_id).await? {
                        self.notifier.notify_join_request(self.admin_id, &request).await;
                    }
                }

                return Ok(self.decided(user_id, AccessDecision::BlockPending { newly_queued }));
            }
        }

        if let Some(channel) = policy.required_channel() {
            if !user.is_subscribed {
                if recheck && self.verifier.is_subscribed(user_id, channel).await {
                    self.database.users.mark_subscribed(user_id).await?;
                    info!(user_id = user_id, channel = channel, "Subscription confirmed");
                } else {
                    let decision = AccessDecision::BlockSubscription { channel: channel.to_string() };
                    return Ok(self.decided(user_id, decision));
                }
            }
        }

        Ok(self.decided(user_id, AccessDecision::Allow))
    }

    fn decided(&self, user_id: i64, decision: AccessDecision) -> AccessDecision {
        log_access_decision(user_id, decision.as_str());
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_labels() {
        assert!(AccessDecision::Allow.is_allowed());
        assert!(!AccessDecision::BlockPending { newly_queued: true }.is_allowed());
        assert_eq!(
            AccessDecision::BlockSubscription { channel: "@x".to_string() }.as_str(),
            "subscription"
        );
    }
}
