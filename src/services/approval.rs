//! Admin decisions on join requests

use tracing::info;
use crate::database::DatabaseService;
use crate::middleware::AuthMiddleware;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;
use super::notification::{NotificationResult, NotificationService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    Approve,
    Reject,
    ApprovePremium,
}

impl DecisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionKind::Approve => "approve",
            DecisionKind::Reject => "reject",
            DecisionKind::ApprovePremium => "approve_premium",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminDecision {
    pub kind: DecisionKind,
    pub target: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    Approved { premium: bool, notification: NotificationResult },
    Rejected { notification: NotificationResult },
    /// No pending request for the target; nothing changed
    AlreadyResolved,
}

#[derive(Clone)]
pub struct ApprovalService {
    database: DatabaseService,
    notifier: NotificationService,
    auth: AuthMiddleware,
}

impl ApprovalService {
    pub fn new(database: DatabaseService, notifier: NotificationService, auth: AuthMiddleware) -> Self {
        Self { database, notifier, auth }
    }

    /// Apply an admin decision.
    ///
    /// Fails with `PermissionDenied` for anyone but the configured admin.
    /// Acting on a request that is already gone is a no-op, so repeated
    /// taps on the same button are harmless.
    pub async fn decide(&self, acting_user_id: i64, decision: AdminDecision) -> Result<DecisionOutcome> {
        self.auth.check_admin(acting_user_id)?;

        let target = decision.target;
        let outcome = match decision.kind {
            DecisionKind::Approve | DecisionKind::ApprovePremium => {
                let premium = decision.kind == DecisionKind::ApprovePremium;
                if !self.database.approve_pending(target, premium).await? {
                    return Ok(self.already_resolved(acting_user_id, decision));
                }

                let policy = self.database.settings.access_policy().await?;
                let subscribed = self
                    .database
                    .users
                    .find_by_id(target)
                    .await?
                    .map(|user| user.is_subscribed)
                    .unwrap_or(false);
                let channel = policy.required_channel().filter(|_| !subscribed);

                let notification = self.notifier.notify_approved(target, premium, channel).await;
                DecisionOutcome::Approved { premium, notification }
            }
            DecisionKind::Reject => {
                if !self.database.join_requests.resolve(target).await? {
                    return Ok(self.already_resolved(acting_user_id, decision));
                }

                let notification = self.notifier.notify_rejected(target).await;
                DecisionOutcome::Rejected { notification }
            }
        };

        log_admin_action(acting_user_id, decision.kind.as_str(), Some(target), None);
        Ok(outcome)
    }

    fn already_resolved(&self, acting_user_id: i64, decision: AdminDecision) -> DecisionOutcome {
        info!(
            admin_id = acting_user_id,
            target = decision.target,
            action = decision.kind.as_str(),
            "Join request already resolved"
        );
        DecisionOutcome::AlreadyResolved
    }
}
