//! Services module
//!
//! This module contains business logic services

pub mod access;
pub mod approval;
pub mod notification;
pub mod subscription;

// Re-export commonly used services
pub use access::{AccessDecision, AccessGate};
pub use approval::{AdminDecision, ApprovalService, DecisionKind, DecisionOutcome};
pub use notification::{NotificationResult, NotificationService};
pub use subscription::SubscriptionVerifier;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::middleware::AuthMiddleware;
use teloxide::Bot;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub settings: Settings,
    pub database: DatabaseService,
    pub auth: AuthMiddleware,
    pub notifier: NotificationService,
    pub verifier: SubscriptionVerifier,
    pub access_gate: AccessGate,
    pub approvals: ApprovalService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(bot: Bot, settings: Settings, database: DatabaseService) -> Self {
        let admin_id = settings.bot.admin_id;
        let auth = AuthMiddleware::new(admin_id);
        let notifier = NotificationService::new(bot.clone());
        let verifier = SubscriptionVerifier::new(bot);
        let access_gate = AccessGate::new(database.clone(), notifier.clone(), verifier.clone(), admin_id);
        let approvals = ApprovalService::new(database.clone(), notifier.clone(), auth);

        Self {
            settings,
            database,
            auth,
            notifier,
            verifier,
            access_gate,
            approvals,
        }
    }

    pub fn admin_id(&self) -> i64 {
        self.auth.admin_id()
    }
}
