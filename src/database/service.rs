//! Database service layer
//!
//! This module provides a high-level interface to database operations

use serde::Serialize;
use crate::config::Settings;
use crate::database::{
    DatabasePool, UserRepository, JoinRequestRepository, CategoryRepository, StoryRepository,
    SettingsRepository,
};
use crate::models::settings::{flag_value, SettingKey};
use crate::utils::errors::StoryBotError;

/// Counters shown on the admin statistics screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub approved_users: i64,
    pub premium_users: i64,
    pub pending_requests: i64,
    pub categories: i64,
    pub stories: i64,
}

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub users: UserRepository,
    pub join_requests: JoinRequestRepository,
    pub categories: CategoryRepository,
    pub stories: StoryRepository,
    pub settings: SettingsRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            join_requests: JoinRequestRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            stories: StoryRepository::new(pool.clone()),
            settings: SettingsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Approve a user with a pending request.
    ///
    /// Removing the request and raising the flags happen in one transaction.
    /// Returns `false` without touching anything when no request was pending.
    pub async fn approve_pending(&self, user_id: i64, premium: bool) -> Result<bool, StoryBotError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM join_requests WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "UPDATE users SET is_approved = 1, is_premium = (is_premium OR $2) WHERE user_id = $1"
        )
        .bind(user_id)
        .bind(premium)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Approve a user directly, clearing any stale request
    pub async fn approve_user(&self, user_id: i64) -> Result<(), StoryBotError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE users SET is_approved = 1 WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM join_requests WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete a user. Fails with `UserNotFound` when the id is unknown.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), StoryBotError> {
        if self.users.delete(user_id).await? {
            Ok(())
        } else {
            Err(StoryBotError::UserNotFound { user_id })
        }
    }

    /// Seed runtime settings from the static configuration.
    ///
    /// Values already stored (edited by the admin) are kept.
    pub async fn seed_settings(&self, settings: &Settings) -> Result<(), StoryBotError> {
        let content = &settings.content;
        let access = &settings.access;

        let mut defaults = vec![
            (SettingKey::WelcomeMessage, content.welcome_message.clone()),
            (SettingKey::AboutText, content.about_text.clone()),
            (SettingKey::ContactText, content.contact_text.clone()),
            (SettingKey::StartButtonText, content.start_button_text.clone()),
            (SettingKey::ApprovalRequired, flag_value(access.approval_required).to_string()),
            (SettingKey::AutoApprove, flag_value(access.auto_approve).to_string()),
            (SettingKey::SubscriptionRequired, flag_value(access.subscription_required).to_string()),
        ];
        if let Some(channel) = &access.channel {
            defaults.push((SettingKey::Channel, channel.clone()));
        }

        self.settings.seed_defaults(&defaults).await?;
        tracing::info!(count = defaults.len(), "Bot settings seeded");
        Ok(())
    }

    /// Get system statistics
    pub async fn get_stats(&self) -> Result<Stats, StoryBotError> {
        Ok(Stats {
            approved_users: self.users.count_approved().await?,
            premium_users: self.users.count_premium().await?,
            pending_requests: self.join_requests.count().await?,
            categories: self.categories.count().await?,
            stories: self.stories.count().await?,
        })
    }
}
