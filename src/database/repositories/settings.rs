//! Runtime settings stored in `bot_settings`

use sqlx::SqlitePool;
use chrono::Utc;
use crate::models::settings::{AccessPolicy, SettingKey};
use crate::utils::errors::StoryBotError;

#[derive(Clone)]
#[derive(Debug)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: SettingKey) -> Result<Option<String>, StoryBotError> {
        let value: Option<(String,)> = sqlx::query_as("SELECT value FROM bot_settings WHERE key = $1")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(value.map(|v| v.0))
    }

    pub async fn set(&self, key: SettingKey, value: &str) -> Result<(), StoryBotError> {
        sqlx::query(
            r#"
            INSERT INTO bot_settings (key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#
        )
        .bind(key.as_str())
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert values for keys that are not stored yet. Existing values win.
    pub async fn seed_defaults(&self, defaults: &[(SettingKey, String)]) -> Result<(), StoryBotError> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        for (key, value) in defaults {
            sqlx::query("INSERT OR IGNORE INTO bot_settings (key, value, updated_at) VALUES ($1, $2, $3)")
                .bind(key.as_str())
                .bind(value)
                .bind(now)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Current access rules
    pub async fn access_policy(&self) -> Result<AccessPolicy, StoryBotError> {
        let approval_required = self.get(SettingKey::ApprovalRequired).await?;
        let auto_approve = self.get(SettingKey::AutoApprove).await?;
        let subscription_required = self.get(SettingKey::SubscriptionRequired).await?;
        let channel = self.get(SettingKey::Channel).await?;

        Ok(AccessPolicy::from_values(
            approval_required.as_deref(),
            auto_approve.as_deref(),
            subscription_required.as_deref(),
            channel.as_deref(),
        ))
    }

    /// Text setting with a fallback for missing or empty values
    pub async fn text_or(&self, key: SettingKey, fallback: &str) -> Result<String, StoryBotError> {
        Ok(self
            .get(key)
            .await?
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string()))
    }
}
