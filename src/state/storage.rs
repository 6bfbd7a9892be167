//! Admin session storage
//!
//! Sessions live in Redis when a URL is configured, so a restart does not
//! lose a half-finished wizard. Without Redis they are kept in process.

use std::collections::HashMap;
use std::sync::Arc;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, error, info};
use crate::config::RedisConfig;
use crate::utils::errors::Result;
use super::session::AdminSession;

#[derive(Clone)]
enum Backend {
    Redis(redis::aio::ConnectionManager),
    Memory(Arc<RwLock<HashMap<i64, AdminSession>>>),
}

#[derive(Clone)]
pub struct StateStorage {
    backend: Backend,
    prefix: String,
    ttl_seconds: u64,
}

impl StateStorage {
    /// Connect to Redis, or fall back to memory when no URL is configured
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        let backend = match config.url.as_deref() {
            Some(url) => {
                let client = redis::Client::open(url)?;
                let connection_manager = redis::aio::ConnectionManager::new(client).await?;
                info!("Admin sessions stored in Redis");
                Backend::Redis(connection_manager)
            }
            None => {
                info!("Redis not configured, admin sessions kept in memory");
                Backend::Memory(Arc::default())
            }
        };

        Ok(Self {
            backend,
            prefix: config.prefix.clone(),
            ttl_seconds: config.ttl_seconds,
        })
    }

    pub fn in_memory() -> Self {
        let config = RedisConfig::default();
        Self {
            backend: Backend::Memory(Arc::default()),
            prefix: config.prefix,
            ttl_seconds: config.ttl_seconds,
        }
    }

    fn session_key(&self, admin_id: i64) -> String {
        format!("{}session:{}", self.prefix, admin_id)
    }

    /// Current session; `Idle` when none is stored
    pub async fn load(&self, admin_id: i64) -> Result<AdminSession> {
        match &self.backend {
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                let serialized: Option<String> = conn.get(self.session_key(admin_id)).await?;
                match serialized {
                    Some(data) => match serde_json::from_str(&data) {
                        Ok(session) => Ok(session),
                        Err(e) => {
                            error!(admin_id = admin_id, error = %e, "Failed to deserialize admin session, resetting");
                            self.reset(admin_id).await?;
                            Ok(AdminSession::Idle)
                        }
                    },
                    None => Ok(AdminSession::Idle),
                }
            }
            Backend::Memory(map) => Ok(map.read().await.get(&admin_id).cloned().unwrap_or_default()),
        }
    }

    /// Store a session; storing `Idle` removes it
    pub async fn save(&self, admin_id: i64, session: &AdminSession) -> Result<()> {
        if session.is_idle() {
            return self.reset(admin_id).await;
        }

        debug!(admin_id = admin_id, state = session.name(), "Saving admin session");

        match &self.backend {
            Backend::Redis(manager) => {
                let serialized = serde_json::to_string(session)?;
                let mut conn = manager.clone();
                conn.set_ex::<_, _, ()>(self.session_key(admin_id), serialized, self.ttl_seconds)
                    .await?;
            }
            Backend::Memory(map) => {
                map.write().await.insert(admin_id, session.clone());
            }
        }

        Ok(())
    }

    pub async fn reset(&self, admin_id: i64) -> Result<()> {
        match &self.backend {
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                conn.del::<_, ()>(self.session_key(admin_id)).await?;
            }
            Backend::Memory(map) => {
                map.write().await.remove(&admin_id);
            }
        }

        debug!(admin_id = admin_id, "Admin session reset");
        Ok(())
    }
}
