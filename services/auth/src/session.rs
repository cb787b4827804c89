//! Session persistence
//!
//! The provider client keeps the signed-in session here so that a restarted
//! process finds it again on startup.

use anyhow::Result;
use async_trait::async_trait;
use common::cache::RedisPool;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::Session;

/// Where the current session is persisted between runs
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn load(&self) -> Result<Option<Session>>;
    async fn save(&self, session: &Session) -> Result<()>;
    async fn remove(&self) -> Result<()>;
}

/// Session storage in Redis, one key per storage slot
#[derive(Clone)]
pub struct RedisSessionStorage {
    redis_pool: RedisPool,
    key: String,
    ttl_seconds: u64,
}

impl RedisSessionStorage {
    /// `storage_key` names the slot; `ttl_seconds` should cover the refresh
    /// token's lifetime.
    pub fn new(redis_pool: RedisPool, storage_key: &str, ttl_seconds: u64) -> Self {
        Self {
            redis_pool,
            key: format!("session:{}", storage_key),
            ttl_seconds,
        }
    }
}

#[async_trait]
impl SessionStorage for RedisSessionStorage {
    async fn load(&self) -> Result<Option<Session>> {
        self.redis_pool.get_json(&self.key).await
    }

    async fn save(&self, session: &Session) -> Result<()> {
        info!("Persisting session for user: {}", session.user.id);
        self.redis_pool
            .set_json(&self.key, session, Some(self.ttl_seconds))
            .await
    }

    async fn remove(&self) -> Result<()> {
        info!("Removing persisted session");
        self.redis_pool.delete(&self.key).await
    }
}

/// Process-local session storage; nothing survives a restart
#[derive(Default)]
pub struct MemorySessionStorage {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.lock().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.session.lock().await = Some(session.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        *self.session.lock().await = None;
        Ok(())
    }
}
