//! Session middleware configuration.
//!
//! Sessions live in process memory and are lost on restart; the cookie only
//! carries the session id. The store is a bounded `moka` cache, so idle
//! sessions are evicted after the expiry window and the oldest go first once
//! [`MAX_SESSIONS`] is reached.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore, session_store};

use crate::config::AgrowConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "agrow_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Upper bound on sessions held in memory.
pub const MAX_SESSIONS: u64 = 100_000;

/// In-memory session store with idle eviction and a size cap.
#[derive(Clone)]
pub struct MemorySessionStore {
    records: Cache<Id, Record>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(max_sessions: u64, idle: Duration) -> Self {
        Self {
            records: Cache::builder()
                .max_capacity(max_sessions)
                .time_to_idle(idle)
                .build(),
        }
    }
}

impl std::fmt::Debug for MemorySessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySessionStore")
            .field("sessions", &self.records.entry_count())
            .finish()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.records.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .records
            .get(session_id)
            .await
            .filter(|record| record.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.invalidate(session_id).await;
        Ok(())
    }
}

/// Create the session layer with a bounded in-memory store.
#[must_use]
pub fn create_session_layer(config: &AgrowConfig) -> SessionManagerLayer<MemorySessionStore> {
    let idle = Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs());
    let store = MemorySessionStore::new(MAX_SESSIONS, idle);

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use tower_sessions::cookie::time::Duration as CookieDuration;

    use super::*;

    fn record(expires_in: CookieDuration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::from([("language".to_string(), serde_json::json!("mr"))]),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    fn store() -> MemorySessionStore {
        MemorySessionStore::new(MAX_SESSIONS, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_saved_record_loads() {
        let store = store();
        let mut rec = record(CookieDuration::hours(1));
        store.create(&mut rec).await.unwrap();

        let loaded = store.load(&rec.id).await.unwrap().unwrap();
        assert_eq!(loaded.data, rec.data);
    }

    #[tokio::test]
    async fn test_expired_record_is_not_loaded() {
        let store = store();
        let rec = record(CookieDuration::seconds(-1));
        store.save(&rec).await.unwrap();

        assert!(store.load(&rec.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleted_record_is_gone() {
        let store = store();
        let rec = record(CookieDuration::hours(1));
        store.save(&rec).await.unwrap();
        store.delete(&rec.id).await.unwrap();

        assert!(store.load(&rec.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_is_bounded() {
        let store = MemorySessionStore::new(10, Duration::from_secs(60));
        for _ in 0..50 {
            store.save(&record(CookieDuration::hours(1))).await.unwrap();
        }
        store.records.run_pending_tasks().await;

        assert!(store.records.entry_count() <= 10);
    }
}
