//! Key-value store for account records and rate limiting.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use common::{AppError, AppResult};
use domain::{Account, ACCOUNTS_KEY};

/// Cache key prefix for rate limiting
const CACHE_PREFIX_RATE_LIMIT: &str = "rate_limit:";

/// Raw string operations a backend must provide.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store without expiry
    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Increment a counter, starting its expiry window on first use
    async fn incr_window(&self, key: &str, window_seconds: u64) -> AppResult<u64>;

    /// Remaining seconds before `key` expires
    async fn ttl(&self, key: &str) -> AppResult<Option<i64>>;
}

// =============================================================================
// Redis
// =============================================================================

pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    /// Connect to Redis.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl KeyValueBackend for RedisBackend {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(key).await.map_err(|e| {
            warn!("Redis get error for key {}: {}", key, e);
            AppError::from(e)
        })
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await.map_err(|e| {
            warn!("Redis set error for key {}: {}", key, e);
            AppError::from(e)
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(|e| {
            warn!("Redis delete error for key {}: {}", key, e);
            AppError::from(e)
        })
    }

    async fn incr_window(&self, key: &str, window_seconds: u64) -> AppResult<u64> {
        let mut conn = self.conn.clone();
        let count: u64 = conn.incr(key, 1).await?;

        // Set expiry on first request
        if count == 1 {
            conn.expire::<_, ()>(key, window_seconds as i64).await?;
        }
        Ok(count)
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<i64>> {
        let mut conn = self.conn.clone();
        let ttl: i64 = conn.ttl(key).await?;
        Ok((ttl >= 0).then_some(ttl))
    }
}

// =============================================================================
// In-memory
// =============================================================================

#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, (String, Option<Instant>)>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn live(entry: &(String, Option<Instant>)) -> bool {
    entry.1.map_or(true, |expires| expires > Instant::now())
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.lock().await;
        Ok(entries
            .get(key)
            .filter(|entry| live(entry))
            .map(|(value, _)| value.clone()))
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), (value, None));
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn incr_window(&self, key: &str, window_seconds: u64) -> AppResult<u64> {
        let mut entries = self.entries.lock().await;
        // Drop expired windows; per-address keys stay bounded.
        entries.retain(|_, entry| live(entry));
        let current = entries
            .get(key)
            .and_then(|(value, expires)| Some((value.parse::<u64>().ok()?, *expires)));

        let (count, expires) = match current {
            Some((count, expires)) => (count + 1, expires),
            None => (1, Some(Instant::now() + Duration::from_secs(window_seconds))),
        };
        entries.insert(key.to_string(), (count.to_string(), expires));
        Ok(count)
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<i64>> {
        let entries = self.entries.lock().await;
        Ok(entries
            .get(key)
            .filter(|entry| live(entry))
            .and_then(|(_, expires)| *expires)
            .map(|expires| expires.saturating_duration_since(Instant::now()).as_secs() as i64))
    }
}

// =============================================================================
// Typed store
// =============================================================================

/// Typed key-value operations over a backend.
#[derive(Clone)]
pub struct KeyValueStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl KeyValueStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Get a JSON value.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.backend.get(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Set a JSON value without expiry.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.backend.set(key, json).await
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.backend.delete(key).await
    }

    /// Connectivity probe used by the health endpoint.
    pub async fn ping(&self) -> AppResult<()> {
        self.backend.get("health:ping").await.map(|_| ())
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Load the accounts array; a missing entry is an empty list.
    pub async fn load_accounts(&self) -> AppResult<Vec<Account>> {
        Ok(self.get(ACCOUNTS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_accounts(&self, accounts: &[Account]) -> AppResult<()> {
        self.set(ACCOUNTS_KEY, &accounts).await
    }

    // =========================================================================
    // Rate Limiting
    // =========================================================================

    /// Check rate limit and increment counter.
    /// Returns (current_count, allowed).
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let count = self.backend.incr_window(&key, window_seconds).await?;
        Ok((count, count <= max_requests))
    }

    /// Get TTL for rate limit key.
    pub async fn get_rate_limit_ttl(&self, identifier: &str) -> AppResult<Option<i64>> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        self.backend.ttl(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Role;

    #[tokio::test]
    async fn test_rate_limit_counts_within_window() {
        let store = KeyValueStore::in_memory();
        for expected in 1..=3 {
            let (count, allowed) = store.check_rate_limit("/api:1.1.1.1", 3, 60).await.unwrap();
            assert_eq!(count, expected);
            assert!(allowed);
        }
        let (_, allowed) = store.check_rate_limit("/api:1.1.1.1", 3, 60).await.unwrap();
        assert!(!allowed);
        assert!(store.get_rate_limit_ttl("/api:1.1.1.1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_expired_windows_are_swept() {
        let backend = MemoryBackend::new();
        backend.set("accounts", "[]".into()).await.unwrap();
        for address in ["/api:10.0.0.1", "/api:10.0.0.2", "/api:10.0.0.3"] {
            backend.incr_window(address, 0).await.unwrap();
        }

        assert_eq!(backend.incr_window("/api:10.0.0.4", 60).await.unwrap(), 1);

        let entries = backend.entries.lock().await;
        assert_eq!(entries.len(), 2);
        assert!(entries.contains_key("accounts"));
        assert!(entries.contains_key("/api:10.0.0.4"));
    }

    #[tokio::test]
    async fn test_accounts_round_trip_through_json_array() {
        let store = KeyValueStore::in_memory();
        assert!(store.load_accounts().await.unwrap().is_empty());

        let accounts = vec![Account {
            id: "a1".into(),
            name: "Jose Rizal".into(),
            email: "jose@example.com".into(),
            role: Role::Agent,
            address: None,
            contact_number: None,
        }];
        store.save_accounts(&accounts).await.unwrap();

        let raw: Option<serde_json::Value> = store.get(ACCOUNTS_KEY).await.unwrap();
        assert!(raw.unwrap().is_array());
        assert_eq!(store.load_accounts().await.unwrap(), accounts);
    }
}
