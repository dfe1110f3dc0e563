//! Query cache.
//!
//! Results are stored per [`QueryKey`] as typed entries. Fetches run as
//! abortable futures registered under their key so [`QueryCache::cancel_queries`]
//! can stop them before a mutation patches the same entries. A fetch whose
//! registration was cancelled never writes its result, even if it already
//! finished.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use futures::future::{AbortHandle, Abortable};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::actions::QueryOptions;
use crate::error::{ClientError, ClientResult};

/// Identifier of a cached result, e.g. `["payment", "p1"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Whether `prefix` matches the leading segments of this key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Keys shared by prefetch descriptors and mutation hooks.
pub mod keys {
    use super::QueryKey;

    pub fn properties() -> QueryKey {
        QueryKey::new(["properties"])
    }

    pub fn property(id: &str) -> QueryKey {
        QueryKey::new(["property", id])
    }

    pub fn appointments() -> QueryKey {
        QueryKey::new(["appointments"])
    }

    pub fn payments() -> QueryKey {
        QueryKey::new(["payments"])
    }

    pub fn payment(id: &str) -> QueryKey {
        QueryKey::new(["payment", id])
    }

    pub fn accounts() -> QueryKey {
        QueryKey::new(["accounts"])
    }

    pub fn account(id: &str) -> QueryKey {
        QueryKey::new(["account", id])
    }
}

struct InFlight {
    token: u64,
    handle: AbortHandle,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<QueryKey, Box<dyn Any + Send + Sync>>,
    in_flight: HashMap<QueryKey, InFlight>,
    next_token: u64,
}

#[derive(Default)]
pub struct QueryCache {
    state: Mutex<CacheState>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the descriptor's fetch and store its result.
    ///
    /// A newer fetch for the same key aborts this one.
    pub async fn fetch_query<T>(&self, options: &QueryOptions<T>) -> ClientResult<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        if !options.enabled {
            return Err(ClientError::Disabled);
        }

        let key = options.key.clone();
        let (handle, registration) = AbortHandle::new_pair();
        let token = {
            let mut state = self.state.lock().await;
            state.next_token += 1;
            let token = state.next_token;
            if let Some(previous) = state.in_flight.insert(key.clone(), InFlight { token, handle }) {
                previous.handle.abort();
            }
            token
        };

        debug!("Fetching {}", key);
        let result = Abortable::new(options.fetch(), registration).await;

        let mut state = self.state.lock().await;
        let current = state
            .in_flight
            .get(&key)
            .is_some_and(|flight| flight.token == token);
        if current {
            state.in_flight.remove(&key);
        }

        match result {
            Ok(Ok(value)) if current => {
                state.entries.insert(key, Box::new(value.clone()));
                Ok(value)
            }
            Ok(Err(e)) => Err(e),
            _ => {
                debug!("Fetch for {} was cancelled", key);
                Err(ClientError::Cancelled)
            }
        }
    }

    /// Hydrate the cache; failures are logged, not returned.
    pub async fn prefetch<T>(&self, options: &QueryOptions<T>)
    where
        T: Clone + Send + Sync + 'static,
    {
        match self.fetch_query(options).await {
            Ok(_) | Err(ClientError::Disabled) => {}
            Err(e) => warn!("Prefetch of {} failed: {}", options.key, e),
        }
    }

    /// Abort every in-flight fetch under `prefix`.
    pub async fn cancel_queries(&self, prefix: &QueryKey) -> usize {
        let mut state = self.state.lock().await;
        let before = state.in_flight.len();
        state.in_flight.retain(|key, flight| {
            let cancel = key.starts_with(prefix);
            if cancel {
                flight.handle.abort();
            }
            !cancel
        });
        before - state.in_flight.len()
    }

    pub async fn is_fetching(&self, prefix: &QueryKey) -> bool {
        let state = self.state.lock().await;
        state.in_flight.keys().any(|key| key.starts_with(prefix))
    }

    pub async fn get_query_data<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let state = self.state.lock().await;
        state
            .entries
            .get(key)
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned()
    }

    /// Replace an entry with `updater(old)`; `None` removes it.
    pub async fn set_query_data<T, F>(&self, key: &QueryKey, updater: F) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(Option<T>) -> Option<T>,
    {
        let mut state = self.state.lock().await;
        let old = state
            .entries
            .get(key)
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned();

        let new = updater(old);
        match &new {
            Some(value) => {
                state.entries.insert(key.clone(), Box::new(value.clone()));
            }
            None => {
                state.entries.remove(key);
            }
        }
        new
    }

    /// Drop every entry under `prefix` so the next read refetches.
    pub async fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut state = self.state.lock().await;
        let before = state.entries.len();
        state.entries.retain(|key, _| !key.starts_with(prefix));
        before - state.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use futures::FutureExt;
    use tokio::sync::Notify;

    use domain::{Payments, Properties};

    #[test]
    fn test_key_prefix_matching() {
        let key = keys::payment("p1");
        assert!(key.starts_with(&QueryKey::new(["payment"])));
        assert!(!key.starts_with(&keys::payments()));
        assert_eq!(key.to_string(), "[payment, p1]");
    }

    #[tokio::test]
    async fn test_fetch_stores_result() {
        let cache = QueryCache::new();
        let options = QueryOptions::new(keys::payments(), || {
            async { Ok(Payments::default()) }.boxed()
        });

        let fetched = cache.fetch_query(&options).await.unwrap();
        assert_eq!(
            cache.get_query_data::<Payments>(&keys::payments()).await,
            Some(fetched)
        );
    }

    #[tokio::test]
    async fn test_cancelled_fetch_cannot_overwrite_later_write() {
        let cache = Arc::new(QueryCache::new());
        let gate = Arc::new(Notify::new());

        let release = gate.clone();
        let options = QueryOptions::new(keys::properties(), move || {
            let release = release.clone();
            async move {
                release.notified().await;
                Ok(Properties::default())
            }
            .boxed()
        });

        let fetching = cache.clone();
        let task = tokio::spawn(async move { fetching.fetch_query(&options).await });
        while !cache.is_fetching(&keys::properties()).await {
            tokio::task::yield_now().await;
        }

        assert_eq!(cache.cancel_queries(&keys::properties()).await, 1);
        let written = Properties {
            properties: Vec::new(),
            pagination: None,
        };
        cache
            .set_query_data(&keys::properties(), |_: Option<Properties>| Some(written.clone()))
            .await;
        gate.notify_one();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert_eq!(
            cache.get_query_data::<Properties>(&keys::properties()).await,
            Some(written)
        );
    }

    #[tokio::test]
    async fn test_disabled_query_is_not_fetched() {
        let cache = QueryCache::new();
        let options = QueryOptions::new(keys::payment(""), || {
            async { Ok(Payments::default()) }.boxed()
        })
        .enabled(false);

        assert!(matches!(
            cache.fetch_query(&options).await,
            Err(ClientError::Disabled)
        ));
    }

    #[tokio::test]
    async fn test_invalidate_drops_prefix() {
        let cache = QueryCache::new();
        cache
            .set_query_data(&keys::payment("a"), |_: Option<u32>| Some(1))
            .await;
        cache
            .set_query_data(&keys::payment("b"), |_: Option<u32>| Some(2))
            .await;
        cache
            .set_query_data(&keys::payments(), |_: Option<u32>| Some(3))
            .await;

        assert_eq!(cache.invalidate(&QueryKey::new(["payment"])).await, 2);
        assert_eq!(cache.get_query_data::<u32>(&keys::payments()).await, Some(3));
    }
}
