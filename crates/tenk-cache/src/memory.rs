//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tenk_core::{FactCache, RawFact, Result, Ticker};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Cache entry with timestamp for TTL-based invalidation.
#[derive(Debug, Clone)]
struct CacheEntry {
    facts: Vec<RawFact>,
    cached_at: chrono::DateTime<Utc>,
}

impl CacheEntry {
    fn new(facts: Vec<RawFact>) -> Self {
        Self {
            facts,
            cached_at: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX)
    }
}

/// Key for fact cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FactsKey {
    source: String,
    ticker: String,
}

impl FactsKey {
    fn new(source: &str, ticker: &Ticker) -> Self {
        Self {
            source: source.to_string(),
            ticker: ticker.to_string(),
        }
    }
}

/// Simple in-memory cache for testing and development.
///
/// Fact sets are stored in an `RwLock`-protected `HashMap` and are lost when
/// the cache is dropped. Facts are cloned on get/put operations.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    facts: RwLock<HashMap<FactsKey, CacheEntry>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FactCache for InMemoryCache {
    #[instrument(skip(self), fields(source = %source, ticker = %ticker))]
    async fn get_facts(&self, source: &str, ticker: &Ticker) -> Result<Option<Vec<RawFact>>> {
        let key = FactsKey::new(source, ticker);
        let cache = self.facts.read().await;
        match cache.get(&key) {
            Some(entry) => {
                debug!("Cache hit for facts");
                Ok(Some(entry.facts.clone()))
            }
            None => {
                debug!("Cache miss for facts");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, facts), fields(source = %source, ticker = %ticker, count = facts.len()))]
    async fn put_facts(&self, source: &str, ticker: &Ticker, facts: &[RawFact]) -> Result<()> {
        let key = FactsKey::new(source, ticker);
        let mut cache = self.facts.write().await;
        cache.insert(key, CacheEntry::new(facts.to_vec()));
        debug!("Cached {} facts", facts.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut cache = self.facts.write().await;
        let before = cache.len();
        cache.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - cache.len();
        if removed > 0 {
            debug!("Invalidated {} stale cache entries", removed);
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let mut cache = self.facts.write().await;
        cache.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }
}
