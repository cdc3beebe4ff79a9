//! Cache trait for storing fetched facts.
//!
//! This module defines the [`FactCache`] trait that lets the analyzer reuse
//! a company's fetched fact set across requests. Derived entities (organized
//! series, growth results, quality reports) are always recomputed fresh per
//! request and are never cached.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::fact::RawFact;
use crate::ticker::Ticker;

/// Trait for caching fetched fact sets.
///
/// Implementations can store data in various backends (SQLite, in-memory,
/// etc.) to avoid repeated upstream calls.
#[async_trait]
pub trait FactCache: Send + Sync {
    /// Retrieves the cached fact set for a ticker fetched from a source.
    ///
    /// Returns `Ok(Some(facts))` if cached, `Ok(None)` if not cached.
    async fn get_facts(&self, source: &str, ticker: &Ticker) -> Result<Option<Vec<RawFact>>>;

    /// Stores a fetched fact set.
    async fn put_facts(&self, source: &str, ticker: &Ticker, facts: &[RawFact]) -> Result<()>;

    /// Removes cache entries older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;
}
