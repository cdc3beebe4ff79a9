//! No-op cache implementation.

use async_trait::async_trait;
use std::time::Duration;
use tenk_core::{FactCache, RawFact, Result, Ticker};
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get_facts` always returns `Ok(None)` and `put_facts` returns `Ok(())`.
/// Useful for disabling caching or testing code paths without cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FactCache for NoopCache {
    async fn get_facts(&self, _source: &str, _ticker: &Ticker) -> Result<Option<Vec<RawFact>>> {
        trace!("NoopCache: get_facts called, returning None");
        Ok(None)
    }

    async fn put_facts(&self, _source: &str, _ticker: &Ticker, _facts: &[RawFact]) -> Result<()> {
        trace!("NoopCache: put_facts called, doing nothing");
        Ok(())
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        trace!("NoopCache: invalidate_stale called, returning 0");
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, doing nothing");
        Ok(())
    }
}
