//! SQLite-based cache implementation.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tenk_core::{AnalysisError, FactCache, RawFact, Result, Ticker};
use tracing::{debug, instrument};

/// SQLite-based cache for fetched fact sets.
///
/// This cache stores one JSON-encoded fact set per `(source, ticker)` in a
/// SQLite database file, providing persistence across application restarts.
#[derive(Debug)]
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Create a new SQLite cache at the given path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| AnalysisError::Cache(e.to_string()))?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory SQLite cache.
    ///
    /// Useful for testing; data is lost when the cache is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| AnalysisError::Cache(e.to_string()))?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AnalysisError::Cache(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS facts_cache (
                source TEXT NOT NULL,
                ticker TEXT NOT NULL,
                data_json TEXT NOT NULL,
                cached_at TEXT NOT NULL,
                PRIMARY KEY (source, ticker)
            )",
            [],
        )
        .map_err(|e| AnalysisError::Cache(e.to_string()))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_facts_cached_at
             ON facts_cache(cached_at)",
            [],
        )
        .map_err(|e| AnalysisError::Cache(e.to_string()))?;

        debug!("SQLite cache schema initialized");
        Ok(())
    }
}

#[async_trait]
impl FactCache for SqliteCache {
    #[instrument(skip(self), fields(source = %source, ticker = %ticker))]
    async fn get_facts(&self, source: &str, ticker: &Ticker) -> Result<Option<Vec<RawFact>>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AnalysisError::Cache(e.to_string()))?;

        let result = conn
            .query_row(
                "SELECT data_json FROM facts_cache
                 WHERE source = ?1 AND ticker = ?2",
                params![source, ticker.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| AnalysisError::Cache(e.to_string()))?;

        match result {
            Some(json) => {
                let facts: Vec<RawFact> = serde_json::from_str(&json)
                    .map_err(|e| AnalysisError::Parse(e.to_string()))?;
                debug!("Found {} cached facts", facts.len());
                Ok(Some(facts))
            }
            None => {
                debug!("No cached facts found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, facts), fields(source = %source, ticker = %ticker, count = facts.len()))]
    async fn put_facts(&self, source: &str, ticker: &Ticker, facts: &[RawFact]) -> Result<()> {
        let cached_at = Utc::now().to_rfc3339();
        let data_json =
            serde_json::to_string(facts).map_err(|e| AnalysisError::Parse(e.to_string()))?;

        let conn = self
            .conn
            .lock()
            .map_err(|e| AnalysisError::Cache(e.to_string()))?;

        conn.execute(
            "INSERT OR REPLACE INTO facts_cache
             (source, ticker, data_json, cached_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![source, ticker.as_str(), data_json, cached_at],
        )
        .map_err(|e| AnalysisError::Cache(e.to_string()))?;

        debug!("Cached {} facts", facts.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let cutoff = Utc::now()
            - chrono::Duration::from_std(ttl)
                .map_err(|e| AnalysisError::Cache(format!("Invalid TTL duration: {}", e)))?;
        let cutoff_str = cutoff.to_rfc3339();

        let conn = self
            .conn
            .lock()
            .map_err(|e| AnalysisError::Cache(e.to_string()))?;

        let deleted = conn
            .execute(
                "DELETE FROM facts_cache WHERE cached_at < ?1",
                params![cutoff_str],
            )
            .map_err(|e| AnalysisError::Cache(e.to_string()))?;

        if deleted > 0 {
            debug!("Invalidated {} stale cache entries", deleted);
        }

        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AnalysisError::Cache(e.to_string()))?;

        conn.execute("DELETE FROM facts_cache", [])
            .map_err(|e| AnalysisError::Cache(e.to_string()))?;

        debug!("Cleared all cache entries");
        Ok(())
    }
}
