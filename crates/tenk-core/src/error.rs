//! Error types for fundamentals analysis.
//!
//! This module defines [`AnalysisError`] which covers all error cases that can
//! occur when validating input, fetching facts, or caching them. Growth-rate
//! non-computability is deliberately NOT an error: it is modeled as a caveat
//! on [`GrowthResult`](crate::report::GrowthResult).

use thiserror::Error;

use crate::metric::Metric;

/// Errors that can occur during an analysis request.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The supplied ticker symbol is malformed.
    ///
    /// Recoverable: the caller should re-prompt, using `reason` as feedback.
    #[error("Invalid ticker '{input}': {reason}")]
    InvalidTicker {
        /// The raw input as the user supplied it.
        input: String,
        /// Human-readable explanation of what is wrong with it.
        reason: String,
    },

    /// No reported fact mapped onto the requested metric.
    ///
    /// Recoverable per metric: surfaced as "data unavailable" for that metric,
    /// never as a whole-request failure. Sparse-but-present data flows through
    /// as a low completeness ratio instead.
    #[error("No mapped facts for metric {0}")]
    NoMappedFacts(Metric),

    /// The requested symbol was not found in the source's ticker index.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by a fact source.
    #[error("Rate limited by {limiter}: retry after {retry_after:?}")]
    RateLimited {
        /// The source that rate limited the request.
        limiter: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// Error parsing data from a fact source.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error interacting with the fact cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// No fact source has been configured on the analyzer.
    #[error("Fact source not configured: {0}")]
    SourceNotConfigured(String),

    /// The requested operation is not supported.
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`AnalysisError`].
pub type Result<T> = std::result::Result<T, AnalysisError>;
