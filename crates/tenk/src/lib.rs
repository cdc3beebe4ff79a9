#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Normalized SEC fundamentals with growth rates and data quality reporting.
//!
//! This crate re-exports the core types and collaborator implementations,
//! and provides an [`Analyzer`] for running complete analysis requests.
//!
//! # Features
//!
//! - `edgar` - SEC EDGAR fact source
//! - `cache-sqlite` - SQLite-based fact caching
//!
//! # Example
//!
//! ```rust,ignore
//! use tenk::{Analyzer, Metric};
//!
//! #[tokio::main]
//! async fn main() -> tenk::Result<()> {
//!     let analyzer = Analyzer::new()
//!         .with_edgar("MyApp/1.0 (contact@example.com)");
//!
//!     let analysis = analyzer.analyze("brk.a").await?;
//!     let revenue = analysis.metric(Metric::Revenue)?;
//!     for result in &revenue.growth {
//!         println!("{:?} {} -> {}: {:?}", result.kind, result.from_period.label,
//!             result.to_period.label, result.rate);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use tenk_core::*;

// Pipeline stages, re-exported for callers that bring their own facts
pub use tenk_analysis::{assess, compute_growth, map_facts, organize};

// Cache implementations
#[cfg(feature = "cache-sqlite")]
pub use tenk_cache::SqliteCache;
pub use tenk_cache::{InMemoryCache, NoopCache};

// Fact sources
#[cfg(feature = "edgar")]
pub use tenk_edgar::EdgarSource;

mod analyzer;
/// Tabular conversion for export collaborators.
pub mod tabular;

pub use analyzer::{Analyzer, CompanyAnalysis, MetricAnalysis, analyze_facts};
