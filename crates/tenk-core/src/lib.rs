#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and collaborator traits for fundamentals analysis.
//!
//! This crate provides the foundational abstractions of the workspace:
//!
//! - [`Ticker`] - Validated, canonicalized ticker symbol
//! - [`Metric`] - The closed metric vocabulary with synonym tables
//! - [`RawFact`] - One reported value from the source filings
//! - [`OrganizedSeries`] / [`PeriodKey`] - Resolved per-period values
//! - [`GrowthResult`] / [`QualityReport`] - Derived outputs
//! - [`FactSource`] - Fetch collaborator boundary
//! - [`FactCache`] - Caching collaborator boundary

/// Cache trait for storing fetched facts.
pub mod cache;
/// Error types for fundamentals analysis.
pub mod error;
/// Raw reported facts.
pub mod fact;
/// Reporting frame definitions.
pub mod frame;
/// The fixed internal metric vocabulary.
pub mod metric;
/// Derived result types: growth rates and quality reports.
pub mod report;
/// Organized period series.
pub mod series;
/// The fetch collaborator boundary.
pub mod source;
/// Ticker symbol validation and normalization.
pub mod ticker;

// Re-export commonly used items at crate root
pub use cache::FactCache;
pub use error::{AnalysisError, Result};
pub use fact::RawFact;
pub use frame::FrameType;
pub use metric::Metric;
pub use report::{GrowthCaveat, GrowthKind, GrowthResult, QualityReport};
pub use series::{OrganizedSeries, PeriodKey};
pub use source::{FactSource, TrailingWindow};
pub use ticker::Ticker;
