#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Pure analysis pipeline for SEC fundamentals.
//!
//! Four synchronous stages, each consuming the prior stage's complete
//! output, with no I/O and no shared mutable state:
//!
//! - [`mapper::map_facts`] - classify raw facts onto the metric vocabulary
//! - [`organizer::organize`] - resolve facts into per-period series
//! - [`growth::compute_growth`] - derive CAGR/YoY/QoQ with typed caveats
//! - [`quality::assess`] - measure completeness against an expectation window

/// Growth rate derivation.
pub mod growth;
/// Fact classification onto the metric vocabulary.
pub mod mapper;
/// Period organization and collision resolution.
pub mod organizer;
/// Data quality assessment.
pub mod quality;

pub use growth::compute_growth;
pub use mapper::{map_facts, metric_for_concept};
pub use organizer::organize;
pub use quality::assess;
