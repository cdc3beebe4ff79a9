//! Data quality assessment.
//!
//! Measures an organized series against a caller-supplied expectation window.
//! The assessor does not invent expectations: the caller names the labels it
//! wants covered (e.g., the five most recent fiscal years) and gets back a
//! completeness accounting, never an error, for sparse data.

use tenk_core::{OrganizedSeries, QualityReport};

/// Assesses series completeness against the expected period labels.
///
/// `missing_period_labels` preserves the order of `expected_period_labels`;
/// `completeness_ratio` is `0.0` when nothing was expected, never a division
/// by zero.
#[must_use]
pub fn assess(series: &OrganizedSeries, expected_period_labels: &[String]) -> QualityReport {
    let missing_period_labels: Vec<String> = expected_period_labels
        .iter()
        .filter(|label| !series.contains_label(label))
        .cloned()
        .collect();

    let expected_periods = expected_period_labels.len();
    let present_periods = expected_periods - missing_period_labels.len();
    let completeness_ratio = if expected_periods == 0 {
        0.0
    } else {
        present_periods as f64 / expected_periods as f64
    };

    QualityReport {
        metric: series.metric(),
        expected_periods,
        present_periods,
        missing_period_labels,
        completeness_ratio,
    }
}
