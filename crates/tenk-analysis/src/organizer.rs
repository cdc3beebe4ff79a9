//! Period organization and collision resolution.
//!
//! Groups a metric's facts by `(frame, period_end)` and resolves each group
//! to a single authoritative value through a pure reduction with an explicit
//! comparator, rather than iterative overwriting: the tie-break rule stays
//! auditable and testable in isolation.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use tenk_core::{FrameType, Metric, OrganizedSeries, PeriodKey, RawFact};

/// Total order on competing facts for the same period slot.
///
/// The later-filed fact is the more authoritative (amendments supersede
/// originals). On a filing-date tie, a fact whose start-end span covers a
/// full year/quarter beats a malformed partial span. The remaining fields
/// only serve to keep the order total, so resolution is deterministic for
/// any input ordering.
fn authority(a: &RawFact, b: &RawFact) -> Ordering {
    a.filed
        .cmp(&b.filed)
        .then_with(|| a.covers_full_span().cmp(&b.covers_full_span()))
        .then_with(|| a.period_start.cmp(&b.period_start))
        .then_with(|| {
            a.value
                .unwrap_or(f64::NEG_INFINITY)
                .total_cmp(&b.value.unwrap_or(f64::NEG_INFINITY))
        })
}

/// Organizes one metric's facts into a resolved period series.
///
/// Facts without a numeric value never materialize a key; absent periods are
/// simply absent. Re-running on the same input yields an identical series.
#[must_use]
pub fn organize(metric: Metric, facts: &[RawFact]) -> OrganizedSeries {
    let mut groups: BTreeMap<(FrameType, NaiveDate), Vec<&RawFact>> = BTreeMap::new();

    for fact in facts.iter().filter(|f| f.value.is_some()) {
        groups
            .entry((fact.frame, fact.period_end))
            .or_default()
            .push(fact);
    }

    let mut series = OrganizedSeries::new(metric);
    for ((frame, period_end), group) in groups {
        let collisions = group.len() - 1;
        if collisions > 0 {
            debug!(
                metric = %metric,
                period_end = %period_end,
                collisions,
                "Resolving period collision"
            );
        }

        let winner = group
            .into_iter()
            .max_by(|a, b| authority(a, b))
            .expect("group is never empty");

        // Value presence was established by the filter above
        if let Some(value) = winner.value {
            series.insert(PeriodKey::new(frame, period_end), value);
        }
    }

    series
}
