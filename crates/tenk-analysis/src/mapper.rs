//! Fact classification onto the metric vocabulary.
//!
//! Filings commonly report many concepts outside the tracked vocabulary;
//! those are dropped, not errors. A concept that appears in more than one
//! metric's synonym list resolves to the highest-priority metric, so
//! classification is deterministic regardless of input order.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use tracing::debug;

use tenk_core::{Metric, RawFact};

/// Concept name to metric lookup, built once from the static synonym tables.
///
/// Built in [`Metric::ALL`] priority order with first insertion winning, which
/// is what resolves concepts that are ambiguous synonyms across taxonomies.
static CONCEPT_INDEX: LazyLock<HashMap<&'static str, Metric>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for metric in Metric::ALL {
        for concept in metric.concepts() {
            index.entry(*concept).or_insert(metric);
        }
    }
    index
});

/// Resolves the metric a concept name denotes, if it is tracked.
#[must_use]
pub fn metric_for_concept(concept: &str) -> Option<Metric> {
    CONCEPT_INDEX.get(concept).copied()
}

/// Classifies raw facts by metric.
///
/// Pure classification: no numeric transformation, no period resolution.
/// A fact maps to exactly one metric or is dropped.
#[must_use]
pub fn map_facts(facts: Vec<RawFact>) -> BTreeMap<Metric, Vec<RawFact>> {
    let total = facts.len();
    let mut mapped: BTreeMap<Metric, Vec<RawFact>> = BTreeMap::new();

    for fact in facts {
        if let Some(metric) = metric_for_concept(&fact.concept) {
            mapped.entry(metric).or_default().push(fact);
        }
    }

    let kept: usize = mapped.values().map(Vec::len).sum();
    debug!(total, kept, dropped = total - kept, "Classified raw facts");

    mapped
}
