//! Organized period series.
//!
//! After classification and collision resolution, each metric's facts become
//! an [`OrganizedSeries`]: a map from [`PeriodKey`] to exactly one resolved
//! value. Absent periods are absent keys; completeness accounting is the
//! quality assessor's job, not this type's.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::frame::FrameType;
use crate::metric::Metric;

/// Uniquely identifies one slot in an organized series.
///
/// Ordering is by frame, then period end, which gives every iteration over a
/// series a stable oldest-first order within each cadence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Reporting cadence of the slot.
    pub frame: FrameType,
    /// End date of the reporting period.
    pub period_end: NaiveDate,
    /// Fiscal period label (`FY2023`, `Q3 2023`), derived from the end date.
    pub label: String,
}

impl PeriodKey {
    /// Creates a key for a period ending on `period_end`, deriving the label.
    #[must_use]
    pub fn new(frame: FrameType, period_end: NaiveDate) -> Self {
        Self {
            frame,
            period_end,
            label: frame.fiscal_label(period_end),
        }
    }
}

/// Resolved values for one metric, at most one per period.
#[derive(Clone, Debug, PartialEq)]
pub struct OrganizedSeries {
    metric: Metric,
    values: BTreeMap<PeriodKey, f64>,
}

impl OrganizedSeries {
    /// Creates an empty series for a metric.
    #[must_use]
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            values: BTreeMap::new(),
        }
    }

    /// The metric this series describes.
    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Inserts the resolved value for a period.
    ///
    /// A series holds at most one value per key; resolving a collision to
    /// more than one surviving value is a programming defect, so a duplicate
    /// insert fails loudly in debug builds.
    pub fn insert(&mut self, key: PeriodKey, value: f64) {
        let previous = self.values.insert(key, value);
        debug_assert!(
            previous.is_none(),
            "period collision resolved to more than one surviving value"
        );
    }

    /// Returns the value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &PeriodKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Whether a period with this fiscal label is present.
    #[must_use]
    pub fn contains_label(&self, label: &str) -> bool {
        self.values.keys().any(|k| k.label == label)
    }

    /// Iterates all periods oldest-first (annual before quarterly).
    pub fn iter(&self) -> impl Iterator<Item = (&PeriodKey, f64)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }

    /// Iterates annual periods oldest-first.
    pub fn annual(&self) -> impl Iterator<Item = (&PeriodKey, f64)> {
        self.frame_iter(FrameType::Annual)
    }

    /// Iterates quarterly periods oldest-first.
    pub fn quarterly(&self) -> impl Iterator<Item = (&PeriodKey, f64)> {
        self.frame_iter(FrameType::Quarterly)
    }

    fn frame_iter(&self, frame: FrameType) -> impl Iterator<Item = (&PeriodKey, f64)> {
        self.values
            .iter()
            .filter(move |(k, _)| k.frame == frame)
            .map(|(k, v)| (k, *v))
    }

    /// Number of resolved periods across both frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no period resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
