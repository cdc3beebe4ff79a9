//! Raw reported facts.
//!
//! A [`RawFact`] is one disclosed value from a filing, exactly as the fetch
//! collaborator deserialized it: a concept name, an optional numeric value, a
//! unit, the reporting period it covers, and when it was filed. Facts are
//! immutable once received; many facts may describe the same logical
//! metric/period through concept synonyms or successive filings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::frame::FrameType;

/// One reported value from the source filings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawFact {
    /// Source concept name (e.g., an XBRL tag like `NetIncomeLoss`).
    pub concept: String,
    /// Reported value; `None` when the filing disclosed the concept without
    /// a usable number.
    pub value: Option<f64>,
    /// Unit of measure (`USD`, `shares`, `pure`, ...).
    pub unit: String,
    /// Start of the reporting period, when the source disclosed it.
    pub period_start: Option<NaiveDate>,
    /// End of the reporting period.
    pub period_end: NaiveDate,
    /// Date the containing filing was submitted.
    pub filed: NaiveDate,
    /// Reporting cadence of the period.
    pub frame: FrameType,
}

impl RawFact {
    /// Creates a new fact with required fields.
    #[must_use]
    pub fn new(
        concept: impl Into<String>,
        value: Option<f64>,
        unit: impl Into<String>,
        period_end: NaiveDate,
        filed: NaiveDate,
        frame: FrameType,
    ) -> Self {
        Self {
            concept: concept.into(),
            value,
            unit: unit.into(),
            period_start: None,
            period_end,
            filed,
            frame,
        }
    }

    /// Sets the period start date.
    #[must_use]
    pub const fn with_period_start(mut self, period_start: NaiveDate) -> Self {
        self.period_start = Some(period_start);
        self
    }

    /// Days covered by the reporting period, when the start is known.
    #[must_use]
    pub fn span_days(&self) -> Option<i64> {
        self.period_start
            .map(|start| (self.period_end - start).num_days())
    }

    /// Whether the start-end span matches a full period of this fact's frame.
    ///
    /// Facts without a disclosed start cannot prove a full span and return
    /// `false`; the period organizer uses this to prefer well-formed spans
    /// when resolving collisions.
    #[must_use]
    pub fn covers_full_span(&self) -> bool {
        self.span_days()
            .is_some_and(|days| self.frame.expected_span_days().contains(&days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_span_days() {
        let fact = RawFact::new(
            "Revenues",
            Some(1.0),
            "USD",
            date(2023, 12, 31),
            date(2024, 2, 1),
            FrameType::Annual,
        )
        .with_period_start(date(2023, 1, 1));
        assert_eq!(fact.span_days(), Some(364));
        assert!(fact.covers_full_span());
    }

    #[test]
    fn test_partial_span_detected() {
        // Nine-month span reported under an annual frame: malformed
        let fact = RawFact::new(
            "Revenues",
            Some(1.0),
            "USD",
            date(2023, 9, 30),
            date(2023, 11, 1),
            FrameType::Annual,
        )
        .with_period_start(date(2023, 1, 1));
        assert!(!fact.covers_full_span());
    }

    #[test]
    fn test_unknown_start_is_not_full_span() {
        let fact = RawFact::new(
            "Revenues",
            Some(1.0),
            "USD",
            date(2023, 12, 31),
            date(2024, 2, 1),
            FrameType::Annual,
        );
        assert_eq!(fact.span_days(), None);
        assert!(!fact.covers_full_span());
    }
}
