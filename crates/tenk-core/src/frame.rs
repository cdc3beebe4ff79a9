//! Reporting frame definitions.
//!
//! This module defines [`FrameType`] for the cadence of a reporting period
//! (annual or quarterly) and the deterministic fiscal label derivation used
//! throughout the pipeline.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Cadence of a reporting period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FrameType {
    /// Annual reporting period (10-K).
    #[default]
    Annual,
    /// Quarterly reporting period (10-Q).
    Quarterly,
}

impl FrameType {
    /// Classifies an SEC form type into a frame, if it carries period data.
    ///
    /// Amendments (`10-K/A`, `10-Q/A`) classify the same as their originals;
    /// all other forms return `None`.
    #[must_use]
    pub fn from_form(form: &str) -> Option<Self> {
        match form {
            "10-K" | "10-K/A" => Some(Self::Annual),
            "10-Q" | "10-Q/A" => Some(Self::Quarterly),
            _ => None,
        }
    }

    /// Derives the fiscal period label for a period ending on `period_end`.
    ///
    /// Annual frames label by the calendar year of the period end (`FY2023`);
    /// quarterly frames bucket by calendar quarter (`Q3 2023`). The label is a
    /// pure function of `(self, period_end)`, independent of filing order.
    #[must_use]
    pub fn fiscal_label(&self, period_end: NaiveDate) -> String {
        match self {
            Self::Annual => format!("FY{}", period_end.year()),
            Self::Quarterly => {
                let quarter = (period_end.month0() / 3) + 1;
                format!("Q{} {}", quarter, period_end.year())
            }
        }
    }

    /// Stable machine-readable name, used in tabular output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }

    /// Inclusive range of days a full reporting span of this frame covers.
    ///
    /// Used to reject malformed partial spans when resolving period
    /// collisions: a fiscal year runs roughly 350-380 days, a fiscal quarter
    /// roughly 80-100.
    #[must_use]
    pub const fn expected_span_days(&self) -> std::ops::RangeInclusive<i64> {
        match self {
            Self::Annual => 350..=380,
            Self::Quarterly => 80..=100,
        }
    }
}
