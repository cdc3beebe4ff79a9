//! Derived result types: growth rates and data quality reports.
//!
//! Growth non-computability is a normal, typed outcome, not an error: a
//! [`GrowthResult`] either carries a rate or a [`GrowthCaveat`], never both
//! and never neither. Callers are contractually required to render caveats
//! distinctly from a numeric zero or a blank.

use serde::{Deserialize, Serialize};

use crate::metric::Metric;
use crate::series::PeriodKey;

/// Kind of growth rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthKind {
    /// Compound annual growth rate over a multi-year span.
    Cagr,
    /// Year-over-year simple growth between adjacent fiscal years.
    YearOverYear,
    /// Quarter-over-quarter simple growth between adjacent fiscal quarters.
    QuarterOverQuarter,
}

impl GrowthKind {
    /// Stable machine-readable name, used in tabular output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cagr => "cagr",
            Self::YearOverYear => "yoy",
            Self::QuarterOverQuarter => "qoq",
        }
    }
}

/// Why a growth rate could not be computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthCaveat {
    /// The metric changed sign between the two periods (loss to profit or
    /// profit to loss). A percentage across a sign boundary is not a
    /// meaningful single number; present the transition qualitatively.
    SignFlip,
    /// The base period value is zero; growth from zero is undefined, not
    /// infinite.
    ZeroBase,
    /// One or both period values are missing.
    InsufficientData,
}

impl GrowthCaveat {
    /// Stable machine-readable name, used in tabular output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SignFlip => "sign_flip",
            Self::ZeroBase => "zero_base",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

/// One growth observation between two periods of a metric.
///
/// Exactly one of `rate` and `caveat` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    /// The metric this rate describes.
    pub metric: Metric,
    /// CAGR, YoY, or QoQ.
    pub kind: GrowthKind,
    /// Base period of the comparison.
    pub from_period: PeriodKey,
    /// End period of the comparison.
    pub to_period: PeriodKey,
    /// The growth rate as a fraction (`0.5` = +50%); `None` iff caveated.
    pub rate: Option<f64>,
    /// Why the rate is not computable; `None` iff the rate is present.
    pub caveat: Option<GrowthCaveat>,
}

impl GrowthResult {
    /// A computed rate with no caveat.
    #[must_use]
    pub const fn computed(
        metric: Metric,
        kind: GrowthKind,
        from_period: PeriodKey,
        to_period: PeriodKey,
        rate: f64,
    ) -> Self {
        Self {
            metric,
            kind,
            from_period,
            to_period,
            rate: Some(rate),
            caveat: None,
        }
    }

    /// A non-computable pair, tagged with the reason.
    #[must_use]
    pub const fn caveated(
        metric: Metric,
        kind: GrowthKind,
        from_period: PeriodKey,
        to_period: PeriodKey,
        caveat: GrowthCaveat,
    ) -> Self {
        Self {
            metric,
            kind,
            from_period,
            to_period,
            rate: None,
            caveat: Some(caveat),
        }
    }

    /// Whether a numeric rate was produced.
    #[must_use]
    pub const fn is_computable(&self) -> bool {
        self.rate.is_some()
    }
}

/// Completeness report for one metric's organized series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// The metric assessed.
    pub metric: Metric,
    /// Number of periods the caller expected.
    pub expected_periods: usize,
    /// Number of expected periods actually present.
    pub present_periods: usize,
    /// Expected labels that are absent, in expectation order.
    pub missing_period_labels: Vec<String>,
    /// `present / expected`, `0.0` when nothing was expected.
    pub completeness_ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameType;
    use chrono::NaiveDate;

    fn key(year: i32) -> PeriodKey {
        PeriodKey::new(
            FrameType::Annual,
            NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
        )
    }

    #[test]
    fn test_computed_has_no_caveat() {
        let result = GrowthResult::computed(
            Metric::Revenue,
            GrowthKind::YearOverYear,
            key(2022),
            key(2023),
            0.5,
        );
        assert!(result.is_computable());
        assert_eq!(result.rate, Some(0.5));
        assert_eq!(result.caveat, None);
    }

    #[test]
    fn test_caveated_has_no_rate() {
        let result = GrowthResult::caveated(
            Metric::NetIncome,
            GrowthKind::Cagr,
            key(2019),
            key(2023),
            GrowthCaveat::SignFlip,
        );
        assert!(!result.is_computable());
        assert_eq!(result.rate, None);
        assert_eq!(result.caveat, Some(GrowthCaveat::SignFlip));
    }
}
