//! Tabular conversion for export collaborators.
//!
//! Converts a [`CompanyAnalysis`] into `polars` DataFrames that a rendering
//! or CSV collaborator can serialize without further computation. Caveated
//! growth rows keep a null rate and a caveat marker: "not computable" must
//! stay distinguishable from a computed zero.

use polars::prelude::*;

use tenk_core::{AnalysisError, Result};

use crate::analyzer::CompanyAnalysis;

fn to_analysis_error(e: PolarsError) -> AnalysisError {
    AnalysisError::Other(e.to_string())
}

/// Organized series values as one long-format table.
///
/// Columns: `metric`, `frame`, `period`, `period_end` (Date), `value`.
/// Rows appear in metric priority order, then oldest-first per frame.
pub fn series_frame(analysis: &CompanyAnalysis) -> Result<DataFrame> {
    let mut metrics = Vec::new();
    let mut frames = Vec::new();
    let mut periods = Vec::new();
    let mut period_ends = Vec::new();
    let mut values = Vec::new();

    for metric_analysis in &analysis.metrics {
        for (key, value) in metric_analysis.series.iter() {
            metrics.push(metric_analysis.metric.as_str());
            frames.push(key.frame.as_str());
            periods.push(key.label.clone());
            period_ends.push(key.period_end.to_string());
            values.push(value);
        }
    }

    let df = DataFrame::new(vec![
        Column::new("metric".into(), metrics),
        Column::new("frame".into(), frames),
        Column::new("period".into(), periods),
        Column::new("period_end".into(), period_ends),
        Column::new("value".into(), values),
    ])
    .map_err(to_analysis_error)?;

    df.lazy()
        .with_column(col("period_end").cast(DataType::Date))
        .collect()
        .map_err(to_analysis_error)
}

/// Growth results as one table, caveats rendered as text.
///
/// Columns: `metric`, `kind`, `from_period`, `to_period`, `rate`
/// (null when caveated), `caveat` (null when computed).
pub fn growth_frame(analysis: &CompanyAnalysis) -> Result<DataFrame> {
    let mut metrics = Vec::new();
    let mut kinds = Vec::new();
    let mut from_periods = Vec::new();
    let mut to_periods = Vec::new();
    let mut rates: Vec<Option<f64>> = Vec::new();
    let mut caveats: Vec<Option<&str>> = Vec::new();

    for metric_analysis in &analysis.metrics {
        for result in &metric_analysis.growth {
            metrics.push(result.metric.as_str());
            kinds.push(result.kind.as_str());
            from_periods.push(result.from_period.label.clone());
            to_periods.push(result.to_period.label.clone());
            rates.push(result.rate);
            caveats.push(result.caveat.map(|c| c.as_str()));
        }
    }

    DataFrame::new(vec![
        Column::new("metric".into(), metrics),
        Column::new("kind".into(), kinds),
        Column::new("from_period".into(), from_periods),
        Column::new("to_period".into(), to_periods),
        Column::new("rate".into(), rates),
        Column::new("caveat".into(), caveats),
    ])
    .map_err(to_analysis_error)
}

/// Quality reports as one table, one row per analyzed metric.
///
/// Columns: `metric`, `expected_periods`, `present_periods`,
/// `completeness_ratio`, `missing_periods` (comma-joined labels).
pub fn quality_frame(analysis: &CompanyAnalysis) -> Result<DataFrame> {
    let mut metrics = Vec::new();
    let mut expected = Vec::new();
    let mut present = Vec::new();
    let mut ratios = Vec::new();
    let mut missing = Vec::new();

    for metric_analysis in &analysis.metrics {
        let quality = &metric_analysis.quality;
        metrics.push(metric_analysis.metric.as_str());
        expected.push(quality.expected_periods as u32);
        present.push(quality.present_periods as u32);
        ratios.push(quality.completeness_ratio);
        missing.push(quality.missing_period_labels.join(", "));
    }

    DataFrame::new(vec![
        Column::new("metric".into(), metrics),
        Column::new("expected_periods".into(), expected),
        Column::new("present_periods".into(), present),
        Column::new("completeness_ratio".into(), ratios),
        Column::new("missing_periods".into(), missing),
    ])
    .map_err(to_analysis_error)
}
