//! Growth rate derivation.
//!
//! Produces CAGR, YoY, and QoQ growth rates from an organized series. Every
//! requested period pair yields exactly one [`GrowthResult`]; non-computable
//! pairs carry a caveat instead of a rate, never a coerced zero and never a
//! silent omission. Results are ordered oldest-period-first per kind, an
//! explicit contract the rendering/export collaborators rely on.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use tenk_core::{
    FrameType, GrowthCaveat, GrowthKind, GrowthResult, Metric, OrganizedSeries, PeriodKey,
};

/// Simple growth between two period values.
///
/// The base enters as an absolute value so the sign of the rate always
/// reflects the direction of change, not a flipped negative base: a loss
/// narrowing from -50 to -20 is +60%, not -60%.
fn simple_rate(start: f64, end: f64) -> Result<f64, GrowthCaveat> {
    if start == 0.0 {
        return Err(GrowthCaveat::ZeroBase);
    }
    if (start < 0.0) != (end < 0.0) && end != 0.0 {
        return Err(GrowthCaveat::SignFlip);
    }
    Ok((end - start) / start.abs())
}

/// Compound annual growth over `n` years.
///
/// Geometric mean growth is undefined for zero or negative bases or
/// endpoints; a zero endpoint caveats as `ZeroBase`, any negative sign
/// combination as `SignFlip`.
fn cagr_rate(start: f64, end: f64, n: f64) -> Result<f64, GrowthCaveat> {
    if start == 0.0 || end == 0.0 {
        return Err(GrowthCaveat::ZeroBase);
    }
    if start < 0.0 || end < 0.0 {
        return Err(GrowthCaveat::SignFlip);
    }
    Ok((end / start).powf(1.0 / n) - 1.0)
}

/// Nominal period end for a slot absent from the series.
///
/// Gap periods inside the observed range still need a `PeriodKey` for their
/// `InsufficientData` results; the calendar year/quarter end is a stable
/// stand-in for the undisclosed fiscal end date.
fn nominal_period_end(frame: FrameType, year: i32, quarter: u32) -> NaiveDate {
    let (month, day) = match frame {
        FrameType::Annual => (12, 31),
        FrameType::Quarterly => match quarter {
            1 => (3, 31),
            2 => (6, 30),
            3 => (9, 30),
            _ => (12, 31),
        },
    };
    NaiveDate::from_ymd_opt(year, month, day).expect("calendar period end is always valid")
}

/// Derives all growth results for one metric's organized series.
///
/// Output order: CAGR, then YoY oldest-first, then QoQ oldest-first.
#[must_use]
pub fn compute_growth(series: &OrganizedSeries) -> Vec<GrowthResult> {
    let metric = series.metric();
    let mut results = Vec::new();

    // Annual slots keyed by the fiscal year their label carries
    let annual: BTreeMap<i32, (&PeriodKey, f64)> = series
        .annual()
        .map(|(key, value)| (key.period_end.year(), (key, value)))
        .collect();

    results.extend(compute_cagr(metric, &annual));
    results.extend(compute_yoy(metric, &annual));
    results.extend(compute_qoq(metric, series));

    results
}

/// One CAGR per metric, earliest to latest annual period.
///
/// `n` is the number of fiscal years spanned, which stays correct across
/// interior gaps; at least two annual values are required for a pair to be
/// requested at all.
fn compute_cagr(
    metric: Metric,
    annual: &BTreeMap<i32, (&PeriodKey, f64)>,
) -> Option<GrowthResult> {
    let (first_year, (from_key, start)) = annual.first_key_value()?;
    let (last_year, (to_key, end)) = annual.last_key_value()?;
    if first_year == last_year {
        return None;
    }

    let n = f64::from(last_year - first_year);
    let result = match cagr_rate(*start, *end, n) {
        Ok(rate) => GrowthResult::computed(
            metric,
            GrowthKind::Cagr,
            (*from_key).clone(),
            (*to_key).clone(),
            rate,
        ),
        Err(caveat) => GrowthResult::caveated(
            metric,
            GrowthKind::Cagr,
            (*from_key).clone(),
            (*to_key).clone(),
            caveat,
        ),
    };
    Some(result)
}

/// YoY for every consecutive fiscal-year pair in the observed range.
///
/// A gap year inside the range yields `InsufficientData` results for the
/// pairs it touches.
fn compute_yoy(metric: Metric, annual: &BTreeMap<i32, (&PeriodKey, f64)>) -> Vec<GrowthResult> {
    let (Some(first), Some(last)) = (
        annual.keys().next().copied(),
        annual.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    (first..last)
        .map(|year| {
            let from = annual.get(&year);
            let to = annual.get(&(year + 1));
            let from_key = from.map_or_else(
                || PeriodKey::new(FrameType::Annual, nominal_period_end(FrameType::Annual, year, 0)),
                |(key, _)| (*key).clone(),
            );
            let to_key = to.map_or_else(
                || {
                    PeriodKey::new(
                        FrameType::Annual,
                        nominal_period_end(FrameType::Annual, year + 1, 0),
                    )
                },
                |(key, _)| (*key).clone(),
            );

            pair_result(metric, GrowthKind::YearOverYear, from_key, to_key, from.map(|(_, v)| *v), to.map(|(_, v)| *v))
        })
        .collect()
}

/// QoQ for every consecutive calendar-quarter pair in the observed range.
fn compute_qoq(metric: Metric, series: &OrganizedSeries) -> Vec<GrowthResult> {
    // Quarter slots keyed by a linear calendar-quarter index
    let quarters: BTreeMap<i32, (&PeriodKey, f64)> = series
        .quarterly()
        .map(|(key, value)| {
            let quarter = (key.period_end.month0() / 3) as i32;
            (key.period_end.year() * 4 + quarter, (key, value))
        })
        .collect();

    let (Some(first), Some(last)) = (
        quarters.keys().next().copied(),
        quarters.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    (first..last)
        .map(|index| {
            let from = quarters.get(&index);
            let to = quarters.get(&(index + 1));
            let from_key = from.map_or_else(|| quarter_key(index), |(key, _)| (*key).clone());
            let to_key = to.map_or_else(|| quarter_key(index + 1), |(key, _)| (*key).clone());

            pair_result(metric, GrowthKind::QuarterOverQuarter, from_key, to_key, from.map(|(_, v)| *v), to.map(|(_, v)| *v))
        })
        .collect()
}

/// Synthesizes a key for a calendar-quarter index absent from the series.
fn quarter_key(index: i32) -> PeriodKey {
    let year = index.div_euclid(4);
    let quarter = index.rem_euclid(4) as u32 + 1;
    PeriodKey::new(
        FrameType::Quarterly,
        nominal_period_end(FrameType::Quarterly, year, quarter),
    )
}

/// Resolves one requested pair into its single result.
fn pair_result(
    metric: Metric,
    kind: GrowthKind,
    from_key: PeriodKey,
    to_key: PeriodKey,
    start: Option<f64>,
    end: Option<f64>,
) -> GrowthResult {
    match (start, end) {
        (Some(start), Some(end)) => match simple_rate(start, end) {
            Ok(rate) => GrowthResult::computed(metric, kind, from_key, to_key, rate),
            Err(caveat) => GrowthResult::caveated(metric, kind, from_key, to_key, caveat),
        },
        _ => GrowthResult::caveated(metric, kind, from_key, to_key, GrowthCaveat::InsufficientData),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn annual_series(values: &[(i32, f64)]) -> OrganizedSeries {
        let mut series = OrganizedSeries::new(Metric::NetIncome);
        for (year, value) in values {
            series.insert(
                PeriodKey::new(FrameType::Annual, date(*year, 12, 31)),
                *value,
            );
        }
        series
    }

    fn quarterly_series(values: &[(i32, u32, f64)]) -> OrganizedSeries {
        let mut series = OrganizedSeries::new(Metric::Revenue);
        for (year, quarter, value) in values {
            series.insert(
                PeriodKey::new(
                    FrameType::Quarterly,
                    nominal_period_end(FrameType::Quarterly, *year, *quarter),
                ),
                *value,
            );
        }
        series
    }

    fn yoy(results: &[GrowthResult]) -> Vec<&GrowthResult> {
        results
            .iter()
            .filter(|r| r.kind == GrowthKind::YearOverYear)
            .collect()
    }

    #[test]
    fn test_yoy_simple_growth() {
        let series = annual_series(&[(2022, 100.0), (2023, 150.0)]);
        let results = compute_growth(&series);
        let yoy = yoy(&results);

        assert_eq!(yoy.len(), 1);
        assert_relative_eq!(yoy[0].rate.unwrap(), 0.5);
        assert_eq!(yoy[0].caveat, None);
    }

    #[test]
    fn test_yoy_zero_base() {
        let series = annual_series(&[(2022, 0.0), (2023, 50.0)]);
        let results = compute_growth(&series);
        let yoy = yoy(&results);

        assert_eq!(yoy[0].rate, None);
        assert_eq!(yoy[0].caveat, Some(GrowthCaveat::ZeroBase));
    }

    #[test]
    fn test_yoy_sign_flip() {
        let series = annual_series(&[(2022, -20.0), (2023, 30.0)]);
        let results = compute_growth(&series);
        let yoy = yoy(&results);

        assert_eq!(yoy[0].rate, None);
        assert_eq!(yoy[0].caveat, Some(GrowthCaveat::SignFlip));
    }

    #[test]
    fn test_yoy_narrowing_loss_is_numeric() {
        // -50 to -20: sign unchanged, rate reflects the improvement
        let series = annual_series(&[(2022, -50.0), (2023, -20.0)]);
        let results = compute_growth(&series);
        let yoy = yoy(&results);

        assert_relative_eq!(yoy[0].rate.unwrap(), 0.6);
        assert_eq!(yoy[0].caveat, None);
    }

    #[test]
    fn test_yoy_gap_yields_insufficient_data() {
        let series = annual_series(&[(2020, 100.0), (2022, 140.0)]);
        let results = compute_growth(&series);
        let yoy = yoy(&results);

        // Requested pairs: 2020->2021 and 2021->2022, both touching the gap
        assert_eq!(yoy.len(), 2);
        assert_eq!(yoy[0].caveat, Some(GrowthCaveat::InsufficientData));
        assert_eq!(yoy[1].caveat, Some(GrowthCaveat::InsufficientData));
        assert_eq!(yoy[0].to_period.label, "FY2021");
        assert_eq!(yoy[1].from_period.label, "FY2021");
    }

    #[test]
    fn test_cagr_two_year_span() {
        let series = annual_series(&[(2021, 100.0), (2022, 120.0), (2023, 144.0)]);
        let results = compute_growth(&series);
        let cagr: Vec<_> = results
            .iter()
            .filter(|r| r.kind == GrowthKind::Cagr)
            .collect();

        assert_eq!(cagr.len(), 1);
        assert_relative_eq!(cagr[0].rate.unwrap(), 0.2, epsilon = 1e-12);
        assert_eq!(cagr[0].from_period.label, "FY2021");
        assert_eq!(cagr[0].to_period.label, "FY2023");
    }

    #[test]
    fn test_cagr_zero_endpoint() {
        let series = annual_series(&[(2021, 100.0), (2023, 0.0)]);
        let results = compute_growth(&series);
        let cagr: Vec<_> = results
            .iter()
            .filter(|r| r.kind == GrowthKind::Cagr)
            .collect();

        assert_eq!(cagr[0].rate, None);
        assert_eq!(cagr[0].caveat, Some(GrowthCaveat::ZeroBase));
    }

    #[test]
    fn test_cagr_negative_endpoint_is_sign_flip() {
        let series = annual_series(&[(2021, -10.0), (2023, 50.0)]);
        let results = compute_growth(&series);
        let cagr: Vec<_> = results
            .iter()
            .filter(|r| r.kind == GrowthKind::Cagr)
            .collect();

        assert_eq!(cagr[0].caveat, Some(GrowthCaveat::SignFlip));
    }

    #[test]
    fn test_no_cagr_from_single_year() {
        let series = annual_series(&[(2023, 100.0)]);
        let results = compute_growth(&series);
        assert!(results.iter().all(|r| r.kind != GrowthKind::Cagr));
    }

    #[test]
    fn test_qoq_across_year_boundary() {
        let series = quarterly_series(&[(2022, 4, 100.0), (2023, 1, 110.0)]);
        let results = compute_growth(&series);
        let qoq: Vec<_> = results
            .iter()
            .filter(|r| r.kind == GrowthKind::QuarterOverQuarter)
            .collect();

        assert_eq!(qoq.len(), 1);
        assert_relative_eq!(qoq[0].rate.unwrap(), 0.1);
        assert_eq!(qoq[0].from_period.label, "Q4 2022");
        assert_eq!(qoq[0].to_period.label, "Q1 2023");
    }

    #[test]
    fn test_results_ordered_oldest_first_regardless_of_insert_order() {
        let series = annual_series(&[(2023, 144.0), (2021, 100.0), (2022, 120.0)]);
        let results = compute_growth(&series);
        let labels: Vec<&str> = yoy(&results)
            .iter()
            .map(|r| r.to_period.label.as_str())
            .collect();

        assert_eq!(labels, vec!["FY2022", "FY2023"]);
    }

    #[test]
    fn test_every_requested_pair_yields_exactly_one_result() {
        let series = annual_series(&[(2019, 10.0), (2020, 0.0), (2021, -5.0), (2022, 5.0)]);
        let results = compute_growth(&series);
        let yoy = yoy(&results);

        // Three consecutive pairs, each with exactly one result
        assert_eq!(yoy.len(), 3);
        assert_eq!(yoy[0].caveat, None); // 10 -> 0 is a computable -100%
        assert_eq!(yoy[1].caveat, Some(GrowthCaveat::ZeroBase));
        assert_eq!(yoy[2].caveat, Some(GrowthCaveat::SignFlip));
        assert_relative_eq!(yoy[0].rate.unwrap(), -1.0);
    }
}
