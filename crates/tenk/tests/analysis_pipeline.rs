//! End-to-end tests for the analysis pipeline over synthetic fact sets.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use tenk::{
    AnalysisError, Analyzer, FrameType, GrowthCaveat, GrowthKind, InMemoryCache, Metric, RawFact,
    Ticker, TrailingWindow, analyze_facts, tabular,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn annual_fact(concept: &str, value: f64, year: i32, filed: NaiveDate) -> RawFact {
    RawFact::new(
        concept,
        Some(value),
        "USD",
        date(year, 12, 31),
        filed,
        FrameType::Annual,
    )
    .with_period_start(date(year, 1, 1))
}

fn quarterly_fact(concept: &str, value: f64, end: NaiveDate) -> RawFact {
    RawFact::new(concept, Some(value), "USD", end, end + chrono::Days::new(40), FrameType::Quarterly)
}

/// A plausible little company: growing revenue with one restatement, net
/// income crossing from loss to profit, and a quarterly revenue tail.
fn synthetic_facts() -> Vec<RawFact> {
    vec![
        // Annual revenue, FY2021-FY2023; FY2022 restated upward in a later filing
        annual_fact("Revenues", 100.0, 2021, date(2022, 2, 15)),
        annual_fact("Revenues", 118.0, 2022, date(2023, 2, 15)),
        annual_fact("Revenues", 120.0, 2022, date(2023, 8, 1)),
        annual_fact("RevenueFromContractWithCustomerExcludingAssessedTax", 150.0, 2023, date(2024, 2, 15)),
        // Net income turns profitable in FY2023
        annual_fact("NetIncomeLoss", -30.0, 2021, date(2022, 2, 15)),
        annual_fact("NetIncomeLoss", -12.0, 2022, date(2023, 2, 15)),
        annual_fact("ProfitLoss", 8.0, 2023, date(2024, 2, 15)),
        // Quarterly revenue for 2023
        quarterly_fact("Revenues", 30.0, date(2023, 3, 31)),
        quarterly_fact("Revenues", 34.0, date(2023, 6, 30)),
        quarterly_fact("Revenues", 40.0, date(2023, 9, 30)),
        quarterly_fact("Revenues", 46.0, date(2023, 12, 31)),
        // Noise the mapper should drop
        quarterly_fact("DeferredTaxAssetsNet", 7.0, date(2023, 12, 31)),
    ]
}

#[test]
fn test_full_analysis_workflow() {
    let ticker = Ticker::normalize("brk.a").unwrap();
    assert_eq!(ticker.as_str(), "BRK-A");

    let analysis = analyze_facts(ticker, synthetic_facts(), None, TrailingWindow::years(3));

    // Revenue: restatement resolved to the later filing, synonyms merged
    let revenue = analysis.metric(Metric::Revenue).unwrap();
    let annual_values: Vec<f64> = revenue.series.annual().map(|(_, v)| v).collect();
    assert_eq!(annual_values, vec![100.0, 120.0, 150.0]);

    // Revenue YoY: oldest first, both computable
    let yoy: Vec<_> = revenue
        .growth
        .iter()
        .filter(|r| r.kind == GrowthKind::YearOverYear)
        .collect();
    assert_eq!(yoy.len(), 2);
    assert_relative_eq!(yoy[0].rate.unwrap(), 0.2);
    assert_relative_eq!(yoy[1].rate.unwrap(), 0.25);
    assert_eq!(yoy[0].from_period.label, "FY2021");
    assert_eq!(yoy[1].to_period.label, "FY2023");

    // Revenue CAGR across the full span: (150/100)^(1/2) - 1
    let cagr = revenue
        .growth
        .iter()
        .find(|r| r.kind == GrowthKind::Cagr)
        .unwrap();
    assert_relative_eq!(cagr.rate.unwrap(), (1.5_f64).sqrt() - 1.0, epsilon = 1e-12);

    // Revenue QoQ: three consecutive pairs
    let qoq: Vec<_> = revenue
        .growth
        .iter()
        .filter(|r| r.kind == GrowthKind::QuarterOverQuarter)
        .collect();
    assert_eq!(qoq.len(), 3);
    assert_relative_eq!(qoq[2].rate.unwrap(), 0.15);

    // Net income: narrowing loss is numeric, the turnaround is caveated
    let net_income = analysis.metric(Metric::NetIncome).unwrap();
    let ni_yoy: Vec<_> = net_income
        .growth
        .iter()
        .filter(|r| r.kind == GrowthKind::YearOverYear)
        .collect();
    assert_relative_eq!(ni_yoy[0].rate.unwrap(), 0.6);
    assert_eq!(ni_yoy[1].rate, None);
    assert_eq!(ni_yoy[1].caveat, Some(GrowthCaveat::SignFlip));

    // Quality: all three expected years covered for revenue
    assert_eq!(revenue.quality.expected_periods, 3);
    assert_eq!(revenue.quality.completeness_ratio, 1.0);
    assert!(revenue.quality.missing_period_labels.is_empty());

    // Untracked concepts never invent a metric; unreported metrics surface
    assert!(analysis.unavailable.contains(&Metric::GrossProfit));
    assert!(matches!(
        analysis.metric(Metric::GrossProfit).unwrap_err(),
        AnalysisError::NoMappedFacts(Metric::GrossProfit)
    ));
}

#[test]
fn test_analysis_is_deterministic_under_input_shuffling() {
    let ticker = Ticker::normalize("AAPL").unwrap();

    let forward = analyze_facts(
        ticker.clone(),
        synthetic_facts(),
        None,
        TrailingWindow::years(3),
    );
    let mut shuffled = synthetic_facts();
    shuffled.reverse();
    let reversed = analyze_facts(ticker, shuffled, None, TrailingWindow::years(3));

    let forward_revenue = forward.metric(Metric::Revenue).unwrap();
    let reversed_revenue = reversed.metric(Metric::Revenue).unwrap();

    assert_eq!(forward_revenue.series, reversed_revenue.series);
    assert_eq!(forward_revenue.growth, reversed_revenue.growth);
    assert_eq!(forward_revenue.quality, reversed_revenue.quality);
}

#[test]
fn test_tabular_export_round_trip() {
    let ticker = Ticker::normalize("AAPL").unwrap();
    let analysis = analyze_facts(ticker, synthetic_facts(), None, TrailingWindow::years(3));

    let series = tabular::series_frame(&analysis).unwrap();
    let growth = tabular::growth_frame(&analysis).unwrap();
    let quality = tabular::quality_frame(&analysis).unwrap();

    let total_periods: usize = analysis.metrics.iter().map(|m| m.series.len()).sum();
    let total_growth: usize = analysis.metrics.iter().map(|m| m.growth.len()).sum();

    assert_eq!(series.height(), total_periods);
    assert_eq!(growth.height(), total_growth);
    assert_eq!(quality.height(), analysis.metrics.len());

    // The caveated turnaround row survives export as null-rate + caveat text
    let rates = growth.column("rate").unwrap().f64().unwrap();
    let caveats = growth.column("caveat").unwrap().str().unwrap();
    let caveated: Vec<usize> = (0..growth.height())
        .filter(|&i| caveats.get(i).is_some())
        .collect();
    assert!(!caveated.is_empty());
    for i in caveated {
        assert!(rates.get(i).is_none());
    }
}

#[tokio::test]
async fn test_analyzer_surfaces_ticker_errors() {
    let analyzer = Analyzer::new().set_cache(std::sync::Arc::new(InMemoryCache::new()));

    let err = analyzer.analyze("12345").await.unwrap_err();
    match err {
        AnalysisError::InvalidTicker { input, reason } => {
            assert_eq!(input, "12345");
            assert!(!reason.is_empty());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
