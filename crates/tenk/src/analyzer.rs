//! Analysis orchestration with source fallback and caching.

use std::sync::Arc;

use chrono::Datelike;
use tracing::{debug, warn};

use tenk_analysis::{assess, compute_growth, map_facts, organize};
use tenk_core::{
    AnalysisError, FactCache, FactSource, GrowthResult, Metric, OrganizedSeries, QualityReport,
    RawFact, Result, Ticker, TrailingWindow,
};

/// One metric's complete analysis output.
///
/// The three parts together are directly serializable to tabular form by an
/// export collaborator without further computation.
#[derive(Clone, Debug)]
pub struct MetricAnalysis {
    /// The metric analyzed.
    pub metric: Metric,
    /// Resolved per-period values.
    pub series: OrganizedSeries,
    /// Growth results, ordered oldest-period-first per kind.
    pub growth: Vec<GrowthResult>,
    /// Completeness accounting against the expectation window.
    pub quality: QualityReport,
}

/// Complete analysis result for one company.
#[derive(Clone, Debug)]
pub struct CompanyAnalysis {
    /// The normalized ticker the analysis describes.
    pub ticker: Ticker,
    /// Per-metric results, in metric priority order.
    pub metrics: Vec<MetricAnalysis>,
    /// Tracked metrics for which no fact mapped at all.
    ///
    /// Distinct from sparse data: a metric with some facts but gaps appears
    /// in `metrics` with a low completeness ratio instead.
    pub unavailable: Vec<Metric>,
}

impl CompanyAnalysis {
    /// Returns the analysis for a metric.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NoMappedFacts`] when no fact mapped onto the
    /// metric for this company.
    pub fn metric(&self, metric: Metric) -> Result<&MetricAnalysis> {
        self.metrics
            .iter()
            .find(|m| m.metric == metric)
            .ok_or(AnalysisError::NoMappedFacts(metric))
    }
}

/// Runs the analysis pipeline over already-fetched facts.
///
/// This is the pure core of a request: classification, organization, growth
/// derivation, and quality assessment, with no I/O. When
/// `expected_period_labels` is `None`, the expectation window defaults to
/// the trailing `window` fiscal years anchored at the latest annual period
/// observed across all metrics, so a request is reproducible given the same
/// facts.
#[must_use]
pub fn analyze_facts(
    ticker: Ticker,
    facts: Vec<RawFact>,
    expected_period_labels: Option<&[String]>,
    window: TrailingWindow,
) -> CompanyAnalysis {
    let mapped = map_facts(facts);

    let unavailable: Vec<Metric> = Metric::ALL
        .into_iter()
        .filter(|m| !mapped.contains_key(m))
        .collect();

    let organized: Vec<OrganizedSeries> = mapped
        .into_iter()
        .map(|(metric, facts)| organize(metric, &facts))
        .collect();

    let expected = match expected_period_labels {
        Some(labels) => labels.to_vec(),
        None => default_expected_labels(&organized, window),
    };

    let metrics = organized
        .into_iter()
        .map(|series| MetricAnalysis {
            metric: series.metric(),
            growth: compute_growth(&series),
            quality: assess(&series, &expected),
            series,
        })
        .collect();

    CompanyAnalysis {
        ticker,
        metrics,
        unavailable,
    }
}

/// Expected annual labels: the trailing window anchored at the latest
/// observed annual period. Empty when no annual period resolved anywhere.
fn default_expected_labels(organized: &[OrganizedSeries], window: TrailingWindow) -> Vec<String> {
    let latest_year = organized
        .iter()
        .flat_map(|s| s.annual().map(|(key, _)| key.period_end.year()))
        .max();

    let Some(latest) = latest_year else {
        return Vec::new();
    };

    let first = latest - window.len_years() as i32 + 1;
    (first..=latest).map(|year| format!("FY{}", year)).collect()
}

/// Orchestrates analysis requests against registered fact sources.
///
/// Sources are tried in registration order until one succeeds. If a cache is
/// configured, it is checked before any source and fetched fact sets are
/// written back on success; derived results are recomputed fresh per
/// request, never cached.
#[derive(Default)]
pub struct Analyzer {
    sources: Vec<Arc<dyn FactSource>>,
    cache: Option<Arc<dyn FactCache>>,
    window: TrailingWindow,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("cache", &self.cache.as_ref().map(|_| "configured"))
            .field("window", &self.window)
            .finish()
    }
}

impl Analyzer {
    /// Create a new analyzer with no sources registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fact cache.
    #[must_use]
    pub fn set_cache(mut self, cache: Arc<dyn FactCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the trailing window fetched and assessed (default five years).
    #[must_use]
    pub const fn with_window(mut self, window: TrailingWindow) -> Self {
        self.window = window;
        self
    }

    /// Register a fact source. Sources are tried in registration order.
    pub fn register_source(&mut self, source: Arc<dyn FactSource>) {
        debug!(source = source.name(), "Registering fact source");
        self.sources.push(source);
    }

    /// Add the SEC EDGAR source.
    #[cfg(feature = "edgar")]
    #[must_use]
    pub fn with_edgar(mut self, user_agent: &str) -> Self {
        self.register_source(Arc::new(tenk_edgar::EdgarSource::new(user_agent)));
        self
    }

    /// Fetch raw facts for a ticker, trying sources in order until one
    /// succeeds.
    ///
    /// If a cache is configured, it is checked first and results are cached
    /// on success.
    pub async fn fetch_facts(&self, ticker: &Ticker) -> Result<Vec<RawFact>> {
        if self.sources.is_empty() {
            return Err(AnalysisError::SourceNotConfigured(
                "No fact sources registered".to_string(),
            ));
        }

        // Check cache first
        if let Some(cache) = &self.cache {
            for source in &self.sources {
                if let Ok(Some(cached)) = cache.get_facts(source.name(), ticker).await {
                    debug!(
                        source = source.name(),
                        ticker = %ticker,
                        "Cache hit for facts"
                    );
                    return Ok(cached);
                }
            }
        }

        // Try each source in order
        let mut last_error = None;
        for source in &self.sources {
            debug!(source = source.name(), ticker = %ticker, "Fetching facts");

            match source.fetch_facts(ticker, self.window).await {
                Ok(facts) => {
                    if let Some(cache) = &self.cache {
                        if let Err(e) = cache.put_facts(source.name(), ticker, &facts).await {
                            warn!(
                                source = source.name(),
                                error = %e,
                                "Failed to cache facts"
                            );
                        }
                    }
                    return Ok(facts);
                }
                Err(e) => {
                    warn!(
                        source = source.name(),
                        error = %e,
                        "Source failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AnalysisError::Other("All sources failed with no error".to_string())))
    }

    /// Run one complete analysis request for a raw ticker string.
    ///
    /// The expectation window for quality assessment defaults to the
    /// analyzer's trailing window anchored at the latest observed annual
    /// period; use [`Self::analyze_with_expectations`] to supply explicit
    /// period labels.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidTicker`] for malformed input and any
    /// fetch error from the sources. Metrics with no mapped facts are not an
    /// error; they surface in [`CompanyAnalysis::unavailable`].
    pub async fn analyze(&self, raw_ticker: &str) -> Result<CompanyAnalysis> {
        self.analyze_inner(raw_ticker, None).await
    }

    /// Run one analysis request measuring quality against explicit labels.
    pub async fn analyze_with_expectations(
        &self,
        raw_ticker: &str,
        expected_period_labels: &[String],
    ) -> Result<CompanyAnalysis> {
        self.analyze_inner(raw_ticker, Some(expected_period_labels))
            .await
    }

    async fn analyze_inner(
        &self,
        raw_ticker: &str,
        expected_period_labels: Option<&[String]>,
    ) -> Result<CompanyAnalysis> {
        let ticker = Ticker::normalize(raw_ticker)?;
        let facts = self.fetch_facts(&ticker).await?;

        debug!(ticker = %ticker, facts = facts.len(), "Running analysis pipeline");
        Ok(analyze_facts(
            ticker,
            facts,
            expected_period_labels,
            self.window,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tenk_core::FrameType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn annual_fact(concept: &str, value: f64, year: i32) -> RawFact {
        RawFact::new(
            concept,
            Some(value),
            "USD",
            date(year, 12, 31),
            date(year + 1, 2, 1),
            FrameType::Annual,
        )
    }

    #[test]
    fn test_unmapped_metrics_surface_as_unavailable() {
        let ticker = Ticker::normalize("AAPL").unwrap();
        let facts = vec![
            annual_fact("Revenues", 100.0, 2022),
            annual_fact("Revenues", 120.0, 2023),
        ];

        let analysis = analyze_facts(ticker, facts, None, TrailingWindow::default());

        assert_eq!(analysis.metrics.len(), 1);
        assert!(analysis.unavailable.contains(&Metric::NetIncome));
        assert!(!analysis.unavailable.contains(&Metric::Revenue));

        let err = analysis.metric(Metric::NetIncome).unwrap_err();
        assert!(matches!(err, AnalysisError::NoMappedFacts(Metric::NetIncome)));
    }

    #[test]
    fn test_default_expectations_anchor_at_latest_annual_period() {
        let ticker = Ticker::normalize("AAPL").unwrap();
        let facts = vec![
            annual_fact("Revenues", 100.0, 2021),
            annual_fact("Revenues", 120.0, 2023),
        ];

        let analysis = analyze_facts(ticker, facts, None, TrailingWindow::years(3));
        let quality = &analysis.metric(Metric::Revenue).unwrap().quality;

        assert_eq!(quality.expected_periods, 3);
        assert_eq!(quality.missing_period_labels, vec!["FY2022"]);
        assert!((quality.completeness_ratio - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_explicit_expectations_override_defaults() {
        let ticker = Ticker::normalize("AAPL").unwrap();
        let facts = vec![annual_fact("Revenues", 100.0, 2023)];
        let labels: Vec<String> = vec!["FY2023".to_string(), "FY2024".to_string()];

        let analysis = analyze_facts(ticker, facts, Some(&labels), TrailingWindow::default());
        let quality = &analysis.metric(Metric::Revenue).unwrap().quality;

        assert_eq!(quality.expected_periods, 2);
        assert_eq!(quality.missing_period_labels, vec!["FY2024"]);
    }

    #[tokio::test]
    async fn test_fetch_without_sources_is_an_error() {
        let analyzer = Analyzer::new();
        let ticker = Ticker::normalize("AAPL").unwrap();

        let err = analyzer.fetch_facts(&ticker).await.unwrap_err();
        assert!(matches!(err, AnalysisError::SourceNotConfigured(_)));
    }

    #[tokio::test]
    async fn test_analyze_rejects_malformed_ticker_before_fetching() {
        let analyzer = Analyzer::new();

        // Invalid input fails on normalization even with no sources registered
        let err = analyzer.analyze("not a ticker").await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidTicker { .. }));
    }
}
