#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR fact source.
//!
//! This crate fetches raw reported facts from SEC EDGAR:
//!
//! - CIK (Central Index Key) lookup from ticker symbols
//! - Company facts from the EDGAR XBRL API
//! - Flattening of the company-facts payload into [`RawFact`]s
//!
//! # Example
//!
//! ```no_run
//! use tenk_edgar::EdgarSource;
//! use tenk_core::{FactSource, Ticker, TrailingWindow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = EdgarSource::new("MyApp/1.0 (contact@example.com)");
//!
//!     let ticker = Ticker::normalize("AAPL")?;
//!     let facts = source.fetch_facts(&ticker, TrailingWindow::default()).await?;
//!     println!("{} facts fetched", facts.len());
//!
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

use tenk_core::{
    AnalysisError, FactSource, FrameType, RawFact, Result, Ticker, TrailingWindow,
};

/// SEC EDGAR API base URL
const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// SEC company tickers URL
const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Default rate limit: 10 requests per second (SEC requirement)
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Taxonomies scanned for facts, in priority order.
const TAXONOMIES: [&str; 2] = ["us-gaap", "dei"];

/// Unit types kept when flattening, monetary values first.
const UNIT_TYPES: [&str; 3] = ["USD", "shares", "pure"];

/// Rate limiter to ensure we don't exceed SEC's rate limits
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// SEC EDGAR fact source.
///
/// Fetches the company-facts payload for a ticker and flattens it into raw
/// reported facts. Implements rate limiting per SEC requirements (max 10
/// requests/second).
#[derive(Debug)]
pub struct EdgarSource {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    #[allow(dead_code)]
    user_agent: String,
}

impl EdgarSource {
    /// Create a new EDGAR source with the specified user agent.
    ///
    /// The SEC requires identifying user agent headers. Format should be:
    /// "AppName/Version (contact@email.com)"
    ///
    /// # Example
    /// ```
    /// use tenk_edgar::EdgarSource;
    ///
    /// let source = EdgarSource::new("MyApp/1.0 (contact@example.com)");
    /// ```
    #[must_use]
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self::with_client(client, user_agent)
    }

    /// Create a new EDGAR source with a custom HTTP client.
    ///
    /// # Arguments
    /// * `client` - Pre-configured reqwest client
    /// * `user_agent` - User agent string (for identification purposes)
    #[must_use]
    pub fn with_client(client: reqwest::Client, user_agent: &str) -> Self {
        Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(DEFAULT_RATE_LIMIT))),
            user_agent: user_agent.to_string(),
        }
    }

    /// Look up a company's CIK number from its ticker symbol.
    ///
    /// # Returns
    /// The company's CIK number as a zero-padded 10-digit string
    pub async fn get_cik(&self, ticker: &Ticker) -> Result<String> {
        self.rate_limiter.lock().await.wait().await;

        debug!("Fetching company tickers from SEC");
        let response = self
            .client
            .get(COMPANY_TICKERS_URL)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Network(format!(
                "Failed to fetch company tickers: HTTP {}",
                response.status()
            )));
        }

        let data: HashMap<String, CompanyTickerInfo> = response
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(format!("Failed to parse company tickers: {}", e)))?;

        for company in data.values() {
            if company.ticker.eq_ignore_ascii_case(ticker.as_str()) {
                let cik = format!("{:0>10}", company.cik_str);
                debug!("Found CIK {} for ticker {}", cik, ticker);
                return Ok(cik);
            }
        }

        Err(AnalysisError::SymbolNotFound(ticker.to_string()))
    }

    /// Fetch company facts from SEC EDGAR.
    async fn fetch_company_facts(&self, cik: &str) -> Result<CompanyFactsResponse> {
        let cik_padded = format!("{:0>10}", cik);

        self.rate_limiter.lock().await.wait().await;

        let url = format!(
            "{}/api/xbrl/companyfacts/CIK{}.json",
            EDGAR_BASE_URL, cik_padded
        );

        debug!("Fetching company facts from {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Network(format!(
                "Failed to fetch company facts for CIK {}: HTTP {}",
                cik_padded,
                response.status()
            )));
        }

        let facts: CompanyFactsResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(format!("Failed to parse company facts: {}", e)))?;

        Ok(facts)
    }
}

#[async_trait]
impl FactSource for EdgarSource {
    fn name(&self) -> &str {
        "SEC EDGAR"
    }

    fn description(&self) -> &str {
        "SEC EDGAR fact source for reported fundamentals from 10-K and 10-Q filings"
    }

    fn supported_frames(&self) -> &[FrameType] {
        &[FrameType::Annual, FrameType::Quarterly]
    }

    async fn fetch_facts(&self, ticker: &Ticker, window: TrailingWindow) -> Result<Vec<RawFact>> {
        let cik = self.get_cik(ticker).await?;
        let response = self.fetch_company_facts(&cik).await?;

        let facts = flatten_facts(&response, window);
        debug!(
            ticker = %ticker,
            cik = %cik,
            count = facts.len(),
            "Flattened company facts"
        );

        Ok(facts)
    }
}

/// Flattens a company-facts payload into raw facts within a trailing window.
///
/// Keeps `us-gaap` and `dei` facts in USD/shares/pure units that came from a
/// 10-K or 10-Q (or their amendments). The frame is classified from the
/// fiscal period marker: `FY` entries are annual, `Q1`-`Q4` quarterly. The
/// window keeps the most recent `n` calendar years of period ends, measured
/// back from the newest fact in the payload. Output order is deterministic
/// regardless of payload map ordering.
fn flatten_facts(response: &CompanyFactsResponse, window: TrailingWindow) -> Vec<RawFact> {
    let mut facts = Vec::new();

    for taxonomy in TAXONOMIES {
        let Some(taxonomy_facts) = response.facts.get(taxonomy) else {
            continue;
        };
        for (tag, tag_facts) in taxonomy_facts {
            let Some(units) = &tag_facts.units else {
                continue;
            };
            for unit_type in UNIT_TYPES {
                let Some(values) = units.get(unit_type) else {
                    continue;
                };
                for value in values {
                    if let Some(fact) = to_raw_fact(tag, unit_type, value) {
                        facts.push(fact);
                    }
                }
            }
        }
    }

    if let Some(latest) = facts.iter().map(|f| f.period_end).max() {
        let cutoff_year = latest.year() - window.len_years() as i32;
        facts.retain(|f| f.period_end.year() > cutoff_year);
    }

    facts.sort_by(|a, b| {
        (a.concept.as_str(), a.frame, a.period_end, a.filed).cmp(&(
            b.concept.as_str(),
            b.frame,
            b.period_end,
            b.filed,
        ))
    });
    facts
}

/// Converts one payload entry into a raw fact, if it is usable.
///
/// Entries are skipped when they lack a parseable period end or filing date,
/// did not come from a 10-K/10-Q, or carry no fiscal period marker.
fn to_raw_fact(tag: &str, unit: &str, value: &FactValue) -> Option<RawFact> {
    let form = value.form.as_deref()?;
    FrameType::from_form(form)?;

    let frame = match value.fp.as_deref() {
        Some("FY") => FrameType::Annual,
        Some("Q1" | "Q2" | "Q3" | "Q4") => FrameType::Quarterly,
        _ => return None,
    };

    let period_end = parse_date_str(&value.end)?;
    let filed = value.filed.as_deref().and_then(parse_date_str)?;

    let mut fact = RawFact::new(tag, value.val, unit, period_end, filed, frame);
    if let Some(start) = value.start.as_deref().and_then(parse_date_str) {
        fact = fact.with_period_start(start);
    }
    Some(fact)
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

// =============================================================================
// SEC API Response Types
// =============================================================================

/// Company ticker information from SEC JSON.
#[derive(Debug, Deserialize)]
struct CompanyTickerInfo {
    /// CIK as a number (SEC returns this as an integer)
    cik_str: u64,
    /// Ticker symbol
    ticker: String,
    /// Company name
    #[allow(dead_code)]
    title: String,
}

/// Response from the SEC EDGAR Company Facts API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyFactsResponse {
    /// CIK number
    #[allow(dead_code)]
    cik: u64,
    /// Entity name
    #[allow(dead_code)]
    entity_name: String,
    /// Facts organized by taxonomy and tag
    facts: HashMap<String, HashMap<String, TagFacts>>,
}

/// Facts for a specific XBRL tag.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct TagFacts {
    /// Label/description
    label: Option<String>,
    /// Description
    description: Option<String>,
    /// Units (USD, shares, etc.) containing the actual fact values
    units: Option<HashMap<String, Vec<FactValue>>>,
}

/// A single fact value with metadata.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
struct FactValue {
    /// Start date of the period
    #[serde(default)]
    start: Option<String>,
    /// End date of the period
    end: String,
    /// Value
    #[serde(default)]
    val: Option<f64>,
    /// Accession number
    #[serde(default)]
    accn: Option<String>,
    /// Fiscal year
    #[serde(default)]
    fy: Option<i32>,
    /// Fiscal period
    #[serde(default)]
    fp: Option<String>,
    /// Form type
    #[serde(default)]
    form: Option<String>,
    /// Filed date
    #[serde(default)]
    filed: Option<String>,
    /// Frame (instant or duration)
    #[serde(default)]
    frame: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================
