//! The fetch collaborator boundary.
//!
//! The pipeline itself performs no I/O; raw facts arrive through a
//! [`FactSource`] implementation. The source owns transport concerns
//! (authentication headers, rate limiting, retries); this trait only fixes
//! the shape of what it must produce.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Result;
use crate::fact::RawFact;
use crate::frame::FrameType;
use crate::ticker::Ticker;

/// Trailing window of reporting periods to fetch, measured in fiscal years.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrailingWindow {
    years: u32,
}

impl TrailingWindow {
    /// Creates a window spanning the given number of trailing fiscal years.
    #[must_use]
    pub const fn years(years: u32) -> Self {
        Self { years }
    }

    /// The number of trailing fiscal years covered.
    #[must_use]
    pub const fn len_years(&self) -> u32 {
        self.years
    }
}

impl Default for TrailingWindow {
    /// Five trailing fiscal years.
    fn default() -> Self {
        Self::years(5)
    }
}

/// A source of raw reported facts for a company.
///
/// Implementations fetch and deserialize the upstream payload into
/// [`RawFact`]s; they do not classify, organize, or derive anything.
#[async_trait]
pub trait FactSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "SEC EDGAR").
    fn name(&self) -> &str;

    /// Returns a description of this source.
    fn description(&self) -> &str;

    /// Returns the reporting frames this source can supply.
    fn supported_frames(&self) -> &[FrameType];

    /// Fetches all raw facts for a company within a trailing window.
    ///
    /// Returns facts for every concept the source reports; mapping onto the
    /// tracked metric vocabulary happens downstream.
    async fn fetch_facts(&self, ticker: &Ticker, window: TrailingWindow) -> Result<Vec<RawFact>>;
}
