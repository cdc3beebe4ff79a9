//! Ticker symbol validation and normalization.
//!
//! User input is normalized once, upstream of any data fetch: whitespace
//! stripped, uppercased, known symbol drifts corrected, and dot-separated
//! share-class suffixes rewritten to the hyphenated form the SEC ticker index
//! actually uses (`BRK.A` → `BRK-A`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Curated corrections for well-known symbol drifts.
///
/// Covers dot-class forms the source index spells with a hyphen, and
/// renames/delistings that users still type. Empirically curated, versioned
/// with the crate; extend as new drifts show up.
const CORRECTIONS: &[(&str, &str)] = &[
    ("BRK.A", "BRK-A"),
    ("BRK.B", "BRK-B"),
    ("BF.A", "BF-A"),
    ("BF.B", "BF-B"),
    ("FB", "META"),
    ("TWTR", "X"),
];

/// A validated, canonicalized ticker symbol.
///
/// Construct via [`Ticker::normalize`]; a value of this type always matches
/// the canonical form: 1-5 ASCII letters, optionally followed by a hyphen and
/// a single-letter share class.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Validates and canonicalizes a raw ticker string.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidTicker`] with a human-readable reason
    /// when the input does not resolve to a valid symbol after correction.
    ///
    /// # Example
    ///
    /// ```
    /// use tenk_core::Ticker;
    ///
    /// assert_eq!(Ticker::normalize(" brk.a ").unwrap().as_str(), "BRK-A");
    /// assert!(Ticker::normalize("TOOLONG1").is_err());
    /// ```
    pub fn normalize(raw: &str) -> Result<Self> {
        let invalid = |reason: String| AnalysisError::InvalidTicker {
            input: raw.to_string(),
            reason,
        };

        let mut ticker = raw.trim().to_uppercase();

        if ticker.is_empty() {
            return Err(invalid("ticker symbol required".to_string()));
        }
        if ticker.len() > 10 || ticker.contains(' ') {
            return Err(invalid(format!(
                "'{}' doesn't look like a ticker symbol; use a symbol like 'AAPL' or 'MSFT'",
                raw.trim()
            )));
        }

        if let Some((_, to)) = CORRECTIONS.iter().find(|(from, _)| *from == ticker) {
            ticker = (*to).to_string();
        }

        // Dot-separated share-class suffix: the source index uses hyphens
        if let Some((root, class)) = ticker.split_once('.')
            && class.len() == 1
        {
            ticker = format!("{}-{}", root, class);
        }

        if !is_canonical(&ticker) {
            return Err(invalid(format!(
                "'{}' is not a valid ticker symbol (1-5 letters, optional share class like 'BRK-A')",
                ticker
            )));
        }

        Ok(Self(ticker))
    }

    /// Returns the canonical symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Checks the canonical pattern: 1-5 letters, optional `-X` class suffix.
fn is_canonical(s: &str) -> bool {
    let (root, class) = match s.split_once('-') {
        Some((root, class)) => (root, Some(class)),
        None => (s, None),
    };

    let root_ok =
        !root.is_empty() && root.len() <= 5 && root.chars().all(|c| c.is_ascii_uppercase());
    let class_ok = class.is_none_or(|c| c.len() == 1 && c.chars().all(|c| c.is_ascii_uppercase()));

    root_ok && class_ok
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        Self::normalize(s)
    }
}
