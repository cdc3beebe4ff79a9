//! The fixed internal metric vocabulary.
//!
//! Filings report the same accounting concept under many XBRL tags, varying
//! by filer and taxonomy version. [`Metric`] is the closed vocabulary this
//! workspace tracks; each variant carries a priority-ordered synonym list of
//! accepted concept names, curated as static configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of the fixed internal metric vocabulary.
///
/// Declaration order is the resolution priority: a concept name appearing in
/// more than one synonym list maps to the earliest metric here, which keeps
/// classification deterministic across taxonomies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    /// Total revenue / net sales.
    Revenue,
    /// Gross profit.
    GrossProfit,
    /// Operating income.
    OperatingIncome,
    /// Net income.
    NetIncome,
    /// Diluted earnings per share.
    EpsDiluted,
    /// Basic earnings per share.
    EpsBasic,
    /// Net cash provided by operating activities.
    OperatingCashFlow,
}

impl Metric {
    /// All tracked metrics, in resolution priority order.
    pub const ALL: [Self; 7] = [
        Self::Revenue,
        Self::GrossProfit,
        Self::OperatingIncome,
        Self::NetIncome,
        Self::EpsDiluted,
        Self::EpsBasic,
        Self::OperatingCashFlow,
    ];

    /// Accepted XBRL concept names for this metric, highest priority first.
    ///
    /// Different companies, and the same company across taxonomy versions,
    /// tag the same concept differently; these lists cover the common
    /// variations. First match wins.
    #[must_use]
    pub const fn concepts(&self) -> &'static [&'static str] {
        match self {
            Self::Revenue => &[
                "Revenues",
                "RevenueFromContractWithCustomerExcludingAssessedTax",
                "SalesRevenueNet",
                "RevenueFromContractWithCustomerIncludingAssessedTax",
                "TotalRevenuesAndOtherIncome",
                "ServiceRevenues",
                "ProcessingAndServiceFees",
            ],
            Self::GrossProfit => &["GrossProfit", "GrossProfitLoss"],
            Self::OperatingIncome => &[
                "OperatingIncomeLoss",
                "IncomeLossFromContinuingOperationsBeforeIncomeTaxesExtraordinaryItemsNoncontrollingInterest",
                "OperatingIncomeLossBeforeIncomeTaxExpenseBenefit",
                "IncomeLossFromOperations",
            ],
            Self::NetIncome => &[
                "NetIncomeLoss",
                "ProfitLoss",
                "NetIncomeLossAvailableToCommonStockholdersBasic",
                "NetIncomeLossAttributableToParent",
            ],
            Self::EpsDiluted => &[
                "EarningsPerShareDiluted",
                "EarningsPerShareBasicAndDiluted",
            ],
            Self::EpsBasic => &[
                "EarningsPerShareBasic",
                "IncomeLossFromContinuingOperationsPerBasicShare",
            ],
            Self::OperatingCashFlow => &[
                "NetCashProvidedByUsedInOperatingActivities",
                "CashProvidedByUsedInOperatingActivities",
            ],
        }
    }

    /// Stable machine-readable name, used in tabular output and cache keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::GrossProfit => "gross_profit",
            Self::OperatingIncome => "operating_income",
            Self::NetIncome => "net_income",
            Self::EpsDiluted => "eps_diluted",
            Self::EpsBasic => "eps_basic",
            Self::OperatingCashFlow => "operating_cash_flow",
        }
    }

    /// Human-readable display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::GrossProfit => "Gross Profit",
            Self::OperatingIncome => "Operating Income",
            Self::NetIncome => "Net Income",
            Self::EpsDiluted => "Diluted EPS",
            Self::EpsBasic => "Basic EPS",
            Self::OperatingCashFlow => "Operating Cash Flow",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
