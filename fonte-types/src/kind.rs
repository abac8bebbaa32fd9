use core::fmt;

use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, cache shards, errors, and
/// telemetry.
///
/// These map one-to-one with router endpoints and allow consistent Display
/// formatting and match-exhaustive handling when adding new record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RecordKind {
    /// Daily OHLCV price history.
    Prices,
    /// Fixed-vocabulary financial ratio snapshots per report period.
    FinancialMetrics,
    /// Caller-requested sparse statement line items.
    LineItems,
    /// Insider/executive transaction filings.
    InsiderTrades,
    /// Company news and announcements.
    News,
    /// Point-in-time market capitalization.
    MarketCap,
}

impl RecordKind {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prices => "prices",
            Self::FinancialMetrics => "financial-metrics",
            Self::LineItems => "line-items",
            Self::InsiderTrades => "insider-trades",
            Self::News => "news",
            Self::MarketCap => "market-cap",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
