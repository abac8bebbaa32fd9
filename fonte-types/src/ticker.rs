use core::fmt;

use serde::{Deserialize, Serialize};

/// Broad-market US index symbols with a known provider mapping.
///
/// Classification is membership-based; an unknown caret-prefixed symbol still
/// classifies as `UsIndex` only if it appears here, otherwise it falls through
/// to `UsEquity` and fails at fetch time if no connector accepts it.
pub const US_INDEX_SYMBOLS: &[&str] = &["^GSPC", "^IXIC", "^DJI", "^NDX"];

/// Trading-venue classification of a ticker string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketSegment {
    /// US-listed equity (the default for any unrecognized symbol).
    UsEquity,
    /// Broad-market US index (caret-prefixed, fixed symbol table).
    UsIndex,
    /// Mainland China A-share (6-digit code with an `SH`/`SZ` suffix).
    AShare,
}

impl MarketSegment {
    /// Stable, kebab-case identifier for logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsEquity => "us-equity",
            Self::UsIndex => "us-index",
            Self::AShare => "a-share",
        }
    }
}

impl fmt::Display for MarketSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a ticker string into its market segment.
///
/// Pure and total: every string classifies, nothing is rejected here. Routing
/// relies on this being deterministic for the lifetime of a process, so the
/// rules are fixed:
///
/// - exactly one `.` separator, a 6-ASCII-digit prefix, and an `SH`/`SZ`
///   suffix → [`MarketSegment::AShare`];
/// - membership in [`US_INDEX_SYMBOLS`] → [`MarketSegment::UsIndex`];
/// - anything else → [`MarketSegment::UsEquity`].
#[must_use]
pub fn classify(symbol: &str) -> MarketSegment {
    if is_ashare_symbol(symbol) {
        return MarketSegment::AShare;
    }
    if US_INDEX_SYMBOLS.contains(&symbol) {
        return MarketSegment::UsIndex;
    }
    MarketSegment::UsEquity
}

fn is_ashare_symbol(symbol: &str) -> bool {
    let mut parts = symbol.splitn(3, '.');
    let (Some(code), Some(exchange), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    matches!(exchange, "SH" | "SZ")
        && code.len() == 6
        && code.bytes().all(|b| b.is_ascii_digit())
}

/// An instrument identifier string plus its derived market segment.
///
/// The segment is computed once at construction; repeated routing decisions
/// for the same string can never diverge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker {
    symbol: String,
    segment: MarketSegment,
}

impl Ticker {
    /// Build a ticker, classifying its market segment.
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        let segment = classify(&symbol);
        Self { symbol, segment }
    }

    /// The raw symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.symbol
    }

    /// The derived market segment.
    #[must_use]
    pub const fn segment(&self) -> MarketSegment {
        self.segment
    }

    /// The 6-digit exchange code for A-share tickers, `None` otherwise.
    #[must_use]
    pub fn ashare_code(&self) -> Option<&str> {
        match self.segment {
            MarketSegment::AShare => self.symbol.split('.').next(),
            _ => None,
        }
    }

    /// Whether the ticker trades on the Shanghai exchange.
    #[must_use]
    pub fn is_shanghai(&self) -> bool {
        self.segment == MarketSegment::AShare && self.symbol.ends_with(".SH")
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ashare_pattern() {
        assert_eq!(classify("600519.SH"), MarketSegment::AShare);
        assert_eq!(classify("000001.SZ"), MarketSegment::AShare);
    }

    #[test]
    fn wrong_digit_count_falls_through_to_equity() {
        assert_eq!(classify("60051.SH"), MarketSegment::UsEquity);
        assert_eq!(classify("6005190.SH"), MarketSegment::UsEquity);
    }

    #[test]
    fn non_numeric_code_is_equity() {
        assert_eq!(classify("60051A.SH"), MarketSegment::UsEquity);
        assert_eq!(classify("600519.HK"), MarketSegment::UsEquity);
        assert_eq!(classify("600519.SH.SZ"), MarketSegment::UsEquity);
    }

    #[test]
    fn known_indices() {
        for sym in US_INDEX_SYMBOLS {
            assert_eq!(classify(sym), MarketSegment::UsIndex);
        }
        // Unknown caret symbols are equities until fetch time.
        assert_eq!(classify("^RUT"), MarketSegment::UsEquity);
    }

    #[test]
    fn plain_symbols_are_equities() {
        assert_eq!(classify("AAPL"), MarketSegment::UsEquity);
        assert_eq!(classify(""), MarketSegment::UsEquity);
        assert_eq!(classify("BRK.B"), MarketSegment::UsEquity);
    }

    #[test]
    fn ticker_accessors() {
        let t = Ticker::new("600519.SH");
        assert_eq!(t.ashare_code(), Some("600519"));
        assert!(t.is_shanghai());
        assert_eq!(Ticker::new("AAPL").ashare_code(), None);
    }
}
