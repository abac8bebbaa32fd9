use async_trait::async_trait;
use chrono::NaiveDate;

use fonte_types::{
    CompanyNewsRecord, FinancialMetricsSnapshot, FonteError, InsiderTradeRecord, LineItemRecord,
    MarketSegment, PricePoint, Ticker,
};

/// Focused role trait for connectors that provide daily OHLCV history.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Fetch daily bars for the inclusive `[start, end]` window, ascending by
    /// date, with at most one bar per trading day.
    async fn prices(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, FonteError>;
}

/// Focused role trait for connectors that provide ratio snapshots.
#[async_trait]
pub trait FinancialMetricsProvider: Send + Sync {
    /// Fetch up to `limit` snapshots with `report_period <= end`, most recent
    /// first. Metrics the upstream cannot supply stay `None`.
    async fn financial_metrics(
        &self,
        ticker: &Ticker,
        end: NaiveDate,
        period: fonte_types::PeriodKind,
        limit: usize,
    ) -> Result<Vec<FinancialMetricsSnapshot>, FonteError>;
}

/// Focused role trait for connectors that resolve caller-named statement
/// line items.
#[async_trait]
pub trait LineItemsProvider: Send + Sync {
    /// Fetch up to `limit` records with `report_period <= end`, most recent
    /// first. Each record carries exactly the requested `items`, mapping a
    /// name to `None` when it cannot be supplied or derived.
    async fn line_items(
        &self,
        ticker: &Ticker,
        items: &[String],
        end: NaiveDate,
        period: fonte_types::PeriodKind,
        limit: usize,
    ) -> Result<Vec<LineItemRecord>, FonteError>;
}

/// Focused role trait for connectors that provide insider transaction
/// filings.
#[async_trait]
pub trait InsiderTradesProvider: Send + Sync {
    /// Fetch filings dated in `[start, end]` (by transaction date, falling
    /// back to filing date). `limit` is the per-page size for paged
    /// upstreams, not a cap on the total.
    async fn insider_trades(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<InsiderTradeRecord>, FonteError>;
}

/// Focused role trait for connectors that provide company news.
#[async_trait]
pub trait CompanyNewsProvider: Send + Sync {
    /// Fetch news dated in `[start, end]`. `limit` is the per-page size for
    /// paged upstreams, not a cap on the total.
    async fn news(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<CompanyNewsRecord>, FonteError>;
}

/// Focused role trait for connectors that resolve point-in-time market
/// capitalization.
#[async_trait]
pub trait MarketCapProvider: Send + Sync {
    /// Resolve the market cap in effect on `end`, or `None` when the
    /// upstream has no figure for that date.
    async fn market_cap(&self, ticker: &Ticker, end: NaiveDate)
    -> Result<Option<f64>, FonteError>;
}

/// Umbrella trait implemented by every data connector.
///
/// A connector advertises the market segments it serves and exposes the role
/// traits it actually implements through `as_*_provider` accessors; the
/// default for each accessor is `None`, so a connector opts into exactly the
/// capabilities it has.
pub trait FonteConnector: Send + Sync {
    /// Stable, lowercase connector name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Whether this connector serves instruments in `segment`.
    fn supports_segment(&self, segment: MarketSegment) -> bool;

    /// Access the price history capability, if implemented.
    fn as_price_history_provider(&self) -> Option<&dyn PriceHistoryProvider> {
        None
    }

    /// Access the financial metrics capability, if implemented.
    fn as_financial_metrics_provider(&self) -> Option<&dyn FinancialMetricsProvider> {
        None
    }

    /// Access the line items capability, if implemented.
    fn as_line_items_provider(&self) -> Option<&dyn LineItemsProvider> {
        None
    }

    /// Access the insider trades capability, if implemented.
    fn as_insider_trades_provider(&self) -> Option<&dyn InsiderTradesProvider> {
        None
    }

    /// Access the company news capability, if implemented.
    fn as_company_news_provider(&self) -> Option<&dyn CompanyNewsProvider> {
        None
    }

    /// Access the market cap capability, if implemented.
    fn as_market_cap_provider(&self) -> Option<&dyn MarketCapProvider> {
        None
    }
}
