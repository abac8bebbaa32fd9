#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use fonte::{
    CompanyNewsProvider, CompanyNewsRecord, FinancialMetricsProvider, FinancialMetricsSnapshot,
    FonteConnector, FonteError, InsiderTradeRecord, InsiderTradesProvider, LineItemRecord,
    LineItemsProvider, MarketCapProvider, MarketSegment, PeriodKind, PriceHistoryProvider,
    PricePoint, Ticker,
};
use tokio::time::{Duration, sleep};

/// Simple in-memory connector used by integration tests.
///
/// Capabilities are opted into by setting the matching closure; the
/// `as_*_provider` accessors answer `None` while the closure is unset.
/// `calls` counts every provider invocation across capabilities.
pub struct MockConnector {
    pub name: &'static str,
    pub segment_ok: Option<MarketSegment>,
    pub delay: Option<Duration>,
    pub calls: Arc<AtomicUsize>,

    pub prices_fn: Option<
        Arc<dyn Fn(&Ticker, NaiveDate, NaiveDate) -> Result<Vec<PricePoint>, FonteError> + Send + Sync>,
    >,
    pub metrics_fn: Option<
        Arc<
            dyn Fn(&Ticker, NaiveDate, PeriodKind, usize) -> Result<Vec<FinancialMetricsSnapshot>, FonteError>
                + Send
                + Sync,
        >,
    >,
    pub line_items_fn: Option<
        Arc<
            dyn Fn(&Ticker, &[String], NaiveDate, PeriodKind, usize) -> Result<Vec<LineItemRecord>, FonteError>
                + Send
                + Sync,
        >,
    >,
    pub insider_trades_fn: Option<
        Arc<
            dyn Fn(&Ticker, Option<NaiveDate>, NaiveDate, usize) -> Result<Vec<InsiderTradeRecord>, FonteError>
                + Send
                + Sync,
        >,
    >,
    pub news_fn: Option<
        Arc<
            dyn Fn(&Ticker, Option<NaiveDate>, NaiveDate, usize) -> Result<Vec<CompanyNewsRecord>, FonteError>
                + Send
                + Sync,
        >,
    >,
    pub market_cap_fn:
        Option<Arc<dyn Fn(&Ticker, NaiveDate) -> Result<Option<f64>, FonteError> + Send + Sync>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            name: "mock",
            segment_ok: None,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            prices_fn: None,
            metrics_fn: None,
            line_items_fn: None,
            insider_trades_fn: None,
            news_fn: None,
            market_cap_fn: None,
        }
    }
}

impl MockConnector {
    /// A connector answering only for `segment`.
    pub fn for_segment(name: &'static str, segment: MarketSegment) -> Self {
        Self {
            name,
            segment_ok: Some(segment),
            ..Self::default()
        }
    }

    /// Number of provider calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
    }
}

impl FonteConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports_segment(&self, segment: MarketSegment) -> bool {
        self.segment_ok.is_none_or(|ok| ok == segment)
    }

    fn as_price_history_provider(&self) -> Option<&dyn PriceHistoryProvider> {
        self.prices_fn.as_ref().map(|_| self as _)
    }

    fn as_financial_metrics_provider(&self) -> Option<&dyn FinancialMetricsProvider> {
        self.metrics_fn.as_ref().map(|_| self as _)
    }

    fn as_line_items_provider(&self) -> Option<&dyn LineItemsProvider> {
        self.line_items_fn.as_ref().map(|_| self as _)
    }

    fn as_insider_trades_provider(&self) -> Option<&dyn InsiderTradesProvider> {
        self.insider_trades_fn.as_ref().map(|_| self as _)
    }

    fn as_company_news_provider(&self) -> Option<&dyn CompanyNewsProvider> {
        self.news_fn.as_ref().map(|_| self as _)
    }

    fn as_market_cap_provider(&self) -> Option<&dyn MarketCapProvider> {
        self.market_cap_fn.as_ref().map(|_| self as _)
    }
}

#[async_trait]
impl PriceHistoryProvider for MockConnector {
    async fn prices(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, FonteError> {
        self.enter().await;
        match &self.prices_fn {
            Some(f) => f(ticker, start, end),
            None => Err(FonteError::unsupported("prices")),
        }
    }
}

#[async_trait]
impl FinancialMetricsProvider for MockConnector {
    async fn financial_metrics(
        &self,
        ticker: &Ticker,
        end: NaiveDate,
        period: PeriodKind,
        limit: usize,
    ) -> Result<Vec<FinancialMetricsSnapshot>, FonteError> {
        self.enter().await;
        match &self.metrics_fn {
            Some(f) => f(ticker, end, period, limit),
            None => Err(FonteError::unsupported("financial-metrics")),
        }
    }
}

#[async_trait]
impl LineItemsProvider for MockConnector {
    async fn line_items(
        &self,
        ticker: &Ticker,
        items: &[String],
        end: NaiveDate,
        period: PeriodKind,
        limit: usize,
    ) -> Result<Vec<LineItemRecord>, FonteError> {
        self.enter().await;
        match &self.line_items_fn {
            Some(f) => f(ticker, items, end, period, limit),
            None => Err(FonteError::unsupported("line-items")),
        }
    }
}

#[async_trait]
impl InsiderTradesProvider for MockConnector {
    async fn insider_trades(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<InsiderTradeRecord>, FonteError> {
        self.enter().await;
        match &self.insider_trades_fn {
            Some(f) => f(ticker, start, end, limit),
            None => Err(FonteError::unsupported("insider-trades")),
        }
    }
}

#[async_trait]
impl CompanyNewsProvider for MockConnector {
    async fn news(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<CompanyNewsRecord>, FonteError> {
        self.enter().await;
        match &self.news_fn {
            Some(f) => f(ticker, start, end, limit),
            None => Err(FonteError::unsupported("news")),
        }
    }
}

#[async_trait]
impl MarketCapProvider for MockConnector {
    async fn market_cap(
        &self,
        ticker: &Ticker,
        end: NaiveDate,
    ) -> Result<Option<f64>, FonteError> {
        self.enter().await;
        match &self.market_cap_fn {
            Some(f) => f(ticker, end),
            None => Err(FonteError::unsupported("market-cap")),
        }
    }
}
