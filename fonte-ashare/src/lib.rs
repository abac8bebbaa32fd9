#![warn(missing_docs)]
//! fonte-ashare
//!
//! Connector for mainland-China A-shares. The upstream publishes wide
//! financial-statement tables with native Chinese row labels rather than
//! per-field endpoints, so this connector is mostly a normalizer: it looks
//! up statement rows per report period, applies the standard derivations,
//! and reshapes executive-holding disclosures and exchange announcements
//! into insider trades and news.

mod normalize;
pub mod source;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use url::Url;

use fonte_core::connector::{
    CompanyNewsProvider, FinancialMetricsProvider, FonteConnector, InsiderTradesProvider,
    LineItemsProvider, MarketCapProvider, PriceHistoryProvider,
};
use fonte_core::{
    CompanyNewsRecord, FinancialMetricsSnapshot, FonteError, InsiderTradeRecord, LineItemRecord,
    MarketSegment, PeriodKind, PricePoint, Ticker,
};

use source::{AkGatewaySource, StatementKind, StatementSource};

const NAME: &str = "ashare";

/// Connector serving A-share instruments through a [`StatementSource`].
pub struct AshareConnector {
    source: Arc<dyn StatementSource>,
}

impl AshareConnector {
    /// Build a connector over any statement source.
    #[must_use]
    pub fn new(source: Arc<dyn StatementSource>) -> Self {
        Self { source }
    }

    /// Convenience constructor for the HTTP gateway source.
    #[must_use]
    pub fn gateway(base_url: Url) -> Self {
        Self::new(Arc::new(AkGatewaySource::new(base_url)))
    }

    fn code<'t>(&self, ticker: &'t Ticker) -> Result<&'t str, FonteError> {
        ticker
            .ashare_code()
            .ok_or_else(|| FonteError::unsupported_ticker(ticker.as_str()))
    }
}

impl FonteConnector for AshareConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn supports_segment(&self, segment: MarketSegment) -> bool {
        segment == MarketSegment::AShare
    }

    fn as_price_history_provider(&self) -> Option<&dyn PriceHistoryProvider> {
        Some(self)
    }

    fn as_financial_metrics_provider(&self) -> Option<&dyn FinancialMetricsProvider> {
        Some(self)
    }

    fn as_line_items_provider(&self) -> Option<&dyn LineItemsProvider> {
        Some(self)
    }

    fn as_insider_trades_provider(&self) -> Option<&dyn InsiderTradesProvider> {
        Some(self)
    }

    fn as_company_news_provider(&self) -> Option<&dyn CompanyNewsProvider> {
        Some(self)
    }

    fn as_market_cap_provider(&self) -> Option<&dyn MarketCapProvider> {
        Some(self)
    }
}

#[async_trait]
impl PriceHistoryProvider for AshareConnector {
    async fn prices(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, FonteError> {
        let code = self.code(ticker)?;
        tracing::debug!(ticker = ticker.as_str(), code, %start, %end, "fetching daily bars");
        let mut bars = self.source.daily_bars(code, start, end).await?;
        bars.retain(|b| b.date >= start && b.date <= end);
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

#[async_trait]
impl FinancialMetricsProvider for AshareConnector {
    async fn financial_metrics(
        &self,
        ticker: &Ticker,
        end: NaiveDate,
        period: PeriodKind,
        limit: usize,
    ) -> Result<Vec<FinancialMetricsSnapshot>, FonteError> {
        let code = self.code(ticker)?;
        let income = self.source.statement(code, StatementKind::Income).await?;
        let balance = self.source.statement(code, StatementKind::Balance).await?;
        let valuation = self.source.valuation(code).await?;

        let snaps = income
            .report_periods_desc()
            .into_iter()
            .filter(|p| *p <= end)
            .take(limit)
            .map(|report_period| {
                normalize::metrics_for_period(
                    ticker.as_str(),
                    report_period,
                    period,
                    &income,
                    &balance,
                    valuation,
                )
            })
            .collect();
        Ok(snaps)
    }
}

#[async_trait]
impl LineItemsProvider for AshareConnector {
    async fn line_items(
        &self,
        ticker: &Ticker,
        items: &[String],
        end: NaiveDate,
        period: PeriodKind,
        limit: usize,
    ) -> Result<Vec<LineItemRecord>, FonteError> {
        let code = self.code(ticker)?;
        let income = self.source.statement(code, StatementKind::Income).await?;
        let balance = self.source.statement(code, StatementKind::Balance).await?;
        let cashflow = self.source.statement(code, StatementKind::CashFlow).await?;
        // Share structure is a separate, slower table; only touch it when
        // asked for.
        let total_shares = if items.iter().any(|i| i == "outstanding_shares") {
            self.source.total_shares(code).await?
        } else {
            None
        };

        let records = income
            .report_periods_desc()
            .into_iter()
            .filter(|p| *p <= end)
            .take(limit)
            .map(|report_period| {
                normalize::line_items_for_period(
                    ticker.as_str(),
                    report_period,
                    period,
                    items,
                    &income,
                    &balance,
                    &cashflow,
                    total_shares,
                )
            })
            .collect();
        Ok(records)
    }
}

#[async_trait]
impl InsiderTradesProvider for AshareConnector {
    async fn insider_trades(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<InsiderTradeRecord>, FonteError> {
        let code = self.code(ticker)?;
        let holdings = self.source.executive_holdings(code).await?;

        let trades = holdings
            .into_iter()
            .filter(|h| start.is_none_or(|s| h.change_date >= s) && h.change_date <= end)
            .take(limit)
            .map(|h| InsiderTradeRecord {
                ticker: ticker.as_str().to_string(),
                is_board_director: Some(normalize::is_board_director(&h.title)),
                name: Some(h.name),
                title: Some(h.title),
                transaction_date: Some(h.change_date),
                filing_date: h.change_date,
                transaction_shares: h.shares_changed,
                transaction_price_per_share: None,
                transaction_value: None,
                shares_owned_before_transaction: None,
                shares_owned_after_transaction: h.shares_after,
                security_title: Some("A股".to_string()),
            })
            .collect();
        Ok(trades)
    }
}

#[async_trait]
impl CompanyNewsProvider for AshareConnector {
    async fn news(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<CompanyNewsRecord>, FonteError> {
        let code = self.code(ticker)?;
        let announcements = self.source.announcements(code).await?;
        let source_name = if ticker.is_shanghai() {
            "上海证券交易所"
        } else {
            "深圳证券交易所"
        };

        let news = announcements
            .into_iter()
            .filter(|a| start.is_none_or(|s| a.date >= s) && a.date <= end)
            .take(limit)
            .map(|a| CompanyNewsRecord {
                ticker: ticker.as_str().to_string(),
                sentiment: normalize::title_sentiment(&a.title),
                title: a.title,
                author: "公司公告".to_string(),
                source: source_name.to_string(),
                date: a.date,
                url: a.url,
            })
            .collect();
        Ok(news)
    }
}

#[async_trait]
impl MarketCapProvider for AshareConnector {
    async fn market_cap(
        &self,
        ticker: &Ticker,
        _end: NaiveDate,
    ) -> Result<Option<f64>, FonteError> {
        let code = self.code(ticker)?;
        // The valuation table is spot-only; the end date cannot select a
        // historical figure.
        let valuation = self.source.valuation(code).await?;
        Ok(valuation.market_cap)
    }
}
