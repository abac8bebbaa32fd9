#![warn(missing_docs)]
//! fonte-findata
//!
//! US-equity connector backed by a `financialdatasets.ai`-compatible REST
//! API. Implements price history, financial metrics, line-item search,
//! insider trades, and company news; the upstream has no dedicated
//! market-cap endpoint, so that capability is deliberately absent and the
//! router falls back to the latest metrics snapshot.

mod wire;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::json;
use url::Url;

use fonte_core::connector::{
    CompanyNewsProvider, FinancialMetricsProvider, FonteConnector, InsiderTradesProvider,
    LineItemsProvider, PriceHistoryProvider,
};
use fonte_core::{
    CompanyNewsRecord, FinancialMetricsSnapshot, FonteError, InsiderTradeRecord, LineItemRecord,
    MarketSegment, PeriodKind, PricePoint, Ticker, paginate_backward,
};

const NAME: &str = "findata";
const DEFAULT_BASE_URL: &str = "https://api.financialdatasets.ai/";

/// Connector for the primary US-equity REST provider.
pub struct FindataConnector {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

/// Builder for [`FindataConnector`].
#[derive(Default)]
pub struct FindataConnectorBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
}

impl FindataConnectorBuilder {
    /// Point the connector at a non-default base URL (e.g. a mock server).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// API key sent as the `X-API-KEY` header. Without one, requests go out
    /// unauthenticated and the upstream applies its anonymous quota.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the default base URL fails to parse, which
    /// only happens if the constant itself is broken.
    pub fn build(self) -> Result<FindataConnector, FonteError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| FonteError::InvalidArg(format!("bad base url: {e}")))?,
        };
        Ok(FindataConnector {
            client: Client::new(),
            base_url,
            api_key: self.api_key,
        })
    }
}

impl FindataConnector {
    /// Start building a connector.
    #[must_use]
    pub fn builder() -> FindataConnectorBuilder {
        FindataConnectorBuilder::default()
    }

    fn endpoint(&self, path: &str) -> Result<Url, FonteError> {
        self.base_url
            .join(path)
            .map_err(|e| FonteError::InvalidArg(format!("bad endpoint {path}: {e}")))
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.header("X-API-KEY", key),
            None => req,
        }
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, FonteError> {
        let resp = self
            .apply_auth(req)
            .send()
            .await
            .map_err(|e| FonteError::upstream(NAME, e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FonteError::Status {
                provider: NAME,
                code: status.as_u16(),
            });
        }
        resp.json::<T>()
            .await
            .map_err(|e| FonteError::decode(NAME, e.to_string()))
    }

    async fn insider_page(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        cursor: NaiveDate,
        limit: usize,
    ) -> Result<Vec<InsiderTradeRecord>, FonteError> {
        let mut url = self.endpoint("insider-trades/")?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("ticker", ticker.as_str());
            q.append_pair("filing_date_lte", &cursor.to_string());
            if let Some(start) = start {
                q.append_pair("filing_date_gte", &start.to_string());
            }
            q.append_pair("limit", &limit.to_string());
        }
        let envelope: wire::InsiderTradeEnvelope = self.send_json(self.client.get(url)).await?;
        envelope
            .insider_trades
            .into_iter()
            .map(|t| t.into_record(NAME))
            .collect()
    }

    async fn news_page(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        cursor: NaiveDate,
        limit: usize,
    ) -> Result<Vec<CompanyNewsRecord>, FonteError> {
        let mut url = self.endpoint("news/")?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("ticker", ticker.as_str());
            q.append_pair("end_date", &cursor.to_string());
            if let Some(start) = start {
                q.append_pair("start_date", &start.to_string());
            }
            q.append_pair("limit", &limit.to_string());
        }
        let envelope: wire::NewsEnvelope = self.send_json(self.client.get(url)).await?;
        envelope
            .news
            .into_iter()
            .map(|n| n.into_record(NAME))
            .collect()
    }
}

impl FonteConnector for FindataConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn supports_segment(&self, segment: MarketSegment) -> bool {
        segment == MarketSegment::UsEquity
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
}

#[async_trait]
impl PriceHistoryProvider for FindataConnector {
    async fn prices(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, FonteError> {
        let mut url = self.endpoint("prices/")?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("ticker", ticker.as_str());
            q.append_pair("interval", "day");
            q.append_pair("interval_multiplier", "1");
            q.append_pair("start_date", &start.to_string());
            q.append_pair("end_date", &end.to_string());
        }
        tracing::debug!(ticker = ticker.as_str(), %start, %end, "fetching prices");
        let envelope: wire::PriceEnvelope = self.send_json(self.client.get(url)).await?;
        let mut bars = envelope
            .prices
            .into_iter()
            .map(|p| p.into_record(NAME))
            .collect::<Result<Vec<_>, _>>()?;
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

#[async_trait]
impl FinancialMetricsProvider for FindataConnector {
    async fn financial_metrics(
        &self,
        ticker: &Ticker,
        end: NaiveDate,
        period: PeriodKind,
        limit: usize,
    ) -> Result<Vec<FinancialMetricsSnapshot>, FonteError> {
        let mut url = self.endpoint("financial-metrics/")?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("ticker", ticker.as_str());
            q.append_pair("report_period_lte", &end.to_string());
            q.append_pair("limit", &limit.to_string());
            q.append_pair("period", period.as_str());
        }
        let envelope: wire::MetricsEnvelope = self.send_json(self.client.get(url)).await?;
        envelope
            .financial_metrics
            .into_iter()
            .map(|v| wire::metrics_from_value(NAME, v))
            .collect()
    }
}

#[async_trait]
impl LineItemsProvider for FindataConnector {
    async fn line_items(
        &self,
        ticker: &Ticker,
        items: &[String],
        end: NaiveDate,
        period: PeriodKind,
        limit: usize,
    ) -> Result<Vec<LineItemRecord>, FonteError> {
        let url = self.endpoint("financials/search/line-items")?;
        let body = json!({
            "tickers": [ticker.as_str()],
            "line_items": items,
            "end_date": end.to_string(),
            "period": period.as_str(),
            "limit": limit,
        });
        let envelope: wire::LineItemEnvelope =
            self.send_json(self.client.post(url).json(&body)).await?;
        let mut records = envelope
            .search_results
            .into_iter()
            .map(|r| r.into_record(NAME, items))
            .collect::<Result<Vec<_>, _>>()?;
        records.truncate(limit);
        Ok(records)
    }
}

#[async_trait]
impl InsiderTradesProvider for FindataConnector {
    async fn insider_trades(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<InsiderTradeRecord>, FonteError> {
        paginate_backward(
            NAME,
            end,
            start,
            limit,
            |t: &InsiderTradeRecord| t.filing_date,
            |cursor| self.insider_page(ticker, start, cursor, limit),
        )
        .await
    }
}

#[async_trait]
impl CompanyNewsProvider for FindataConnector {
    async fn news(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<CompanyNewsRecord>, FonteError> {
        paginate_backward(
            NAME,
            end,
            start,
            limit,
            |n: &CompanyNewsRecord| n.date,
            |cursor| self.news_page(ticker, start, cursor, limit),
        )
        .await
    }
}
