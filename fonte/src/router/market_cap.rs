use chrono::NaiveDate;

use fonte_core::{FonteError, PeriodKind, RecordKind, Ticker};

use crate::Fonte;

impl Fonte {
    /// Market capitalization in effect on `end`.
    ///
    /// When the routed connector has no dedicated market-cap capability but
    /// does expose financial metrics, the figure falls back to the most
    /// recent snapshot's `market_cap` field, sharing the metrics cache.
    ///
    /// # Errors
    /// `UnsupportedTicker` / `Unsupported` for routing gaps, or whatever the
    /// underlying call surfaced after the retry budget.
    pub async fn market_cap(
        &self,
        ticker: &Ticker,
        end: NaiveDate,
    ) -> Result<Option<f64>, FonteError> {
        let connector = self.route(ticker)?;
        if let Some(provider) = connector.as_market_cap_provider() {
            return self
                .call_with_retry(connector.name(), RecordKind::MarketCap.as_str(), || {
                    provider.market_cap(ticker, end)
                })
                .await;
        }

        if connector.as_financial_metrics_provider().is_some() {
            let snaps = self
                .financial_metrics(ticker, end, PeriodKind::Ttm, 1)
                .await?;
            return Ok(snaps.first().and_then(|s| s.market_cap));
        }

        Err(FonteError::unsupported(RecordKind::MarketCap.as_str()))
    }
}
