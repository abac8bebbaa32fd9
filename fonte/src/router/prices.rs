use chrono::NaiveDate;

use fonte_core::{FonteError, PricePoint, RecordKind, Ticker};

use super::validate_window;
use crate::Fonte;

impl Fonte {
    /// Daily price history for the inclusive `[start, end]` window,
    /// ascending by date.
    ///
    /// A non-empty cached window is served without touching the upstream;
    /// otherwise the fetched series is appended to the cache and the
    /// requested window is answered from the merged series.
    ///
    /// # Errors
    /// `InvalidArg` for a reversed window, `UnsupportedTicker` /
    /// `Unsupported` for routing gaps, or whatever the connector call
    /// surfaced after the retry budget.
    pub async fn prices(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, FonteError> {
        validate_window(Some(start), end)?;
        let connector = self.route(ticker)?;
        let provider = connector
            .as_price_history_provider()
            .ok_or_else(|| FonteError::unsupported(RecordKind::Prices.as_str()))?;

        let cached = self
            .cache
            .prices()
            .window(ticker.as_str(), Some(start), end)
            .await;
        if !cached.is_empty() {
            tracing::debug!(ticker = ticker.as_str(), bars = cached.len(), "cache hit");
            return Ok(cached);
        }

        let fetched = self
            .call_with_retry(connector.name(), RecordKind::Prices.as_str(), || {
                provider.prices(ticker, start, end)
            })
            .await?;
        self.cache
            .prices()
            .append(ticker.as_str(), fetched, self.cache.cap())
            .await;

        Ok(self
            .cache
            .prices()
            .window(ticker.as_str(), Some(start), end)
            .await)
    }
}
