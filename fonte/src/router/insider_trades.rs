use chrono::NaiveDate;

use fonte_core::{FonteError, InsiderTradeRecord, RecordKind, Ticker};

use super::validate_window;
use crate::Fonte;

impl Fonte {
    /// Insider transaction filings dated in `[start, end]`, ascending by
    /// transaction date (filing date when no transaction date is disclosed).
    ///
    /// `limit` is the page size handed to paged upstreams, not a cap on the
    /// combined result.
    ///
    /// # Errors
    /// `InvalidArg` for a reversed window, `UnsupportedTicker` /
    /// `Unsupported` for routing gaps, or whatever the connector call
    /// surfaced after the retry budget.
    pub async fn insider_trades(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<InsiderTradeRecord>, FonteError> {
        validate_window(start, end)?;
        let connector = self.route(ticker)?;
        let provider = connector
            .as_insider_trades_provider()
            .ok_or_else(|| FonteError::unsupported(RecordKind::InsiderTrades.as_str()))?;

        let cached = self
            .cache
            .insider_trades()
            .window(ticker.as_str(), start, end)
            .await;
        if !cached.is_empty() {
            return Ok(cached);
        }

        let fetched = self
            .call_with_retry(connector.name(), RecordKind::InsiderTrades.as_str(), || {
                provider.insider_trades(ticker, start, end, limit)
            })
            .await?;
        self.cache
            .insider_trades()
            .append(ticker.as_str(), fetched, self.cache.cap())
            .await;

        Ok(self
            .cache
            .insider_trades()
            .window(ticker.as_str(), start, end)
            .await)
    }
}
