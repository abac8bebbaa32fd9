use chrono::NaiveDate;

use fonte_core::{CompanyNewsRecord, FonteError, RecordKind, Ticker};

use super::validate_window;
use crate::Fonte;

impl Fonte {
    /// Company news dated in `[start, end]`, ascending by date.
    ///
    /// `limit` is the page size handed to paged upstreams, not a cap on the
    /// combined result.
    ///
    /// # Errors
    /// `InvalidArg` for a reversed window, `UnsupportedTicker` /
    /// `Unsupported` for routing gaps, or whatever the connector call
    /// surfaced after the retry budget.
    pub async fn news(
        &self,
        ticker: &Ticker,
        start: Option<NaiveDate>,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<CompanyNewsRecord>, FonteError> {
        validate_window(start, end)?;
        let connector = self.route(ticker)?;
        let provider = connector
            .as_company_news_provider()
            .ok_or_else(|| FonteError::unsupported(RecordKind::News.as_str()))?;

        let cached = self.cache.news().window(ticker.as_str(), start, end).await;
        if !cached.is_empty() {
            return Ok(cached);
        }

        let fetched = self
            .call_with_retry(connector.name(), RecordKind::News.as_str(), || {
                provider.news(ticker, start, end, limit)
            })
            .await?;
        self.cache
            .news()
            .append(ticker.as_str(), fetched, self.cache.cap())
            .await;

        Ok(self.cache.news().window(ticker.as_str(), start, end).await)
    }
}
