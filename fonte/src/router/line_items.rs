use chrono::NaiveDate;

use fonte_core::{FonteError, LineItemRecord, PeriodKind, RecordKind, Ticker};

use crate::Fonte;

impl Fonte {
    /// Up to `limit` statement records shaped around the requested item
    /// names, most recent first.
    ///
    /// Results always come from the upstream: the cache's natural key
    /// (report period) cannot tell two different requested item sets apart,
    /// so serving reads from it could answer with the wrong field set.
    /// Fetched records are still appended for inspection and capacity
    /// accounting.
    ///
    /// # Errors
    /// `InvalidArg` when `items` is empty, `UnsupportedTicker` /
    /// `Unsupported` for routing gaps, or whatever the connector call
    /// surfaced after the retry budget.
    pub async fn line_items(
        &self,
        ticker: &Ticker,
        items: &[String],
        end: NaiveDate,
        period: PeriodKind,
        limit: usize,
    ) -> Result<Vec<LineItemRecord>, FonteError> {
        if items.is_empty() {
            return Err(FonteError::InvalidArg(
                "at least one line item must be requested".to_string(),
            ));
        }
        let connector = self.route(ticker)?;
        let provider = connector
            .as_line_items_provider()
            .ok_or_else(|| FonteError::unsupported(RecordKind::LineItems.as_str()))?;

        let fetched = self
            .call_with_retry(connector.name(), RecordKind::LineItems.as_str(), || {
                provider.line_items(ticker, items, end, period, limit)
            })
            .await?;
        self.cache
            .line_items()
            .append(ticker.as_str(), fetched.clone(), self.cache.cap())
            .await;

        Ok(fetched)
    }
}
