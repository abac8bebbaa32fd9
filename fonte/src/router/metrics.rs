use chrono::NaiveDate;

use fonte_core::{FinancialMetricsSnapshot, FonteError, PeriodKind, RecordKind, Ticker};

use crate::Fonte;

impl Fonte {
    /// Up to `limit` ratio snapshots with `report_period <= end`, most
    /// recent first.
    ///
    /// # Errors
    /// `UnsupportedTicker` / `Unsupported` for routing gaps, or whatever the
    /// connector call surfaced after the retry budget.
    pub async fn financial_metrics(
        &self,
        ticker: &Ticker,
        end: NaiveDate,
        period: PeriodKind,
        limit: usize,
    ) -> Result<Vec<FinancialMetricsSnapshot>, FonteError> {
        let connector = self.route(ticker)?;
        let provider = connector
            .as_financial_metrics_provider()
            .ok_or_else(|| FonteError::unsupported(RecordKind::FinancialMetrics.as_str()))?;

        let cached = self.cache.metrics().up_to(ticker.as_str(), end, limit).await;
        if !cached.is_empty() {
            return Ok(cached);
        }

        let fetched = self
            .call_with_retry(connector.name(), RecordKind::FinancialMetrics.as_str(), || {
                provider.financial_metrics(ticker, end, period, limit)
            })
            .await?;
        self.cache
            .metrics()
            .append(ticker.as_str(), fetched, self.cache.cap())
            .await;

        Ok(self.cache.metrics().up_to(ticker.as_str(), end, limit).await)
    }
}
