//! Append-only, in-process record cache.
//!
//! Records accumulate per (ticker, kind) for the lifetime of the process and
//! never expire; reads filter the accumulated set by date. Appends dedupe on
//! each record type's natural key with first-write-wins semantics, so a
//! re-fetch can never mutate a record already cached.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tokio::sync::Mutex;

use fonte_types::{
    CacheConfig, CompanyNewsRecord, FinancialMetricsSnapshot, InsiderTradeRecord, LineItemRecord,
    PricePoint,
};

/// Identity and ordering contract a record type must satisfy to be cached.
pub trait CacheRecord: Clone + Send + Sync {
    /// Natural key deduplicated on within one (ticker, kind) series.
    fn natural_key(&self) -> String;

    /// Date the record is filtered and ordered by.
    fn record_date(&self) -> NaiveDate;
}

impl CacheRecord for PricePoint {
    fn natural_key(&self) -> String {
        self.date.to_string()
    }

    fn record_date(&self) -> NaiveDate {
        self.date
    }
}

impl CacheRecord for FinancialMetricsSnapshot {
    fn natural_key(&self) -> String {
        self.report_period.to_string()
    }

    fn record_date(&self) -> NaiveDate {
        self.report_period
    }
}

impl CacheRecord for LineItemRecord {
    fn natural_key(&self) -> String {
        self.report_period.to_string()
    }

    fn record_date(&self) -> NaiveDate {
        self.report_period
    }
}

impl CacheRecord for InsiderTradeRecord {
    fn natural_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.filing_date,
            self.name.as_deref().unwrap_or(""),
            self.transaction_shares.map_or(String::new(), |s| s.to_string()),
        )
    }

    // Filings are windowed by execution date when disclosed, filing date
    // otherwise.
    fn record_date(&self) -> NaiveDate {
        self.transaction_date.unwrap_or(self.filing_date)
    }
}

impl CacheRecord for CompanyNewsRecord {
    fn natural_key(&self) -> String {
        format!("{}|{}", self.date, self.title)
    }

    fn record_date(&self) -> NaiveDate {
        self.date
    }
}

/// One ticker-keyed series store for a single record type.
pub struct Shard<T> {
    inner: Mutex<HashMap<String, Vec<T>>>,
}

impl<T> Default for Shard<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: CacheRecord> Shard<T> {
    /// Merge `records` into the ticker's series, skipping any record whose
    /// natural key is already present. On overflow past `cap`, the oldest
    /// dates are dropped first.
    pub async fn append(&self, ticker: &str, records: Vec<T>, cap: Option<usize>) {
        if records.is_empty() {
            return;
        }
        let mut inner = self.inner.lock().await;
        let series = inner.entry(ticker.to_string()).or_default();
        let mut seen: HashSet<String> = series.iter().map(CacheRecord::natural_key).collect();
        for record in records {
            if seen.insert(record.natural_key()) {
                series.push(record);
            }
        }
        if let Some(cap) = cap
            && series.len() > cap
        {
            series.sort_by_key(CacheRecord::record_date);
            series.drain(..series.len() - cap);
        }
    }

    /// Records dated within the inclusive window, ascending by date. An
    /// unbounded `start` means "from the beginning of the series".
    pub async fn window(
        &self,
        ticker: &str,
        start: Option<NaiveDate>,
        end: NaiveDate,
    ) -> Vec<T> {
        let inner = self.inner.lock().await;
        let mut out: Vec<T> = inner
            .get(ticker)
            .map(|series| {
                series
                    .iter()
                    .filter(|r| {
                        let date = r.record_date();
                        start.is_none_or(|s| date >= s) && date <= end
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        out.sort_by_key(CacheRecord::record_date);
        out
    }

    /// Up to `limit` records dated on or before `end`, most recent first.
    pub async fn up_to(&self, ticker: &str, end: NaiveDate, limit: usize) -> Vec<T> {
        let inner = self.inner.lock().await;
        let mut out: Vec<T> = inner
            .get(ticker)
            .map(|series| {
                series
                    .iter()
                    .filter(|r| r.record_date() <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        out.sort_by_key(|r: &T| std::cmp::Reverse(r.record_date()));
        out.truncate(limit);
        out
    }
}

/// Typed cache with one shard per record kind.
///
/// All shards share a single capacity policy; each shard locks
/// independently, so a prices append never contends with a news read.
#[derive(Default)]
pub struct DataCache {
    cfg: CacheConfig,
    prices: Shard<PricePoint>,
    metrics: Shard<FinancialMetricsSnapshot>,
    line_items: Shard<LineItemRecord>,
    insider_trades: Shard<InsiderTradeRecord>,
    news: Shard<CompanyNewsRecord>,
}

impl DataCache {
    /// Build a cache with the given capacity policy.
    #[must_use]
    pub fn new(cfg: CacheConfig) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    /// Per-series record cap in effect.
    #[must_use]
    pub const fn cap(&self) -> Option<usize> {
        self.cfg.max_records_per_key
    }

    /// The price history shard.
    #[must_use]
    pub const fn prices(&self) -> &Shard<PricePoint> {
        &self.prices
    }

    /// The financial metrics shard.
    #[must_use]
    pub const fn metrics(&self) -> &Shard<FinancialMetricsSnapshot> {
        &self.metrics
    }

    /// The line items shard. Written on every fetch but never consulted for
    /// reads, since the natural key cannot distinguish different requested
    /// item sets.
    #[must_use]
    pub const fn line_items(&self) -> &Shard<LineItemRecord> {
        &self.line_items
    }

    /// The insider trades shard.
    #[must_use]
    pub const fn insider_trades(&self) -> &Shard<InsiderTradeRecord> {
        &self.insider_trades
    }

    /// The company news shard.
    #[must_use]
    pub const fn news(&self) -> &Shard<CompanyNewsRecord> {
        &self.news
    }
}
