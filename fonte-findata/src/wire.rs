//! Native JSON envelopes of the upstream REST API and their translation
//! into canonical records.
//!
//! The upstream degrades gracefully: a field it cannot supply arrives as
//! `null` or is absent, and both land as `None`. Only a response whose
//! envelope shape is wrong is rejected, as [`FonteError::Decode`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use fonte_core::{
    CompanyNewsRecord, FinancialMetricsSnapshot, FonteError, InsiderTradeRecord, LineItemRecord,
    PeriodKind, PricePoint, Sentiment,
};

/// Parse an upstream date, tolerating a trailing `T…` timestamp part.
pub(crate) fn parse_date(provider: &'static str, raw: &str) -> Result<NaiveDate, FonteError> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    date_part
        .parse::<NaiveDate>()
        .map_err(|e| FonteError::decode(provider, format!("bad date {raw:?}: {e}")))
}

fn parse_period(raw: Option<&str>) -> PeriodKind {
    match raw {
        Some("annual") => PeriodKind::Annual,
        Some("quarterly") => PeriodKind::Quarterly,
        _ => PeriodKind::Ttm,
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PriceEnvelope {
    pub prices: Vec<WirePrice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WirePrice {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

impl WirePrice {
    pub(crate) fn into_record(self, provider: &'static str) -> Result<PricePoint, FonteError> {
        Ok(PricePoint {
            date: parse_date(provider, &self.time)?,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume.map_or(0, |v| v.max(0.0) as u64),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetricsEnvelope {
    pub financial_metrics: Vec<Value>,
}

/// Decode one metrics object. Identity fields are required; every metric is
/// nullable and unknown upstream extras are ignored.
pub(crate) fn metrics_from_value(
    provider: &'static str,
    mut value: Value,
) -> Result<FinancialMetricsSnapshot, FonteError> {
    if let Some(obj) = value.as_object_mut()
        && let Some(Value::String(raw)) = obj.get_mut("report_period")
    {
        // Normalize timestamps to plain dates before the typed decode.
        if let Some(t) = raw.find('T') {
            raw.truncate(t);
        }
    }
    serde_json::from_value(value).map_err(|e| FonteError::decode(provider, e.to_string()))
}

#[derive(Debug, Deserialize)]
pub(crate) struct LineItemEnvelope {
    pub search_results: Vec<WireLineItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireLineItem {
    ticker: String,
    report_period: String,
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl WireLineItem {
    /// Shape the result around the caller's request: exactly the requested
    /// names, each `None` unless the upstream returned a number for it.
    pub(crate) fn into_record(
        self,
        provider: &'static str,
        requested: &[String],
    ) -> Result<LineItemRecord, FonteError> {
        let mut record = LineItemRecord::new(
            self.ticker,
            parse_date(provider, &self.report_period)?,
            parse_period(self.period.as_deref()),
            self.currency.unwrap_or_else(|| "USD".to_string()),
        );
        for name in requested {
            let value = self.fields.get(name).and_then(Value::as_f64);
            record.items.insert(name.clone(), value);
        }
        Ok(record)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct InsiderTradeEnvelope {
    pub insider_trades: Vec<WireInsiderTrade>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireInsiderTrade {
    ticker: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    is_board_director: Option<bool>,
    #[serde(default)]
    transaction_date: Option<String>,
    filing_date: String,
    #[serde(default)]
    transaction_shares: Option<f64>,
    #[serde(default)]
    transaction_price_per_share: Option<f64>,
    #[serde(default)]
    transaction_value: Option<f64>,
    #[serde(default)]
    shares_owned_before_transaction: Option<f64>,
    #[serde(default)]
    shares_owned_after_transaction: Option<f64>,
    #[serde(default)]
    security_title: Option<String>,
}

impl WireInsiderTrade {
    pub(crate) fn into_record(
        self,
        provider: &'static str,
    ) -> Result<InsiderTradeRecord, FonteError> {
        let transaction_date = self
            .transaction_date
            .as_deref()
            .map(|raw| parse_date(provider, raw))
            .transpose()?;
        Ok(InsiderTradeRecord {
            ticker: self.ticker,
            name: self.name,
            title: self.title,
            is_board_director: self.is_board_director,
            transaction_date,
            filing_date: parse_date(provider, &self.filing_date)?,
            transaction_shares: self.transaction_shares,
            transaction_price_per_share: self.transaction_price_per_share,
            transaction_value: self.transaction_value,
            shares_owned_before_transaction: self.shares_owned_before_transaction,
            shares_owned_after_transaction: self.shares_owned_after_transaction,
            security_title: self.security_title,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsEnvelope {
    pub news: Vec<WireNews>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireNews {
    ticker: String,
    title: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    source: Option<String>,
    date: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    sentiment: Option<String>,
}

impl WireNews {
    pub(crate) fn into_record(
        self,
        provider: &'static str,
    ) -> Result<CompanyNewsRecord, FonteError> {
        let sentiment = match self.sentiment.as_deref() {
            Some("positive") => Sentiment::Positive,
            Some("negative") => Sentiment::Negative,
            _ => Sentiment::Neutral,
        };
        Ok(CompanyNewsRecord {
            ticker: self.ticker,
            title: self.title,
            author: self.author.unwrap_or_default(),
            source: self.source.unwrap_or_default(),
            date: parse_date(provider, &self.date)?,
            url: self.url.unwrap_or_default(),
            sentiment,
        })
    }
}
