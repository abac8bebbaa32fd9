//! Transport seam between the connector and the statement-data gateway.
//!
//! [`StatementSource`] is the boundary the connector normalizes behind: the
//! production implementation talks HTTP to an akshare-compatible gateway,
//! tests substitute canned tables. Row labels stay in the upstream's native
//! Chinese vocabulary; translation happens in the normalizer, not here.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use fonte_core::{FonteError, PricePoint};

const NAME: &str = "ashare";

/// Which statement table to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// 利润表.
    Income,
    /// 资产负债表.
    Balance,
    /// 现金流量表.
    CashFlow,
}

impl StatementKind {
    /// Identifier used in gateway query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Balance => "balance",
            Self::CashFlow => "cashflow",
        }
    }
}

/// A wide statement table: native row labels crossed with report periods.
#[derive(Debug, Clone, Default)]
pub struct StatementTable {
    periods: BTreeSet<NaiveDate>,
    rows: HashMap<String, BTreeMap<NaiveDate, f64>>,
}

impl StatementTable {
    /// Record one cell.
    pub fn insert(&mut self, label: impl Into<String>, period: NaiveDate, value: f64) {
        self.periods.insert(period);
        self.rows.entry(label.into()).or_default().insert(period, value);
    }

    /// The value at (label, period), if the upstream reported one.
    #[must_use]
    pub fn value(&self, label: &str, period: NaiveDate) -> Option<f64> {
        self.rows.get(label)?.get(&period).copied()
    }

    /// All report periods seen in the table, most recent first.
    #[must_use]
    pub fn report_periods_desc(&self) -> Vec<NaiveDate> {
        self.periods.iter().rev().copied().collect()
    }

    /// Whether the table has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Spot valuation indicators (most recent trading day only).
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationIndicators {
    /// 总市值.
    pub market_cap: Option<f64>,
    /// 市盈率-动态.
    pub pe_ratio: Option<f64>,
    /// 市净率.
    pub pb_ratio: Option<f64>,
}

/// One executive shareholding change disclosure.
#[derive(Debug, Clone)]
pub struct ExecutiveHolding {
    /// 高管姓名.
    pub name: String,
    /// 职务.
    pub title: String,
    /// 变动截止日.
    pub change_date: NaiveDate,
    /// 变动数量; negative for reductions.
    pub shares_changed: Option<f64>,
    /// 变动后持股数.
    pub shares_after: Option<f64>,
}

/// One exchange announcement.
#[derive(Debug, Clone)]
pub struct Announcement {
    /// 标题.
    pub title: String,
    /// 日期.
    pub date: NaiveDate,
    /// Link to the filing, empty when the gateway has none.
    pub url: String,
}

/// Upstream data access for one A-share exchange code.
#[async_trait]
pub trait StatementSource: Send + Sync {
    /// Fetch one wide statement table.
    async fn statement(
        &self,
        code: &str,
        kind: StatementKind,
    ) -> Result<StatementTable, FonteError>;

    /// Fetch spot valuation indicators.
    async fn valuation(&self, code: &str) -> Result<ValuationIndicators, FonteError>;

    /// Fetch front-adjusted daily bars within the inclusive window.
    async fn daily_bars(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, FonteError>;

    /// Fetch executive shareholding change disclosures, newest first.
    async fn executive_holdings(&self, code: &str) -> Result<Vec<ExecutiveHolding>, FonteError>;

    /// Fetch exchange announcements, newest first.
    async fn announcements(&self, code: &str) -> Result<Vec<Announcement>, FonteError>;

    /// Fetch total share count (总股本) from the share structure table.
    async fn total_shares(&self, code: &str) -> Result<Option<f64>, FonteError>;
}

fn parse_date(raw: &str) -> Result<NaiveDate, FonteError> {
    raw.split('T')
        .next()
        .unwrap_or(raw)
        .parse::<NaiveDate>()
        .map_err(|e| FonteError::decode(NAME, format!("bad date {raw:?}: {e}")))
}

#[derive(Debug, Deserialize)]
struct WireStatement {
    rows: Vec<WireStatementRow>,
}

#[derive(Debug, Deserialize)]
struct WireStatementRow {
    label: String,
    values: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct WireValuation {
    #[serde(default)]
    indicators: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct WireDailyBar {
    #[serde(rename = "日期")]
    date: String,
    #[serde(rename = "开盘")]
    open: f64,
    #[serde(rename = "收盘")]
    close: f64,
    #[serde(rename = "最高")]
    high: f64,
    #[serde(rename = "最低")]
    low: f64,
    #[serde(rename = "成交量")]
    volume: f64,
}

#[derive(Debug, Deserialize)]
struct WireExecutiveHolding {
    #[serde(rename = "高管姓名")]
    name: String,
    #[serde(rename = "职务")]
    title: String,
    #[serde(rename = "变动截止日")]
    change_date: String,
    #[serde(rename = "变动数量", default)]
    shares_changed: Option<f64>,
    #[serde(rename = "变动后持股数", default)]
    shares_after: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireAnnouncement {
    #[serde(rename = "标题")]
    title: String,
    #[serde(rename = "日期")]
    date: String,
    #[serde(rename = "URL", default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireShareStructure {
    #[serde(rename = "总股本", default)]
    total_shares: Option<f64>,
}

/// HTTP implementation of [`StatementSource`] against an akshare-compatible
/// gateway.
pub struct AkGatewaySource {
    client: Client,
    base_url: Url,
}

impl AkGatewaySource {
    /// Build a source against the given gateway base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FonteError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| FonteError::InvalidArg(format!("bad endpoint {path}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        let resp = self
            .client
            .get(url)
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
}

#[async_trait]
impl StatementSource for AkGatewaySource {
    async fn statement(
        &self,
        code: &str,
        kind: StatementKind,
    ) -> Result<StatementTable, FonteError> {
        let wire: WireStatement = self
            .get_json("statement", &[("code", code), ("kind", kind.as_str())])
            .await?;
        let mut table = StatementTable::default();
        for row in wire.rows {
            for (raw_period, value) in row.values {
                let Some(value) = value else { continue };
                table.insert(row.label.clone(), parse_date(&raw_period)?, value);
            }
        }
        Ok(table)
    }

    async fn valuation(&self, code: &str) -> Result<ValuationIndicators, FonteError> {
        let wire: WireValuation = self.get_json("valuation", &[("code", code)]).await?;
        Ok(ValuationIndicators {
            market_cap: wire.indicators.get("总市值").copied(),
            pe_ratio: wire.indicators.get("市盈率-动态").copied(),
            pb_ratio: wire.indicators.get("市净率").copied(),
        })
    }

    async fn daily_bars(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, FonteError> {
        // The gateway keeps akshare's compact date format and front
        // adjustment.
        let start_compact = start.format("%Y%m%d").to_string();
        let end_compact = end.format("%Y%m%d").to_string();
        let wire: Vec<WireDailyBar> = self
            .get_json(
                "daily",
                &[
                    ("code", code),
                    ("start_date", &start_compact),
                    ("end_date", &end_compact),
                    ("adjust", "qfq"),
                ],
            )
            .await?;
        wire.into_iter()
            .map(|bar| {
                Ok(PricePoint {
                    date: parse_date(&bar.date)?,
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    volume: bar.volume.max(0.0) as u64,
                })
            })
            .collect()
    }

    async fn executive_holdings(&self, code: &str) -> Result<Vec<ExecutiveHolding>, FonteError> {
        let wire: Vec<WireExecutiveHolding> = self
            .get_json("executive-holdings", &[("code", code)])
            .await?;
        wire.into_iter()
            .map(|h| {
                Ok(ExecutiveHolding {
                    name: h.name,
                    title: h.title,
                    change_date: parse_date(&h.change_date)?,
                    shares_changed: h.shares_changed,
                    shares_after: h.shares_after,
                })
            })
            .collect()
    }

    async fn announcements(&self, code: &str) -> Result<Vec<Announcement>, FonteError> {
        let wire: Vec<WireAnnouncement> = self.get_json("announcements", &[("code", code)]).await?;
        wire.into_iter()
            .map(|a| {
                Ok(Announcement {
                    title: a.title,
                    date: parse_date(&a.date)?,
                    url: a.url.unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn total_shares(&self, code: &str) -> Result<Option<f64>, FonteError> {
        // Most recent row first; only the total matters here.
        let wire: Vec<WireShareStructure> =
            self.get_json("share-structure", &[("code", code)]).await?;
        Ok(wire.first().and_then(|s| s.total_shares))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_table_lookup_and_period_order() {
        let mut table = StatementTable::default();
        let p2023 = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let p2024 = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        table.insert("营业收入", p2023, 100.0);
        table.insert("营业收入", p2024, 120.0);
        table.insert("净利润", p2024, 30.0);

        assert_eq!(table.report_periods_desc(), vec![p2024, p2023]);
        assert_eq!(table.value("营业收入", p2024), Some(120.0));
        assert_eq!(table.value("净利润", p2023), None);
        assert_eq!(table.value("不存在", p2024), None);
    }
}
