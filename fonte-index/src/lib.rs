#![warn(missing_docs)]
//! fonte-index
//!
//! Price-history connector for the four major US indices, backed by an
//! index-quote gateway that returns the full daily series per symbol. Caret
//! tickers are translated through a fixed code table; anything outside the
//! table is an unsupported ticker.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use fonte_core::connector::{FonteConnector, PriceHistoryProvider};
use fonte_core::{FonteError, MarketSegment, PricePoint, Ticker};

const NAME: &str = "index";

/// Caret symbol → provider code for the indices the gateway serves.
const INDEX_CODES: &[(&str, &str)] = &[
    ("^GSPC", ".INX"),
    ("^IXIC", ".IXIC"),
    ("^DJI", ".DJI"),
    ("^NDX", ".NDX"),
];

fn index_code(symbol: &str) -> Option<&'static str> {
    INDEX_CODES
        .iter()
        .find(|(caret, _)| *caret == symbol)
        .map(|(_, code)| *code)
}

/// The gateway reports volume either as a number or as a comma-grouped
/// string ("82,488,700").
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireVolume {
    Number(f64),
    Text(String),
}

impl WireVolume {
    fn into_u64(self, provider: &'static str) -> Result<u64, FonteError> {
        match self {
            Self::Number(n) => Ok(n.max(0.0) as u64),
            Self::Text(s) => s
                .replace(',', "")
                .parse::<u64>()
                .map_err(|e| FonteError::decode(provider, format!("bad volume {s:?}: {e}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireIndexBar {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: WireVolume,
}

impl WireIndexBar {
    fn into_record(self, provider: &'static str) -> Result<PricePoint, FonteError> {
        let date = self
            .date
            .split('T')
            .next()
            .unwrap_or(&self.date)
            .parse::<NaiveDate>()
            .map_err(|e| FonteError::decode(provider, format!("bad date {:?}: {e}", self.date)))?;
        Ok(PricePoint {
            date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume.into_u64(provider)?,
        })
    }
}

/// Connector serving daily bars for the mapped US indices.
pub struct IndexConnector {
    client: Client,
    base_url: Url,
}

impl IndexConnector {
    /// Build a connector against the given gateway base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

impl FonteConnector for IndexConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn supports_segment(&self, segment: MarketSegment) -> bool {
        segment == MarketSegment::UsIndex
    }

    fn as_price_history_provider(&self) -> Option<&dyn PriceHistoryProvider> {
        Some(self)
    }
}

#[async_trait]
impl PriceHistoryProvider for IndexConnector {
    async fn prices(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, FonteError> {
        let Some(code) = index_code(ticker.as_str()) else {
            return Err(FonteError::unsupported_ticker(ticker.as_str()));
        };

        let mut url = self
            .base_url
            .join("daily")
            .map_err(|e| FonteError::InvalidArg(format!("bad endpoint: {e}")))?;
        url.query_pairs_mut().append_pair("symbol", code);

        tracing::debug!(ticker = ticker.as_str(), code, "fetching index series");
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
        let bars: Vec<WireIndexBar> = resp
            .json()
            .await
            .map_err(|e| FonteError::decode(NAME, e.to_string()))?;

        // The gateway returns the whole series; window it here.
        let mut out = bars
            .into_iter()
            .map(|b| b.into_record(NAME))
            .collect::<Result<Vec<_>, _>>()?;
        out.retain(|b| b.date >= start && b.date <= end);
        out.sort_by_key(|b| b.date);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn code_table_covers_the_four_majors() {
        assert_eq!(index_code("^GSPC"), Some(".INX"));
        assert_eq!(index_code("^IXIC"), Some(".IXIC"));
        assert_eq!(index_code("^DJI"), Some(".DJI"));
        assert_eq!(index_code("^NDX"), Some(".NDX"));
        assert_eq!(index_code("^RUT"), None);
    }

    #[test]
    fn volume_accepts_numbers_and_comma_strings() {
        let n: WireVolume = serde_json::from_value(json!(12345)).unwrap();
        assert_eq!(n.into_u64("index").unwrap(), 12345);

        let s: WireVolume = serde_json::from_value(json!("12,345")).unwrap();
        assert_eq!(s.into_u64("index").unwrap(), 12345);

        let bad: WireVolume = serde_json::from_value(json!("12x345")).unwrap();
        assert!(bad.into_u64("index").is_err());
    }
}
