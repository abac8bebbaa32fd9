use chrono::NaiveDate;
use fonte_core::connector::PriceHistoryProvider;
use fonte_core::{FonteError, Ticker};
use fonte_index::IndexConnector;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn fetches_full_series_and_windows_locally() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/daily").query_param("symbol", ".INX");
            then.status(200).json_body(json!([
                {"date": "2023-12-29", "open": 4782.9, "high": 4788.4,
                 "low": 4751.9, "close": 4769.8, "volume": "2,698,041,000"},
                {"date": "2024-01-02", "open": 4745.2, "high": 4754.3,
                 "low": 4722.7, "close": 4742.8, "volume": 3126060000u64},
                {"date": "2024-01-03", "open": 4725.1, "high": 4729.3,
                 "low": 4699.7, "close": 4704.8, "volume": 3116960000u64}
            ]));
        })
        .await;

    let conn = IndexConnector::new(Url::parse(&server.base_url()).unwrap());
    let bars = conn
        .prices(&Ticker::new("^GSPC"), d(2024, 1, 1), d(2024, 1, 2))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].date, d(2024, 1, 2));
    assert_eq!(bars[0].volume, 3_126_060_000);
}

#[tokio::test]
async fn unmapped_index_is_unsupported() {
    let server = MockServer::start_async().await;
    let conn = IndexConnector::new(Url::parse(&server.base_url()).unwrap());

    let err = conn
        .prices(&Ticker::new("^RUT"), d(2024, 1, 1), d(2024, 1, 31))
        .await
        .unwrap_err();

    assert!(matches!(err, FonteError::UnsupportedTicker { .. }));
}
