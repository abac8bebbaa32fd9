mod helpers;

use std::sync::Arc;

use fonte::{Fonte, FonteError, MarketSegment, PeriodKind, Ticker};
use helpers::{MockConnector, bar, d};

#[test]
fn builder_rejects_empty_connector_list() {
    let err = Fonte::builder().build().unwrap_err();
    assert!(matches!(err, FonteError::InvalidArg(_)));
}

#[tokio::test]
async fn requests_route_by_market_segment() {
    let us = Arc::new(MockConnector {
        prices_fn: Some(Arc::new(|_, _, _| Ok(vec![bar(2024, 1, 2, 185.6)]))),
        ..MockConnector::for_segment("us", MarketSegment::UsEquity)
    });
    let cn = Arc::new(MockConnector {
        prices_fn: Some(Arc::new(|_, _, _| Ok(vec![bar(2024, 1, 2, 1720.5)]))),
        ..MockConnector::for_segment("cn", MarketSegment::AShare)
    });

    let fonte = Fonte::builder()
        .with_connector(us.clone())
        .with_connector(cn.clone())
        .build()
        .unwrap();

    let bars = fonte
        .prices(&Ticker::new("AAPL"), d(2024, 1, 1), d(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(bars[0].close, 185.6);
    assert_eq!(us.call_count(), 1);
    assert_eq!(cn.call_count(), 0);

    let bars = fonte
        .prices(&Ticker::new("600519.SH"), d(2024, 1, 1), d(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(bars[0].close, 1720.5);
    assert_eq!(cn.call_count(), 1);
}

#[tokio::test]
async fn first_matching_connector_wins() {
    let primary = Arc::new(MockConnector {
        prices_fn: Some(Arc::new(|_, _, _| Ok(vec![bar(2024, 1, 2, 1.0)]))),
        ..MockConnector::for_segment("primary", MarketSegment::UsEquity)
    });
    let secondary = Arc::new(MockConnector {
        prices_fn: Some(Arc::new(|_, _, _| Ok(vec![bar(2024, 1, 2, 2.0)]))),
        ..MockConnector::for_segment("secondary", MarketSegment::UsEquity)
    });

    let fonte = Fonte::builder()
        .with_connector(primary.clone())
        .with_connector(secondary.clone())
        .build()
        .unwrap();

    let bars = fonte
        .prices(&Ticker::new("AAPL"), d(2024, 1, 1), d(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(bars[0].close, 1.0);
    assert_eq!(secondary.call_count(), 0);
}

#[tokio::test]
async fn unserved_segment_is_unsupported_ticker() {
    let us = Arc::new(MockConnector::for_segment("us", MarketSegment::UsEquity));
    let fonte = Fonte::builder().with_connector(us).build().unwrap();

    let err = fonte
        .prices(&Ticker::new("600519.SH"), d(2024, 1, 1), d(2024, 1, 31))
        .await
        .unwrap_err();
    assert!(matches!(err, FonteError::UnsupportedTicker { .. }));
}

#[tokio::test]
async fn missing_capability_is_unsupported() {
    // Serves the index segment but only for price history.
    let index = Arc::new(MockConnector {
        prices_fn: Some(Arc::new(|_, _, _| Ok(vec![]))),
        ..MockConnector::for_segment("index", MarketSegment::UsIndex)
    });
    let fonte = Fonte::builder().with_connector(index).build().unwrap();

    let err = fonte
        .financial_metrics(&Ticker::new("^GSPC"), d(2024, 6, 30), PeriodKind::Ttm, 4)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FonteError::Unsupported {
            capability: "financial-metrics"
        }
    ));
}

#[tokio::test]
async fn reversed_window_is_invalid_input() {
    let us = Arc::new(MockConnector {
        prices_fn: Some(Arc::new(|_, _, _| Ok(vec![]))),
        ..MockConnector::for_segment("us", MarketSegment::UsEquity)
    });
    let fonte = Fonte::builder().with_connector(us.clone()).build().unwrap();

    let err = fonte
        .prices(&Ticker::new("AAPL"), d(2024, 6, 30), d(2024, 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, FonteError::InvalidArg(_)));
    // Rejected before any upstream traffic.
    assert_eq!(us.call_count(), 0);
}
