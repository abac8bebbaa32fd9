//! End-to-end demo: route a few requests across the bundled connectors.
//!
//! ```sh
//! FINANCIAL_DATASETS_API_KEY=... cargo run -p fonte --example router_demo
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use fonte::{Fonte, PeriodKind, Ticker};
use fonte_ashare::AshareConnector;
use fonte_findata::FindataConnector;
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fonte=debug".into()),
        )
        .init();

    let mut findata = FindataConnector::builder();
    if let Ok(key) = std::env::var("FINANCIAL_DATASETS_API_KEY") {
        findata = findata.api_key(key);
    }

    let fonte = Fonte::builder()
        .with_connector(Arc::new(findata.build()?))
        .with_connector(Arc::new(AshareConnector::gateway(Url::parse(
            "http://localhost:8080/",
        )?)))
        .build()?;

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let end = NaiveDate::from_ymd_opt(2024, 6, 30).ok_or("bad date")?;

    let ticker = Ticker::new("AAPL");
    let bars = fonte.prices(&ticker, start, end).await?;
    println!("{}: {} daily bars", ticker, bars.len());

    let snaps = fonte
        .financial_metrics(&ticker, end, PeriodKind::Ttm, 4)
        .await?;
    for snap in &snaps {
        println!(
            "{} {}: market_cap={:?} pe={:?}",
            snap.ticker, snap.report_period, snap.market_cap, snap.price_to_earnings_ratio
        );
    }

    // Second pass is served from the in-process cache.
    let again = fonte.prices(&ticker, start, end).await?;
    println!("cached: {} daily bars", again.len());

    Ok(())
}
