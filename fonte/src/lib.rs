#![warn(missing_docs)]
//! fonte
//!
//! Orchestrator that routes market-data requests to the right connector for
//! a ticker's market segment, retries transient upstream failures, and keeps
//! every fetched record in an append-only in-process cache so overlapping
//! requests within a run never hit the upstream twice.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fonte::{Fonte, Ticker};
//!
//! let fonte = Fonte::builder()
//!     .with_connector(Arc::new(findata))
//!     .with_connector(Arc::new(ashare))
//!     .build()?;
//!
//! let bars = fonte.prices(&Ticker::new("AAPL"), start, end).await?;
//! ```

mod core;
mod router;

pub use crate::core::{Fonte, FonteBuilder};

pub use fonte_core::connector::{
    CompanyNewsProvider, FinancialMetricsProvider, FonteConnector, InsiderTradesProvider,
    LineItemsProvider, MarketCapProvider, PriceHistoryProvider,
};
pub use fonte_core::{
    CacheConfig, CompanyNewsRecord, DataCache, FinancialMetricsSnapshot, FonteConfig, FonteError,
    InsiderTradeRecord, LineItemRecord, MarketSegment, PeriodKind, PricePoint, RecordKind,
    Sentiment, Ticker, classify,
};
