#![warn(missing_docs)]
//! Core abstractions for the fonte market-data router.
//!
//! This crate defines the connector contract (focused role traits plus the
//! umbrella [`FonteConnector`] trait), the append-only in-process record
//! cache, the backward pagination driver shared by paged upstreams, and the
//! null-propagating fundamental derivations.

pub mod backfill;
pub mod cache;
pub mod connector;
pub mod derive;

pub use backfill::paginate_backward;
pub use cache::{CacheRecord, DataCache};
pub use connector::{
    CompanyNewsProvider, FinancialMetricsProvider, FonteConnector, InsiderTradesProvider,
    LineItemsProvider, MarketCapProvider, PriceHistoryProvider,
};

// Re-export the shared vocabulary so downstream crates can depend on
// `fonte-core` alone.
pub use fonte_types::{
    CacheConfig, CompanyNewsRecord, FinancialMetricsSnapshot, FonteConfig, FonteError,
    InsiderTradeRecord, LineItemRecord, MarketSegment, PeriodKind, PricePoint, RecordKind,
    Sentiment, Ticker, classify,
};
