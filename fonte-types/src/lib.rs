//! fonte-types
//!
//! Canonical data model shared across the fonte ecosystem.
//!
//! - `records`: the normalized record types every connector must produce.
//! - `ticker`: ticker strings and market-segment classification.
//! - `kind`: stable capability labels for routing, caching, and errors.
//! - `config`: orchestrator and cache configuration.
//! - `error`: the unified `FonteError` type.
#![warn(missing_docs)]

/// Orchestrator and cache configuration types.
pub mod config;
/// Unified error type for the fonte workspace.
pub mod error;
/// Capability labels for routing, cache keys, and telemetry.
pub mod kind;
/// Canonical normalized record types.
pub mod records;
/// Ticker strings and market-segment classification.
pub mod ticker;

pub use config::{CacheConfig, FonteConfig};
pub use error::FonteError;
pub use kind::RecordKind;
pub use records::{
    CompanyNewsRecord, FinancialMetricsSnapshot, InsiderTradeRecord, LineItemRecord, PeriodKind,
    PricePoint, Sentiment,
};
pub use ticker::{MarketSegment, Ticker, classify};
