//! Configuration types shared by the orchestrator and the cache.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Capacity policy for the append-only record cache.
///
/// The cache never expires entries within a process run; the only policy knob
/// is an optional per-(ticker, kind) record cap. `None` reproduces the
/// unbounded behavior of the original system.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum records retained per (ticker, kind) key; oldest dates are
    /// dropped first on overflow. `None` means unbounded.
    pub max_records_per_key: Option<usize>,
}

/// Global configuration for the `Fonte` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FonteConfig {
    /// Timeout applied to each individual provider call.
    pub provider_timeout: Duration,
    /// How many additional attempts a retryable failure earns.
    pub retry_attempts: u32,
    /// Fixed delay between retry attempts.
    pub retry_backoff: Duration,
    /// Cache capacity policy.
    pub cache: CacheConfig,
}

impl Default for FonteConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(5),
            retry_attempts: 2,
            retry_backoff: Duration::from_millis(250),
            cache: CacheConfig::default(),
        }
    }
}
