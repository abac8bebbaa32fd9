use std::sync::Arc;
use std::time::Duration;

use fonte_core::{CacheConfig, DataCache, FonteConfig, FonteConnector, FonteError, Ticker};

/// Orchestrator that routes requests across registered connectors and caches
/// every record they return.
pub struct Fonte {
    pub(crate) connectors: Vec<Arc<dyn FonteConnector>>,
    pub(crate) cache: Arc<DataCache>,
    pub(crate) cfg: FonteConfig,
}

impl std::fmt::Debug for Fonte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fonte")
            .field("connectors", &self.connectors.len())
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`Fonte`] orchestrator.
pub struct FonteBuilder {
    connectors: Vec<Arc<dyn FonteConnector>>,
    cfg: FonteConfig,
}

impl Default for FonteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FonteBuilder {
    /// Create a builder with default configuration and no connectors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: FonteConfig::default(),
        }
    }

    /// Register a connector. Registration order decides routing: the first
    /// connector whose `supports_segment` matches a ticker serves it.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn FonteConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Timeout applied to each individual provider call.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// How many additional attempts a retryable failure earns.
    #[must_use]
    pub const fn retry_attempts(mut self, attempts: u32) -> Self {
        self.cfg.retry_attempts = attempts;
        self
    }

    /// Fixed delay between retry attempts.
    #[must_use]
    pub const fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.cfg.retry_backoff = backoff;
        self
    }

    /// Cache capacity policy.
    #[must_use]
    pub const fn cache(mut self, cfg: CacheConfig) -> Self {
        self.cfg.cache = cfg;
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no connectors are registered; a router with
    /// nothing to route to is a configuration mistake, not a runtime state.
    pub fn build(self) -> Result<Fonte, FonteError> {
        if self.connectors.is_empty() {
            return Err(FonteError::InvalidArg(
                "at least one connector must be registered".to_string(),
            ));
        }
        let cache = Arc::new(DataCache::new(self.cfg.cache));
        Ok(Fonte {
            connectors: self.connectors,
            cache,
            cfg: self.cfg,
        })
    }
}

impl Fonte {
    /// Start building a new orchestrator.
    #[must_use]
    pub fn builder() -> FonteBuilder {
        FonteBuilder::new()
    }

    /// The record cache shared by all routing operations.
    #[must_use]
    pub fn cache(&self) -> &Arc<DataCache> {
        &self.cache
    }

    /// First registered connector serving the ticker's segment.
    pub(crate) fn route(&self, ticker: &Ticker) -> Result<&dyn FonteConnector, FonteError> {
        self.connectors
            .iter()
            .find(|c| c.supports_segment(ticker.segment()))
            .map(|c| c.as_ref())
            .ok_or_else(|| FonteError::unsupported_ticker(ticker.as_str()))
    }

    /// Run one provider call with the configured per-attempt timeout,
    /// retrying retryable failures up to the configured budget.
    pub(crate) async fn call_with_retry<T, F, Fut>(
        &self,
        connector_name: &'static str,
        capability: &'static str,
        mut attempt: F,
    ) -> Result<T, FonteError>
    where
        F: FnMut() -> Fut,
        Fut: core::future::Future<Output = Result<T, FonteError>>,
    {
        let mut used = 0u32;
        loop {
            let outcome = tokio::time::timeout(self.cfg.provider_timeout, attempt())
                .await
                .unwrap_or_else(|_| {
                    Err(FonteError::provider_timeout(connector_name, capability))
                });
            match outcome {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && used < self.cfg.retry_attempts => {
                    used += 1;
                    tracing::warn!(
                        connector = connector_name,
                        capability,
                        attempt = used,
                        error = %e,
                        "provider call failed, retrying"
                    );
                    tokio::time::sleep(self.cfg.retry_backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
