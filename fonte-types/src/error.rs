use thiserror::Error;

/// Unified error type for the fonte workspace.
///
/// Wraps capability mismatches, caller-input validation errors,
/// provider-tagged upstream failures, decode problems, and the pagination
/// consistency failure. Upstream failures carry enough context to decide
/// retryability via [`FonteError::is_retryable`].
#[derive(Debug, Error)]
pub enum FonteError {
    /// No connector handles the ticker's market segment, or an index symbol
    /// has no provider-code mapping.
    #[error("unsupported ticker: {ticker}")]
    UnsupportedTicker {
        /// The offending symbol.
        ticker: String,
    },

    /// The routed connector does not implement the requested capability.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "news").
        capability: &'static str,
    },

    /// Invalid caller input (e.g. a date range with start after end).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Transport-level upstream failure (connect, TLS, body read).
    #[error("{provider} unavailable: {msg}")]
    Upstream {
        /// Connector name that failed.
        provider: &'static str,
        /// Human-readable cause.
        msg: String,
    },

    /// Upstream answered with a non-2xx status.
    #[error("{provider} returned status {code}")]
    Status {
        /// Connector name that failed.
        provider: &'static str,
        /// HTTP status code.
        code: u16,
    },

    /// Upstream payload did not match the expected native schema at the
    /// response level (individual missing fields degrade to `None` instead).
    #[error("{provider} response could not be decoded: {msg}")]
    Decode {
        /// Connector name whose payload failed to decode.
        provider: &'static str,
        /// Human-readable cause.
        msg: String,
    },

    /// A paged upstream failed to advance its cursor; continuing would loop.
    #[error("{provider} pagination inconsistency: {detail}")]
    PaginationInconsistency {
        /// Connector name whose paging misbehaved.
        provider: &'static str,
        /// What failed to decrease.
        detail: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {provider}")]
    ProviderTimeout {
        /// Connector name that timed out.
        provider: &'static str,
        /// Capability label (e.g. "prices", "news").
        capability: &'static str,
    },

    /// A resource genuinely has no data.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "market cap for AAPL".
        what: String,
    },
}

impl FonteError {
    /// Helper: build an `UnsupportedTicker` error.
    pub fn unsupported_ticker(ticker: impl Into<String>) -> Self {
        Self::UnsupportedTicker {
            ticker: ticker.into(),
        }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub const fn unsupported(capability: &'static str) -> Self {
        Self::Unsupported { capability }
    }

    /// Helper: build an `Upstream` error with the provider name and cause.
    pub fn upstream(provider: &'static str, msg: impl Into<String>) -> Self {
        Self::Upstream {
            provider,
            msg: msg.into(),
        }
    }

    /// Helper: build a `Decode` error.
    pub fn decode(provider: &'static str, msg: impl Into<String>) -> Self {
        Self::Decode {
            provider,
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing
    /// resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    #[must_use]
    pub const fn provider_timeout(provider: &'static str, capability: &'static str) -> Self {
        Self::ProviderTimeout {
            provider,
            capability,
        }
    }

    /// Whether a fresh attempt could plausibly succeed.
    ///
    /// Transport failures, timeouts, throttling (429), and server-side (5xx)
    /// statuses are retryable; everything else is deterministic and is not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { .. } | Self::ProviderTimeout { .. } => true,
            Self::Status { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}
