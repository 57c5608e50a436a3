//! Unified error types for the arbitrage monitor.

use thiserror::Error;

/// Unified error type for the arbitrage monitor.
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration validation error.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Depth fetch error.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Cycle error.
    #[error("cycle error: {0}")]
    Cycle(#[from] CycleError),
}

/// Errors raised while fetching the top of book for one pair.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Symbol is not in the pair registry. Raised before any network call.
    #[error("unknown pair: {0}")]
    UnknownPair(String),

    /// Transport failure, timeout or undecodable body.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status.
    #[error("depth request for {pair} failed: HTTP {status}")]
    Status {
        /// Exchange pair id.
        pair: String,
        /// Response status code.
        status: u16,
    },

    /// Kraken reported errors in the response envelope.
    #[error("kraken api error for {pair}: {}", .messages.join(", "))]
    Api {
        /// Exchange pair id.
        pair: String,
        /// Error strings from the `error` array.
        messages: Vec<String>,
    },

    /// Response body did not have the expected shape.
    #[error("failed to parse depth for {pair}: {reason}")]
    Parse {
        /// Exchange pair id.
        pair: String,
        /// What was missing or malformed.
        reason: String,
    },
}

impl FetchError {
    pub(crate) fn parse(pair: &str, reason: impl Into<String>) -> Self {
        FetchError::Parse {
            pair: pair.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors that cause one poll cycle to be skipped.
#[derive(Error, Debug)]
pub enum CycleError {
    /// One of the three quotes could not be fetched.
    #[error("fetch failed for {symbol}: {source}")]
    FetchFailed {
        /// Logical pair symbol.
        symbol: String,
        /// Underlying fetch error.
        #[source]
        source: FetchError,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, BotError>;
