//! Mock quote source for unit testing.
//!
//! Serves canned quotes without making network requests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::orderbook::Quote;

use super::client::QuoteSource;
use super::types::Pair;

/// Configuration for mock source behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Pairs whose fetch should fail.
    pub failing: HashSet<Pair>,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// In-memory [`QuoteSource`].
#[derive(Debug, Clone, Default)]
pub struct MockQuoteSource {
    /// Mock configuration.
    config: MockConfig,
    /// Bid/ask by pair.
    books: Arc<Mutex<HashMap<Pair, (f64, f64)>>>,
    /// Number of fetches served or failed.
    calls: Arc<AtomicUsize>,
}

impl MockQuoteSource {
    /// Create a new mock source with no books.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source with custom configuration.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set the bid and ask returned for `pair`.
    pub fn set_book(&self, pair: Pair, bid: f64, ask: f64) {
        self.books
            .lock()
            .expect("mock books lock poisoned")
            .insert(pair, (bid, ask));
    }

    /// Builder-style variant of [`set_book`](Self::set_book).
    pub fn with_book(self, pair: Pair, bid: f64, ask: f64) -> Self {
        self.set_book(pair, bid, ask);
        self
    }

    /// Make fetches for `pair` fail.
    pub fn fail_pair(mut self, pair: Pair) -> Self {
        self.config.failing.insert(pair);
        self
    }

    /// Number of fetches attempted so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    async fn fetch(&self, pair: Pair) -> Result<Quote, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.config.failing.contains(&pair) {
            return Err(FetchError::Status {
                pair: pair.exchange_id().to_string(),
                status: 503,
            });
        }

        let book = self
            .books
            .lock()
            .expect("mock books lock poisoned")
            .get(&pair)
            .copied();

        match book {
            Some((bid, ask)) => Ok(Quote::new(pair, bid, ask)),
            None => Err(FetchError::parse(pair.exchange_id(), "missing result")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_configured_books() {
        let source = MockQuoteSource::new().with_book(Pair::LtcUsd, 50.0, 51.0);

        let quote = source.fetch_quote("LTCUSD").await.unwrap();
        assert_eq!((quote.bid, quote.ask), (50.0, 51.0));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn unknown_symbol_never_reaches_source() {
        let source = MockQuoteSource::new();

        assert!(source.fetch_quote("ETHUSD").await.is_err());
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn failing_pair_returns_error() {
        let source = MockQuoteSource::new()
            .with_book(Pair::XbtUsd, 5000.0, 5010.0)
            .fail_pair(Pair::XbtUsd);

        assert!(source.fetch(Pair::XbtUsd).await.is_err());
    }
}
