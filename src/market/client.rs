//! Kraken public Depth API client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::FetchError;
use crate::metrics;
use crate::orderbook::Quote;

use super::types::Pair;

/// Anything that can produce the current top of book for a pair.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the best bid and ask for `pair`.
    async fn fetch(&self, pair: Pair) -> Result<Quote, FetchError>;

    /// Fetch by logical symbol. Unknown symbols fail before any request.
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, FetchError> {
        let pair = Pair::from_symbol(symbol)?;
        self.fetch(pair).await
    }
}

/// Kraken Depth API client.
#[derive(Debug, Clone)]
pub struct KrakenClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Full Depth endpoint URL.
    depth_url: String,
}

/// Depth response envelope.
#[derive(Debug, Deserialize)]
pub struct DepthResponse {
    /// Error strings; empty on success.
    #[serde(default)]
    pub error: Vec<String>,
    /// Books keyed by exchange pair id.
    pub result: Option<HashMap<String, DepthBook>>,
}

/// Bid and ask levels for one pair.
///
/// Each level is `[price, volume, timestamp]` with price and volume as
/// strings.
#[derive(Debug, Deserialize)]
pub struct DepthBook {
    /// Bid levels, best first.
    pub bids: Option<Vec<Vec<Value>>>,
    /// Ask levels, best first.
    pub asks: Option<Vec<Vec<Value>>>,
}

impl KrakenClient {
    /// Create a new Kraken client from config.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(Duration::from_secs(5))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            depth_url: config.kraken_depth_url.clone(),
        })
    }

    /// Get the Depth endpoint URL.
    pub fn depth_url(&self) -> &str {
        &self.depth_url
    }

    /// Request one level of depth for `pair` and return its top of book.
    #[instrument(skip_all, fields(pair = %pair))]
    pub async fn get_depth(&self, pair: Pair) -> Result<Quote, FetchError> {
        let timer = metrics::timer_depth_fetch(pair);
        let pair_id = pair.exchange_id();

        let response = self
            .http
            .get(&self.depth_url)
            .query(&[("pair", pair_id), ("count", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                pair: pair_id.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let quote = parse_depth(pair, &body)?;

        debug!(
            bid = quote.bid,
            ask = quote.ask,
            elapsed_ms = timer.elapsed_ms(),
            "Fetched top of book"
        );

        Ok(quote)
    }
}

#[async_trait]
impl QuoteSource for KrakenClient {
    async fn fetch(&self, pair: Pair) -> Result<Quote, FetchError> {
        self.get_depth(pair).await.inspect_err(|_| {
            metrics::inc_fetch_failures(pair);
        })
    }
}

/// Extract the best bid and ask for `pair` from a Depth response body.
pub fn parse_depth(pair: Pair, body: &str) -> Result<Quote, FetchError> {
    let pair_id = pair.exchange_id();

    let response: DepthResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::parse(pair_id, format!("invalid json: {}", e)))?;

    if !response.error.is_empty() {
        return Err(FetchError::Api {
            pair: pair_id.to_string(),
            messages: response.error,
        });
    }

    let mut result = response
        .result
        .ok_or_else(|| FetchError::parse(pair_id, "missing result"))?;
    let book = result
        .remove(pair_id)
        .ok_or_else(|| FetchError::parse(pair_id, format!("missing result.{}", pair_id)))?;

    let bid = best_price(pair_id, "bids", book.bids.as_deref())?;
    let ask = best_price(pair_id, "asks", book.asks.as_deref())?;

    Ok(Quote::new(pair, bid, ask))
}

fn best_price(pair_id: &str, side: &str, levels: Option<&[Vec<Value>]>) -> Result<f64, FetchError> {
    let raw = levels
        .and_then(|levels| levels.first())
        .and_then(|level| level.first())
        .ok_or_else(|| FetchError::parse(pair_id, format!("missing {}[0][0]", side)))?;

    let price = raw
        .as_str()
        .ok_or_else(|| FetchError::parse(pair_id, format!("{} price is not a string: {}", side, raw)))?;

    price
        .parse::<f64>()
        .map_err(|_| FetchError::parse(pair_id, format!("{} price is not numeric: {:?}", side, price)))
}
