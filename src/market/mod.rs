//! Market module for the LTC/XBT/USD triangle on Kraken.
//!
//! This module handles:
//! - The currency-pair registry
//! - The Kraken Depth API client
//! - Mock quote source for testing

pub mod client;
pub mod mock;
pub mod types;

pub use client::{parse_depth, KrakenClient, QuoteSource};
pub use mock::{MockConfig, MockQuoteSource};
pub use types::Pair;
