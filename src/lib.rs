//! LTC/XBT/USD triangular arbitrage monitor for Kraken.
//!
//! Every few seconds the monitor fetches the top of book for three pairs that
//! form a closed conversion cycle and reports how much value a full pass
//! around the cycle would keep after fees, in both directions.
//!
//! # Strategy
//!
//! Each leg costs a 0.26% taker fee, so a cycle keeps `0.9974^3` of its value
//! before prices are applied:
//!
//! ```text
//! forward = 0.9974^3 * LTC/XBT bid * XBT/USD bid / LTC/USD ask
//! reverse = 0.9974^3 * LTC/USD bid / LTC/XBT ask / XBT/USD ask
//! ```
//!
//! A factor above 1.0 means that direction beats break-even.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: Pair registry and Kraken Depth client
//! - [`orderbook`]: Top-of-book quotes
//! - [`arbitrage`]: Factor calculation and report formatting
//! - [`poller`]: Interval scheduler and per-cycle pipeline
//! - [`api`]: HTTP API for health/status
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Shutdown signal helpers

pub mod api;
pub mod arbitrage;
pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod orderbook;
pub mod poller;
pub mod utils;

pub use config::Config;
pub use error::{BotError, Result};
