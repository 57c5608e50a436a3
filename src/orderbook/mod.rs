//! Order book module for market data.
//!
//! Only the top of book is tracked: one [`Quote`] per pair per cycle.

pub mod types;

pub use types::Quote;
