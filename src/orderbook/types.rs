//! Top-of-book quote types.

use time::OffsetDateTime;

use crate::market::Pair;

/// Best bid and ask for one pair at one point in time.
///
/// Quotes are created per fetch and dropped at the end of the cycle that
/// requested them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    /// Pair this quote belongs to.
    pub pair: Pair,
    /// Highest bid price.
    pub bid: f64,
    /// Lowest ask price.
    pub ask: f64,
    /// When the quote was fetched.
    pub fetched_at: OffsetDateTime,
}

impl Quote {
    /// Create a quote stamped with the current time.
    pub fn new(pair: Pair, bid: f64, ask: f64) -> Self {
        Self {
            pair,
            bid,
            ask,
            fetched_at: OffsetDateTime::now_utc(),
        }
    }

    /// Ask minus bid.
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }

    /// Check if the book is inverted (ask < bid).
    pub fn is_inverted(&self) -> bool {
        self.ask < self.bid
    }
}
