//! Forward and reverse factors for the LTC/XBT/USD triangle.

use crate::orderbook::Quote;

/// Fraction of value kept after one trade (0.26% taker fee).
pub const FEE_FACTOR: f64 = 0.9974;

/// Number of trades in one pass around the triangle.
pub const LEGS: i32 = 3;

/// Fee retention over a full cycle.
pub fn overall_fee_factor() -> f64 {
    FEE_FACTOR.powi(LEGS)
}

/// Result of one triangle evaluation.
///
/// A factor above 1.0 means the cycle returns more than it started with,
/// after fees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbitrageFactors {
    /// LTC -> XBT -> USD -> LTC.
    pub forward: f64,
    /// LTC -> USD -> XBT -> LTC.
    pub reverse: f64,
}

impl ArbitrageFactors {
    /// Whether either direction beats break-even.
    pub fn is_profitable(&self) -> bool {
        self.forward > 1.0 || self.reverse > 1.0
    }

    /// The better of the two directions.
    pub fn best(&self) -> f64 {
        self.forward.max(self.reverse)
    }
}

/// Compute both factors from the three quotes, in registry order.
///
/// A zero ask yields an infinite factor, which is passed through.
pub fn calculate(ltc_usd: &Quote, ltc_xbt: &Quote, xbt_usd: &Quote) -> ArbitrageFactors {
    let fees = overall_fee_factor();

    let forward = fees * ltc_xbt.bid * xbt_usd.bid / ltc_usd.ask;
    let reverse = fees * ltc_usd.bid / ltc_xbt.ask / xbt_usd.ask;

    ArbitrageFactors { forward, reverse }
}
