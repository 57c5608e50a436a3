//! Arbitrage module for evaluating the triangle.
//!
//! This module handles:
//! - Forward/reverse factor calculations
//! - The per-cycle report line

pub mod calculator;
pub mod report;

pub use calculator::{calculate, overall_fee_factor, ArbitrageFactors, FEE_FACTOR};
pub use report::Report;
