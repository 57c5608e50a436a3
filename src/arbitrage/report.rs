//! Console report line for one cycle.

use std::fmt;

use chrono::{Local, NaiveTime};

use super::calculator::ArbitrageFactors;

/// Factors stamped with the local wall-clock time they were computed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    /// Local time of day.
    pub time: NaiveTime,
    /// Computed factors.
    pub factors: ArbitrageFactors,
}

impl Report {
    /// Stamp `factors` with the current local time.
    pub fn now(factors: ArbitrageFactors) -> Self {
        Self::at(Local::now().time(), factors)
    }

    /// Stamp `factors` with an explicit time.
    pub fn at(time: NaiveTime, factors: ArbitrageFactors) -> Self {
        Self { time, factors }
    }

    /// Time of day as `HH:MM:SS`.
    pub fn clock(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}

/// `(HH:MM:SS) [forward]: F.FFFFF\t[reverse]: R.RRRRR`
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) [forward]: {:.5}\t[reverse]: {:.5}",
            self.clock(),
            self.factors.forward,
            self.factors.reverse
        )
    }
}
