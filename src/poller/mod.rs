//! Poll loop: a fixed-interval scheduler driving fetch-and-compute cycles.
//!
//! This module handles:
//! - Interval scheduling with cooperative cancellation
//! - The per-cycle pipeline and its error handling

pub mod cycle;
pub mod scheduler;

pub use cycle::{run_cycle, Poller};
pub use scheduler::{Scheduler, SchedulerHandle};
