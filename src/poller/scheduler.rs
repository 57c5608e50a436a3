//! Fixed-interval cycle scheduler.
//!
//! Ticks are anchored to the interval, not to cycle completion: each cycle is
//! spawned as its own task, so a slow cycle never delays the next tick and
//! cycles may overlap. Shutdown stops new ticks but waits for spawned cycles.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Fires a cycle immediately and then once per interval until cancelled.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    /// Shortest accepted period.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Create a scheduler with the given period.
    ///
    /// Periods below [`MIN_INTERVAL`](Self::MIN_INTERVAL), including zero,
    /// are raised to it.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Self::MIN_INTERVAL),
        }
    }

    /// Period between cycles.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Drive `cycle` until `shutdown` becomes `true` or its sender is dropped.
    ///
    /// Cycles already in flight when shutdown is observed run to completion
    /// before this returns.
    pub async fn run<F, Fut>(&self, mut shutdown: watch::Receiver<bool>, mut cycle: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(interval_secs = self.interval.as_secs_f64(), "Scheduler started");

        let mut tick_count = 0u64;
        let mut in_flight = JoinSet::new();

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    tick_count += 1;
                    debug!(tick = tick_count, "Scheduler tick");

                    while let Some(done) = in_flight.try_join_next() {
                        log_cycle_panic(done);
                    }
                    in_flight.spawn(cycle());
                }
            }
        }

        if !in_flight.is_empty() {
            info!(in_flight = in_flight.len(), "Waiting for running cycles");
        }
        while let Some(done) = in_flight.join_next().await {
            log_cycle_panic(done);
        }

        info!(ticks = tick_count, "Scheduler stopped");
    }

    /// Run on a background task and return a handle that can cancel it.
    pub fn spawn<F, Fut>(self, cycle: F) -> SchedulerHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown, rx) = watch::channel(false);
        let task = tokio::spawn(async move { self.run(rx, cycle).await });

        SchedulerHandle { shutdown, task }
    }
}

fn log_cycle_panic(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        warn!(error = %e, "Cycle task failed");
    }
}

/// Cancellation handle for a spawned [`Scheduler`].
#[derive(Debug)]
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop scheduling. Takes effect before the next tick.
    pub fn cancel(&self) {
        self.shutdown.send_replace(true);
    }

    /// Wait for the scheduler loop and its running cycles to exit.
    pub async fn join(self) -> Result<(), tokio::task::JoinError> {
        self.task.await
    }

    /// Cancel and wait for the loop to exit.
    pub async fn stop(self) -> Result<(), tokio::task::JoinError> {
        self.cancel();
        self.join().await
    }
}
