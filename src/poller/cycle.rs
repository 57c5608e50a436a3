//! One fetch-calculate-report pass over the triangle.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::api::AppState;
use crate::arbitrage::{calculate, Report};
use crate::error::CycleError;
use crate::market::{Pair, QuoteSource};
use crate::metrics;
use crate::orderbook::Quote;

async fn fetch<S>(source: &S, pair: Pair) -> Result<Quote, CycleError>
where
    S: QuoteSource + ?Sized,
{
    source
        .fetch(pair)
        .await
        .map_err(|source| CycleError::FetchFailed {
            symbol: pair.symbol(),
            source,
        })
}

/// Fetch all three pairs, then compute the factors.
///
/// All-or-nothing: if any fetch fails the whole cycle fails and no
/// factors are produced.
pub async fn run_cycle<S>(source: &S) -> Result<Report, CycleError>
where
    S: QuoteSource + ?Sized,
{
    let (ltc_usd, ltc_xbt, xbt_usd) = tokio::try_join!(
        fetch(source, Pair::LtcUsd),
        fetch(source, Pair::LtcXbt),
        fetch(source, Pair::XbtUsd),
    )?;

    for quote in [&ltc_usd, &ltc_xbt, &xbt_usd] {
        if quote.is_inverted() {
            debug!(pair = %quote.pair, spread = quote.spread(), "Order book inverted");
        }
    }

    let factors = calculate(&ltc_usd, &ltc_xbt, &xbt_usd);
    Ok(Report::now(factors))
}

/// Runs cycles against a quote source and handles their outcome.
///
/// This is the single top-level handler: cycle errors are logged and
/// swallowed here so that nothing propagates into the scheduler.
pub struct Poller<S: ?Sized> {
    source: Arc<S>,
    state: Option<AppState>,
}

impl<S: ?Sized> Clone for Poller<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: self.state.clone(),
        }
    }
}

impl<S> Poller<S>
where
    S: QuoteSource + ?Sized,
{
    /// Create a poller over `source`.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: None,
        }
    }

    /// Publish cycle outcomes to the status API.
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Run one cycle, print its report line, and return the report.
    ///
    /// Returns `None` when the cycle was skipped.
    #[instrument(skip(self))]
    pub async fn poll_once(&self) -> Option<Report> {
        metrics::inc_cycles_started();

        match run_cycle(self.source.as_ref()).await {
            Ok(report) => {
                println!("{}", report);

                let factors = report.factors;
                metrics::inc_cycles_completed();
                metrics::set_factors(factors.forward, factors.reverse);

                if factors.is_profitable() {
                    info!(
                        forward = factors.forward,
                        reverse = factors.reverse,
                        "Arbitrage opportunity detected"
                    );
                }

                if let Some(state) = &self.state {
                    state.record_report(&report).await;
                }

                Some(report)
            }
            Err(e) => {
                warn!(error = %e, "Cycle skipped");
                metrics::inc_cycles_skipped();

                if let Some(state) = &self.state {
                    state.record_skip(&e).await;
                }

                None
            }
        }
    }
}
