//! HTTP API handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::arbitrage::Report;
use crate::error::CycleError;

/// Cycle counters and the latest published result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleStats {
    /// Cycles that produced a report.
    pub cycles_completed: u64,
    /// Cycles skipped after a fetch failure.
    pub cycles_skipped: u64,
    /// Latest report, if any.
    pub last_report: Option<LastReport>,
    /// Latest skip reason, if any.
    pub last_error: Option<String>,
}

/// Serializable view of a [`Report`].
#[derive(Debug, Clone, Serialize)]
pub struct LastReport {
    /// Local time of day, `HH:MM:SS`.
    pub time: String,
    /// Forward factor.
    pub forward: f64,
    /// Reverse factor.
    pub reverse: f64,
    /// Whether either factor beats break-even.
    pub profitable: bool,
}

impl From<&Report> for LastReport {
    fn from(report: &Report) -> Self {
        Self {
            time: report.clock(),
            forward: report.factors.forward,
            reverse: report.factors.reverse,
            profitable: report.factors.is_profitable(),
        }
    }
}

/// Application state shared with handlers.
///
/// Cycles only write here; nothing in a cycle reads it back.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Set once the first cycle completes.
    pub ready: Arc<AtomicBool>,
    /// Cycle statistics.
    pub stats: Arc<RwLock<CycleStats>>,
}

impl AppState {
    /// Create new app state.
    pub fn new() -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(RwLock::new(CycleStats::default())),
        }
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Snapshot of the statistics.
    pub async fn stats(&self) -> CycleStats {
        self.stats.read().await.clone()
    }

    /// Record a completed cycle.
    pub async fn record_report(&self, report: &Report) {
        let mut stats = self.stats.write().await;
        stats.cycles_completed += 1;
        stats.last_report = Some(LastReport::from(report));
        self.set_ready(true);
    }

    /// Record a skipped cycle.
    pub async fn record_skip(&self, error: &CycleError) {
        let mut stats = self.stats.write().await;
        stats.cycles_skipped += 1;
        stats.last_error = Some(error.to_string());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether a cycle has completed.
    pub ready: bool,
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service status.
    pub status: &'static str,
    /// Statistics.
    pub stats: CycleStats,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if ready, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();
    let response = ReadyResponse { ready: is_ready };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Status handler - returns cycle statistics and the latest factors.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.is_ready() { "running" } else { "starting" };

    Json(StatusResponse {
        status,
        stats: state.stats().await,
    })
}
