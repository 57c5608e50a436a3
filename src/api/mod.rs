//! HTTP API module for health, readiness, and status endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, CycleStats};
pub use routes::create_router;
