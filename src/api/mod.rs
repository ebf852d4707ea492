//! HTTP API module for the OEE Monitoring Engine.
//!
//! This module is the interface boundary toward display clients: it
//! serves the shift list, per-shift OEE metrics (behind a small TTL
//! cache), recent machine events and hourly production counts as JSON.

mod cache;
mod handlers;
mod response;
mod state;

pub use cache::MetricsCache;
pub use handlers::create_router;
pub use response::{ApiError, HourlyProduction};
pub use state::AppState;
