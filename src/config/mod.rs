//! Runtime configuration for the OEE Monitoring Engine.
//!
//! Covers the metrics cache of the API layer and the synthetic line
//! simulator. Every field has a default matching the constants of the
//! original bottling-line deployment, so an empty file (or a missing
//! section) yields a working configuration.

mod loader;
mod types;

pub use types::{CacheConfig, MonitorConfig, SimulatorConfig};
