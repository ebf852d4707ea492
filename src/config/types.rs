//! Configuration types for the monitoring engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration of the monitoring engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitorConfig {
    /// Metrics cache settings of the API layer.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Synthetic line simulator settings.
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

/// Settings for the API layer's metrics cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// How long a computed metrics record stays fresh, in seconds.
    #[serde(default = "default_metrics_ttl_secs")]
    pub metrics_ttl_secs: f64,
}

impl CacheConfig {
    /// Returns the freshness window as a [`Duration`].
    pub fn metrics_ttl(&self) -> Duration {
        Duration::from_secs_f64(self.metrics_ttl_secs.max(0.0))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            metrics_ttl_secs: default_metrics_ttl_secs(),
        }
    }
}

/// Settings for the synthetic line simulator.
///
/// The defaults reproduce the original line model: one bottle every five
/// seconds, 3 % rejects, 1 % failure chance per cycle, 20-second repairs.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    /// The shift the simulator attributes its records to.
    #[serde(default = "default_shift_id")]
    pub shift_id: i64,
    /// The product the simulator reports producing.
    #[serde(default = "default_product_id")]
    pub product_id: i64,
    /// Seconds per production cycle.
    #[serde(default = "default_cycle_secs")]
    pub cycle_secs: f64,
    /// Probability that a produced unit is a reject, in `[0, 1]`.
    #[serde(default = "default_reject_probability")]
    pub reject_probability: f64,
    /// Probability of a failure being injected per cycle, in `[0, 1]`.
    #[serde(default = "default_failure_probability")]
    pub failure_probability: f64,
    /// Seconds a simulated failure takes to repair.
    #[serde(default = "default_repair_secs")]
    pub repair_secs: f64,
    /// Seed of the simulator's random process, for reproducible runs.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            shift_id: default_shift_id(),
            product_id: default_product_id(),
            cycle_secs: default_cycle_secs(),
            reject_probability: default_reject_probability(),
            failure_probability: default_failure_probability(),
            repair_secs: default_repair_secs(),
            seed: default_seed(),
        }
    }
}

fn default_metrics_ttl_secs() -> f64 {
    5.0
}

fn default_shift_id() -> i64 {
    1
}

fn default_product_id() -> i64 {
    1
}

fn default_cycle_secs() -> f64 {
    5.0
}

fn default_reject_probability() -> f64 {
    0.03
}

fn default_failure_probability() -> f64 {
    0.01
}

fn default_repair_secs() -> f64 {
    20.0
}

fn default_seed() -> u64 {
    42
}
