//! Configuration loading functionality.
//!
//! This module provides loading of [`MonitorConfig`] from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::MonitorConfig;

impl MonitorConfig {
    /// Loads configuration from the specified YAML file.
    ///
    /// Every field is optional in the file; anything omitted falls back
    /// to its default. Fails only when the file is missing or not valid
    /// YAML for the expected shape.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use oee_engine::config::MonitorConfig;
    ///
    /// let config = MonitorConfig::load("./config/monitor.yaml")?;
    /// println!("cache ttl: {}s", config.cache.metrics_ttl_secs);
    /// # Ok::<(), oee_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
