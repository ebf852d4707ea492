//! Error types for the OEE Monitoring Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur outside the metrics computation
//! itself (the computation is total and never fails).

use thiserror::Error;

/// The main error type for the OEE Monitoring Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application. Note that
/// the metrics computation in [`crate::calculation`] is deliberately total:
/// errors only arise from configuration loading and the data store.
///
/// # Example
///
/// ```
/// use oee_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/monitor.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/monitor.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The requested shift does not exist in the store.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The shift identifier that was not found.
        shift_id: i64,
    },

    /// The store connection lock could not be acquired.
    #[error("Store lock poisoned: {message}")]
    StoreLock {
        /// A description of the lock failure.
        message: String,
    },

    /// A database query or statement failed.
    #[error("Store query failed: {message}")]
    Store {
        /// A description of the database error.
        message: String,
    },
}

impl From<rusqlite::Error> for EngineError {
    fn from(err: rusqlite::Error) -> Self {
        EngineError::Store {
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
