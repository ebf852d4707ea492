//! OEE metrics result model.
//!
//! This module contains the [`OeeMetrics`] type that captures all outputs
//! of a per-shift OEE computation: the three sub-factors, their product,
//! and the supporting counts and durations.

use serde::{Deserialize, Serialize};

/// The Overall Equipment Effectiveness metrics of one shift.
///
/// This is a value, not an entity: it is constructed fresh per computation,
/// has no identity, and is never persisted by the engine. Each ratio is in
/// `[0, 1]` under normal operation, except `performance`, which may exceed
/// 1 when actual throughput beats the ideal-cycle assumption (it is not
/// clamped).
///
/// # Example
///
/// ```
/// use oee_engine::models::OeeMetrics;
///
/// let metrics = OeeMetrics::zeroed(28800.0, 600.0, 0, 0);
/// assert_eq!(metrics.oee, 0.0);
/// assert_eq!(metrics.planned_time_secs, 28800.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OeeMetrics {
    /// Fraction of planned time the line actually ran.
    pub availability: f64,
    /// Fraction of theoretical maximum output actually achieved.
    pub performance: f64,
    /// Fraction of produced pieces that passed quality control.
    pub quality: f64,
    /// Availability × performance × quality.
    pub oee: f64,
    /// Total pieces produced during the shift.
    pub total_pieces: u64,
    /// Pieces that passed quality control.
    pub good_pieces: u64,
    /// Pieces that failed quality control.
    pub reject_pieces: u64,
    /// Effective run time in seconds (planned minus downtime).
    pub run_time_secs: f64,
    /// Planned shift duration in seconds.
    pub planned_time_secs: f64,
    /// Cumulative failure downtime in seconds.
    pub downtime_secs: f64,
}

impl OeeMetrics {
    /// Builds the all-zero-ratio metrics used when a shift has no
    /// production or no run time.
    ///
    /// The counts and durations are still reported so a display can show
    /// what little the shift did produce.
    pub fn zeroed(
        planned_time_secs: f64,
        downtime_secs: f64,
        good_pieces: u64,
        reject_pieces: u64,
    ) -> Self {
        Self {
            availability: 0.0,
            performance: 0.0,
            quality: 0.0,
            oee: 0.0,
            total_pieces: good_pieces + reject_pieces,
            good_pieces,
            reject_pieces,
            run_time_secs: (planned_time_secs - downtime_secs).max(0.0),
            planned_time_secs,
            downtime_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_reports_counts_and_durations() {
        let metrics = OeeMetrics::zeroed(28800.0, 28800.0, 3, 1);

        assert_eq!(metrics.availability, 0.0);
        assert_eq!(metrics.performance, 0.0);
        assert_eq!(metrics.quality, 0.0);
        assert_eq!(metrics.oee, 0.0);
        assert_eq!(metrics.total_pieces, 4);
        assert_eq!(metrics.good_pieces, 3);
        assert_eq!(metrics.reject_pieces, 1);
        assert_eq!(metrics.run_time_secs, 0.0);
    }

    #[test]
    fn test_zeroed_run_time_never_negative() {
        let metrics = OeeMetrics::zeroed(100.0, 250.0, 0, 0);
        assert_eq!(metrics.run_time_secs, 0.0);
    }

    #[test]
    fn test_metrics_serialization_round_trip() {
        let metrics = OeeMetrics {
            availability: 0.979,
            performance: 0.886,
            quality: 0.96,
            oee: 0.833,
            total_pieces: 500,
            good_pieces: 480,
            reject_pieces: 20,
            run_time_secs: 28200.0,
            planned_time_secs: 28800.0,
            downtime_secs: 600.0,
        };

        let json = serde_json::to_string(&metrics).unwrap();
        let deserialized: OeeMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(metrics, deserialized);
    }
}
