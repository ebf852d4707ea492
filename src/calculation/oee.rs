//! Per-shift OEE computation.
//!
//! This module combines the failure downtime from the interval reducer
//! with the shift's production counts and the reference ideal cycle time
//! into the full [`OeeMetrics`] record.

use crate::models::{MachineEvent, OeeMetrics, Product, ProductionCycle, Shift};

use super::downtime::compute_downtime;
use super::reference_product::{DEFAULT_IDEAL_CYCLE_SECS, ideal_cycle_for, select_reference_product};

/// Computes the OEE metrics of a shift.
///
/// Events and production cycles are filtered to `shift.id` internally, so
/// callers may pass pre-filtered collections or the full store contents;
/// either way records of other shifts cannot leak into the result.
///
/// The computation is total: there is no input for which it fails.
/// A shift with no production or no run time yields all four ratios as
/// exactly `0.0` (with counts and durations still reported), and a
/// reference product missing from the catalog falls back to a default
/// ideal cycle time. Performance is not clamped and may exceed 1 when the
/// line outruns the ideal-cycle assumption.
///
/// # Example
///
/// ```
/// use oee_engine::calculation::compute_metrics;
/// use oee_engine::models::Shift;
/// use chrono::NaiveDateTime;
///
/// let parse = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let shift = Shift {
///     id: 1,
///     name: "Morning".to_string(),
///     start_time: parse("2025-11-03 08:00:00"),
///     end_time: parse("2025-11-03 16:00:00"),
/// };
///
/// let metrics = compute_metrics(&shift, &[], &[], &[]);
/// assert_eq!(metrics.oee, 0.0);
/// assert_eq!(metrics.planned_time_secs, 28800.0);
/// ```
pub fn compute_metrics(
    shift: &Shift,
    events: &[MachineEvent],
    cycles: &[ProductionCycle],
    products: &[Product],
) -> OeeMetrics {
    let planned_time_secs = shift.planned_seconds();
    let downtime_secs = compute_downtime(shift, events);
    let run_time_secs = (planned_time_secs - downtime_secs).max(0.0);

    let shift_cycles: Vec<&ProductionCycle> =
        cycles.iter().filter(|c| c.shift_id == shift.id).collect();

    let total_pieces = shift_cycles.len() as u64;
    let good_pieces = shift_cycles.iter().filter(|c| c.is_good).count() as u64;
    let reject_pieces = total_pieces - good_pieces;

    if total_pieces == 0 || run_time_secs == 0.0 {
        return OeeMetrics::zeroed(planned_time_secs, downtime_secs, good_pieces, reject_pieces);
    }

    let ideal_cycle_secs = select_reference_product(shift.id, cycles)
        .map(|product_id| ideal_cycle_for(product_id, products))
        .unwrap_or(DEFAULT_IDEAL_CYCLE_SECS);

    let theoretical_max_pieces = run_time_secs / ideal_cycle_secs;

    let availability = if planned_time_secs > 0.0 {
        run_time_secs / planned_time_secs
    } else {
        0.0
    };
    let performance = if theoretical_max_pieces > 0.0 {
        total_pieces as f64 / theoretical_max_pieces
    } else {
        0.0
    };
    let quality = good_pieces as f64 / total_pieces as f64;

    OeeMetrics {
        availability,
        performance,
        quality,
        oee: availability * performance * quality,
        total_pieces,
        good_pieces,
        reject_pieces,
        run_time_secs,
        planned_time_secs,
        downtime_secs,
    }
}
