//! Failure interval reduction.
//!
//! This module reduces a shift's FAILURE_START/FAILURE_END event markers
//! into cumulative downtime seconds with a single pass over the events in
//! timestamp order.

use chrono::NaiveDateTime;

use crate::models::{EventKind, MachineEvent, Shift};

/// Computes the cumulative failure downtime of a shift, in seconds.
///
/// Events are filtered to the given shift and sorted into non-decreasing
/// timestamp order before reduction (inputs may arrive unordered; the sort
/// is stable, so events with equal timestamps keep their input order).
/// The reducer is a two-state machine:
///
/// - `FAILURE_START` while running: the failure interval opens.
///   A second `FAILURE_START` while already failed is ignored, so
///   duplicate start markers neither double-count nor re-base the interval.
/// - `FAILURE_END` while failed: the interval closes and its duration is
///   added to the total. A `FAILURE_END` without a preceding start is
///   ignored.
/// - An interval still open when the events run out is closed at the shift
///   end, contributing `max(shift_end - start, 0)` so a start stamped at or
///   after the shift boundary never produces a negative duration.
///
/// All other event kinds are skipped. The result is always non-negative
/// and no sequence of events is an error.
///
/// # Example
///
/// ```
/// use oee_engine::calculation::compute_downtime;
/// use oee_engine::models::{EventKind, MachineEvent, Shift};
/// use chrono::NaiveDateTime;
///
/// let parse = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let shift = Shift {
///     id: 1,
///     name: "Morning".to_string(),
///     start_time: parse("2025-11-03 08:00:00"),
///     end_time: parse("2025-11-03 16:00:00"),
/// };
/// let events = vec![
///     MachineEvent {
///         shift_id: 1,
///         timestamp: parse("2025-11-03 09:00:00"),
///         kind: EventKind::FailureStart,
///         details: None,
///     },
///     MachineEvent {
///         shift_id: 1,
///         timestamp: parse("2025-11-03 09:10:00"),
///         kind: EventKind::FailureEnd,
///         details: None,
///     },
/// ];
/// assert_eq!(compute_downtime(&shift, &events), 600.0);
/// ```
pub fn compute_downtime(shift: &Shift, events: &[MachineEvent]) -> f64 {
    let mut ordered: Vec<&MachineEvent> =
        events.iter().filter(|e| e.shift_id == shift.id).collect();
    ordered.sort_by_key(|e| e.timestamp);

    let mut downtime_secs = 0.0;
    let mut failure_start: Option<NaiveDateTime> = None;

    for event in ordered {
        match event.kind {
            EventKind::FailureStart => {
                if failure_start.is_none() {
                    failure_start = Some(event.timestamp);
                }
            }
            EventKind::FailureEnd => {
                if let Some(started) = failure_start.take() {
                    downtime_secs += seconds_between(started, event.timestamp);
                }
            }
            _ => {}
        }
    }

    // Shift ended while still in failure: close the interval at the
    // boundary. The clamp covers a start stamped past the shift end.
    if let Some(started) = failure_start {
        downtime_secs += seconds_between(started, shift.end_time).max(0.0);
    }

    downtime_secs
}

fn seconds_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}
