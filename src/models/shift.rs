//! Shift model.
//!
//! This module defines the Shift struct representing a planned work shift
//! on the production line. Shifts are created externally (seeded into the
//! store); the engine only reads them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Represents a planned work shift on the production line.
///
/// The shift window `[start_time, end_time]` is the planned time used for
/// all OEE metrics of that shift. A valid shift always has
/// `end_time > start_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: i64,
    /// Human-readable shift name (e.g., "Morning").
    pub name: String,
    /// The start of the planned window.
    pub start_time: NaiveDateTime,
    /// The end of the planned window.
    pub end_time: NaiveDateTime,
}

impl Shift {
    /// Returns the planned duration of the shift in seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use oee_engine::models::Shift;
    /// use chrono::NaiveDateTime;
    ///
    /// let shift = Shift {
    ///     id: 1,
    ///     name: "Morning".to_string(),
    ///     start_time: NaiveDateTime::parse_from_str("2025-11-03 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end_time: NaiveDateTime::parse_from_str("2025-11-03 16:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    /// };
    /// assert_eq!(shift.planned_seconds(), 28800.0);
    /// ```
    pub fn planned_seconds(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_8_hour_shift_planned_seconds() {
        let shift = Shift {
            id: 1,
            name: "Morning".to_string(),
            start_time: make_datetime("2025-11-03", "08:00:00"),
            end_time: make_datetime("2025-11-03", "16:00:00"),
        };

        assert_eq!(shift.planned_seconds(), 28800.0);
    }

    #[test]
    fn test_overnight_shift_planned_seconds() {
        let shift = Shift {
            id: 3,
            name: "Night".to_string(),
            start_time: make_datetime("2025-11-03", "22:00:00"),
            end_time: make_datetime("2025-11-04", "06:00:00"),
        };

        assert_eq!(shift.planned_seconds(), 28800.0);
    }

    #[test]
    fn test_shift_serialization_round_trip() {
        let shift = Shift {
            id: 2,
            name: "Afternoon".to_string(),
            start_time: make_datetime("2025-11-03", "16:00:00"),
            end_time: make_datetime("2025-11-04", "00:00:00"),
        };

        let json = serde_json::to_string(&shift).unwrap();
        let deserialized: Shift = serde_json::from_str(&json).unwrap();
        assert_eq!(shift, deserialized);
    }

    #[test]
    fn test_shift_deserialization() {
        let json = r#"{
            "id": 1,
            "name": "Morning",
            "start_time": "2025-11-03T08:00:00",
            "end_time": "2025-11-03T16:00:00"
        }"#;

        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.id, 1);
        assert_eq!(shift.name, "Morning");
        assert_eq!(shift.planned_seconds(), 28800.0);
    }
}
