//! Production cycle model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Represents one unit produced by the line, good or rejected.
///
/// Each record is an immutable fact about one manufactured unit; the
/// engine never mutates or re-attributes cycles after they are recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCycle {
    /// The shift during which the unit was produced.
    pub shift_id: i64,
    /// When the unit finished its cycle.
    pub timestamp: NaiveDateTime,
    /// The product that was manufactured.
    pub product_id: i64,
    /// Whether the unit passed quality control.
    pub is_good: bool,
    /// The actual time the cycle took, in seconds.
    pub actual_cycle_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_serialization_round_trip() {
        let cycle = ProductionCycle {
            shift_id: 1,
            timestamp: NaiveDateTime::parse_from_str("2025-11-03 09:15:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            product_id: 1,
            is_good: false,
            actual_cycle_secs: 5.2,
        };

        let json = serde_json::to_string(&cycle).unwrap();
        let deserialized: ProductionCycle = serde_json::from_str(&json).unwrap();
        assert_eq!(cycle, deserialized);
    }
}
