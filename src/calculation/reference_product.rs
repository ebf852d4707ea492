//! Reference product selection and ideal cycle time lookup.
//!
//! A shift may produce several products; the performance factor needs one
//! ideal cycle time as its reference. This module picks the shift's
//! reference product and resolves its ideal cycle time from the catalog.

use std::collections::HashMap;

use crate::models::{Product, ProductionCycle};

/// Ideal cycle time assumed when the reference product is missing from the
/// catalog, in seconds.
pub const DEFAULT_IDEAL_CYCLE_SECS: f64 = 30.0;

/// Selects the reference product of a shift: the product identifier that
/// occurs most often among the shift's production cycles.
///
/// Cycles belonging to other shifts are filtered out first. When two or
/// more products are equally frequent, the one whose first cycle (in
/// timestamp order) is earliest wins, so the choice is deterministic
/// regardless of how the caller ordered the records. Returns `None` when
/// the shift has no cycles.
///
/// # Example
///
/// ```
/// use oee_engine::calculation::select_reference_product;
/// use oee_engine::models::ProductionCycle;
/// use chrono::NaiveDateTime;
///
/// let parse = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let cycles = vec![
///     ProductionCycle { shift_id: 1, timestamp: parse("2025-11-03 09:00:00"), product_id: 2, is_good: true, actual_cycle_secs: 5.0 },
///     ProductionCycle { shift_id: 1, timestamp: parse("2025-11-03 09:01:00"), product_id: 1, is_good: true, actual_cycle_secs: 5.0 },
///     ProductionCycle { shift_id: 1, timestamp: parse("2025-11-03 09:02:00"), product_id: 1, is_good: true, actual_cycle_secs: 5.0 },
/// ];
/// assert_eq!(select_reference_product(1, &cycles), Some(1));
/// ```
pub fn select_reference_product(shift_id: i64, cycles: &[ProductionCycle]) -> Option<i64> {
    let mut ordered: Vec<&ProductionCycle> =
        cycles.iter().filter(|c| c.shift_id == shift_id).collect();
    ordered.sort_by_key(|c| c.timestamp);

    // (count, first position in timestamp order) per product.
    let mut occurrences: HashMap<i64, (usize, usize)> = HashMap::new();
    for (position, cycle) in ordered.iter().enumerate() {
        let entry = occurrences.entry(cycle.product_id).or_insert((0, position));
        entry.0 += 1;
    }

    occurrences
        .into_iter()
        .min_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_b.cmp(count_a).then(first_a.cmp(first_b))
        })
        .map(|(product_id, _)| product_id)
}

/// Resolves the ideal cycle time for a product from the catalog.
///
/// An identifier absent from the catalog falls back to
/// [`DEFAULT_IDEAL_CYCLE_SECS`] instead of failing, so a missing catalog
/// row degrades the metric rather than aborting the computation.
pub fn ideal_cycle_for(product_id: i64, products: &[Product]) -> f64 {
    products
        .iter()
        .find(|p| p.id == product_id)
        .map(|p| p.ideal_cycle_secs)
        .unwrap_or(DEFAULT_IDEAL_CYCLE_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn cycle(timestamp: &str, product_id: i64) -> ProductionCycle {
        ProductionCycle {
            shift_id: 1,
            timestamp: make_datetime(timestamp),
            product_id,
            is_good: true,
            actual_cycle_secs: 5.0,
        }
    }

    /// RP-001: empty input has no reference product
    #[test]
    fn test_empty_cycles_no_reference() {
        assert_eq!(select_reference_product(1, &[]), None);
    }

    /// RP-002: clear majority wins
    #[test]
    fn test_majority_product_selected() {
        let cycles = vec![
            cycle("2025-11-03 09:00:00", 2),
            cycle("2025-11-03 09:01:00", 1),
            cycle("2025-11-03 09:02:00", 1),
            cycle("2025-11-03 09:03:00", 1),
            cycle("2025-11-03 09:04:00", 2),
        ];

        assert_eq!(select_reference_product(1, &cycles), Some(1));
    }

    /// RP-003: tie goes to the product seen first in timestamp order
    #[test]
    fn test_tie_broken_by_first_occurrence() {
        let cycles = vec![
            cycle("2025-11-03 09:00:00", 2),
            cycle("2025-11-03 09:01:00", 1),
            cycle("2025-11-03 09:02:00", 2),
            cycle("2025-11-03 09:03:00", 1),
        ];

        assert_eq!(select_reference_product(1, &cycles), Some(2));
    }

    /// RP-004: tie-break uses timestamp order, not input order
    #[test]
    fn test_tie_break_independent_of_input_order() {
        let mut cycles = vec![
            cycle("2025-11-03 09:00:00", 2),
            cycle("2025-11-03 09:01:00", 1),
            cycle("2025-11-03 09:02:00", 2),
            cycle("2025-11-03 09:03:00", 1),
        ];
        cycles.reverse();

        assert_eq!(select_reference_product(1, &cycles), Some(2));
    }

    /// RP-005: catalog hit resolves the product's ideal cycle
    #[test]
    fn test_ideal_cycle_from_catalog() {
        let products = vec![
            Product {
                id: 1,
                name: "0.5L still water".to_string(),
                ideal_cycle_secs: 50.0,
            },
            Product {
                id: 2,
                name: "1.5L still water".to_string(),
                ideal_cycle_secs: 65.0,
            },
        ];

        assert_eq!(ideal_cycle_for(2, &products), 65.0);
    }

    /// RP-006: catalog miss falls back to the default
    #[test]
    fn test_ideal_cycle_fallback() {
        let products = vec![Product {
            id: 1,
            name: "0.5L still water".to_string(),
            ideal_cycle_secs: 50.0,
        }];

        assert_eq!(ideal_cycle_for(99, &products), DEFAULT_IDEAL_CYCLE_SECS);
    }

    #[test]
    fn test_ideal_cycle_fallback_on_empty_catalog() {
        assert_eq!(ideal_cycle_for(1, &[]), DEFAULT_IDEAL_CYCLE_SECS);
    }
}
