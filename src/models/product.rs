//! Product catalog model.

use serde::{Deserialize, Serialize};

/// A product manufactured on the line.
///
/// The ideal cycle time is the theoretical minimum time to produce one
/// unit of the product, and is the reference for the performance factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product.
    pub id: i64,
    /// Human-readable product name (e.g., "0.5L still water").
    pub name: String,
    /// Theoretical minimum seconds to produce one unit. Always positive.
    pub ideal_cycle_secs: f64,
}
