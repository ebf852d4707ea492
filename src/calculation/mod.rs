//! OEE calculation logic for the bottling line monitor.
//!
//! This module contains the computation core of the engine: the failure
//! interval reducer that turns FAILURE_START/FAILURE_END event pairs into
//! cumulative downtime, the reference-product selection with its ideal
//! cycle time lookup, and the OEE calculator that combines downtime with
//! production counts into the availability, performance and quality
//! factors and their product.
//!
//! Everything in here is a pure function over caller-supplied snapshots:
//! no I/O, no shared state, and no error paths. Malformed inputs degrade
//! to well-defined values instead of failing.

mod downtime;
mod oee;
mod reference_product;

pub use downtime::compute_downtime;
pub use oee::compute_metrics;
pub use reference_product::{
    DEFAULT_IDEAL_CYCLE_SECS, ideal_cycle_for, select_reference_product,
};
