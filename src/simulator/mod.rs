//! Synthetic bottling-line simulator.
//!
//! Feeds the store with the traffic a real line would produce: one
//! production cycle per configured interval, occasional injected
//! failures bracketed by FAILURE_START/FAILURE_END events, and a
//! RUN_START marker when the simulator comes up. The loop runs until the
//! caller flips the shutdown signal, and every knob of the random
//! process (cycle delay, reject and failure probabilities, repair time,
//! seed) comes from [`SimulatorConfig`], so test runs are reproducible.

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{Duration, sleep};
use tracing::{info, warn};

use crate::config::SimulatorConfig;
use crate::error::EngineResult;
use crate::models::{EventKind, MachineEvent, ProductionCycle};
use crate::store::LineStore;

/// Minimal xorshift64* generator.
///
/// Enough randomness for injecting failures and rejects, while keeping
/// the simulator free of extra dependencies and fully reproducible from
/// its seed.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        // xorshift state must never be zero.
        Self {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform sample in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Runs the line simulator until `shutdown` turns true (or its sender is
/// dropped).
///
/// Each loop iteration may inject a failure (probability
/// `failure_probability`), then records one produced unit (a reject with
/// probability `reject_probability`) and sleeps for `cycle_secs`. The
/// shutdown signal is also observed during sleeps, so stopping is prompt
/// even with long cycle or repair times; a shutdown during a simulated
/// repair leaves the failure interval open, exactly like a real shift
/// ending mid-breakdown.
///
/// Store failures end the simulation and are returned to the caller.
pub async fn run_simulator(
    store: LineStore,
    config: SimulatorConfig,
    mut shutdown: watch::Receiver<bool>,
) -> EngineResult<()> {
    let mut rng = XorShift64::new(config.seed);

    info!(
        shift_id = config.shift_id,
        product_id = config.product_id,
        "Simulator started"
    );
    record_event(
        &store,
        &config,
        EventKind::RunStart,
        Some("simulator started"),
    )?;

    loop {
        if rng.next_f64() < config.failure_probability {
            warn!(shift_id = config.shift_id, "Injecting line failure");
            record_event(&store, &config, EventKind::FailureStart, Some("line failure"))?;

            if wait_or_stopped(config.repair_secs, &mut shutdown).await {
                break;
            }

            record_event(
                &store,
                &config,
                EventKind::FailureEnd,
                Some("line failure repaired"),
            )?;
            info!(shift_id = config.shift_id, "Line recovered");
        }

        let is_good = rng.next_f64() >= config.reject_probability;
        store.insert_cycle(&ProductionCycle {
            shift_id: config.shift_id,
            timestamp: Utc::now().naive_utc(),
            product_id: config.product_id,
            is_good,
            actual_cycle_secs: config.cycle_secs,
        })?;

        if wait_or_stopped(config.cycle_secs, &mut shutdown).await {
            break;
        }
    }

    info!(shift_id = config.shift_id, "Simulator stopped");
    Ok(())
}

fn record_event(
    store: &LineStore,
    config: &SimulatorConfig,
    kind: EventKind,
    details: Option<&str>,
) -> EngineResult<()> {
    store.insert_event(&MachineEvent {
        shift_id: config.shift_id,
        timestamp: Utc::now().naive_utc(),
        kind,
        details: details.map(str::to_string),
    })
}

/// Sleeps for `secs`, returning early with `true` when the shutdown
/// signal fires (a dropped sender counts as shutdown).
async fn wait_or_stopped(secs: f64, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return true;
    }
    tokio::select! {
        _ = sleep(Duration::from_secs_f64(secs.max(0.0))) => false,
        changed = shutdown.changed() => match changed {
            Ok(()) => *shutdown.borrow(),
            Err(_) => true,
        },
    }
}
