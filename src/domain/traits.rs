// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Programming against these traits keeps the data pipeline
// independent of the concrete physics engine and storage:
//
//   - BoxWorld implements Simulator
//     (a different integrator or a 3-D box could too)
//   - DatasetStore implements SampleSink
//     (tests use an in-memory Vec instead)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::params::{BodyState, PhysicsParams};
use crate::domain::trajectory::{Split, TrajectorySample};

// ─── Simulator ────────────────────────────────────────────────────────────────
/// Anything that can advance the square by one fixed time step.
///
/// Callers validate `params` and guarantee `dt > 0`; the step
/// itself never fails.
pub trait Simulator {
    fn step(&self, state: BodyState, params: &PhysicsParams, dt: f64) -> BodyState;
}

// ─── SampleSink ───────────────────────────────────────────────────────────────
/// Any destination a finished split can be written to.
pub trait SampleSink {
    fn write_split(&self, split: Split, samples: &[TrajectorySample]) -> Result<()>;
}

/// In-memory sink, mostly for tests and dry runs.
impl SampleSink for std::cell::RefCell<Vec<TrajectorySample>> {
    fn write_split(&self, _split: Split, samples: &[TrajectorySample]) -> Result<()> {
        self.borrow_mut().extend_from_slice(samples);
        Ok(())
    }
}
