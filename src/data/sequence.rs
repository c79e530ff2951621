// ============================================================
// Layer 4 — Sequence Generator
// ============================================================
// Runs the simulator and records one position per frame.
//
//   launch state
//       │
//       ▼   frame_rate × step(dt = 1/60)
//   position 1  (+ frame 1 if rendering)
//       │
//       ▼   frame_rate × step(dt = 1/60)
//   position 2
//       ...
//
// With the default frame_rate of 30, consecutive recorded
// positions are half a simulated second apart.

use crate::domain::error::ParamError;
use crate::domain::params::{InitialConditions, PhysicsParams};
use crate::domain::traits::Simulator;
use crate::domain::trajectory::Trajectory;
use crate::sim::raster::draw_frame;
use crate::sim::world::{simulate_motion, SUBSTEP};

/// How long a sequence is and whether frames are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceOptions {
    /// Number of recorded frames.
    pub sequence_length: usize,
    /// Physics substeps between recorded frames.
    pub frame_rate:      usize,
    /// Also rasterise each recorded position.
    pub render:          bool,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            sequence_length: 10,
            frame_rate:      30,
            render:          false,
        }
    }
}

/// Simulate one trajectory from explicit initial conditions.
pub fn generate_sequence(
    world:   &impl Simulator,
    initial: &InitialConditions,
    params:  PhysicsParams,
    options: SequenceOptions,
) -> Result<Trajectory, ParamError> {
    initial.validate()?;
    params.validate()?;
    if options.sequence_length == 0 {
        return Err(ParamError::TooFew { name: "sequence_length", value: 0, min: 1 });
    }
    if options.frame_rate == 0 {
        return Err(ParamError::TooFew { name: "frame_rate", value: 0, min: 1 });
    }

    let mut state     = initial.body_state();
    let mut positions = Vec::with_capacity(options.sequence_length);
    let mut frames    = Vec::new();

    for _ in 0..options.sequence_length {
        for _ in 0..options.frame_rate {
            state = simulate_motion(world, state, &params, SUBSTEP)?;
        }
        positions.push(state.position);
        if options.render {
            frames.push(draw_frame(state.position));
        }
    }

    Ok(Trajectory {
        initial: *initial,
        params,
        frame_rate: options.frame_rate,
        positions,
        frames,
    })
}
