// ============================================================
// Layer 4 — Random Parameter Sampler
// ============================================================
// Draws every free quantity of a trajectory uniformly from its
// configured range:
//
//   initial speed       [0, 10]      units/s
//   launch direction    [0, 2π]      radians
//   start x, start y    [0, 16]      (projected into the box
//                                     interior on the first step)
//   gravity             [5, 10]      units/s²
//   restitution         [0.5, 1]
//
// Out-of-distribution (OOD) configs keep the initial-condition
// ranges but swap in gravity / restitution ranges that share no
// values with the training ranges, so a model evaluated on them
// sees physics it was never trained on.
//
// All sampling goes through a caller-provided Rng so a seeded
// StdRng reproduces an entire dataset bit for bit.
//
// Reference: rand crate documentation (Rng::gen_range)

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::domain::error::ParamError;
use crate::domain::params::{InitialConditions, ParamRange, PhysicsParams};
use crate::domain::traits::Simulator;
use crate::domain::trajectory::Trajectory;
use crate::data::sequence::{generate_sequence, SequenceOptions};

// ─── SamplerConfig ────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub sequence_length: usize,
    pub frame_rate:      usize,
    pub speed:           ParamRange,
    pub direction:       ParamRange,
    pub position_x:      ParamRange,
    pub position_y:      ParamRange,
    pub gravity:         ParamRange,
    pub restitution:     ParamRange,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sequence_length: 10,
            frame_rate:      30,
            speed:           ParamRange { min: 0.0, max: 10.0 },
            direction:       ParamRange { min: 0.0, max: TAU },
            position_x:      ParamRange { min: 0.0, max: 16.0 },
            position_y:      ParamRange { min: 0.0, max: 16.0 },
            gravity:         ParamRange { min: 5.0, max: 10.0 },
            restitution:     ParamRange { min: 0.5, max: 1.0 },
        }
    }
}

impl SamplerConfig {
    /// Check every range, plus the two counts.
    /// Datasets are used for next-step prediction, so at least two
    /// recorded positions are required.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.sequence_length < 2 {
            return Err(ParamError::TooFew {
                name:  "sequence_length",
                value: self.sequence_length,
                min:   2,
            });
        }
        if self.frame_rate == 0 {
            return Err(ParamError::TooFew { name: "frame_rate", value: 0, min: 1 });
        }

        self.speed.validate("speed")?;
        self.direction.validate("direction")?;
        self.position_x.validate("position_x")?;
        self.position_y.validate("position_y")?;
        self.gravity.validate("gravity")?;
        self.restitution.validate("restitution")?;

        if self.speed.min < 0.0 {
            return Err(ParamError::OutOfBounds {
                name:     "speed",
                value:    self.speed.min,
                expected: "[0, ∞)",
            });
        }
        for bound in [self.restitution.min, self.restitution.max] {
            if !(0.0..=1.0).contains(&bound) {
                return Err(ParamError::OutOfBounds {
                    name:     "restitution",
                    value:    bound,
                    expected: "[0, 1]",
                });
            }
        }
        Ok(())
    }

    /// A copy of this config with physics drawn from disjoint ranges.
    ///
    /// `None` keeps the training range for that parameter, but at
    /// least one of the two must be replaced.
    pub fn out_of_distribution(
        &self,
        gravity:     Option<ParamRange>,
        restitution: Option<ParamRange>,
    ) -> Result<SamplerConfig, ParamError> {
        if gravity.is_none() && restitution.is_none() {
            return Err(ParamError::NoOodRange);
        }

        let mut ood = self.clone();
        if let Some(g) = gravity {
            g.validate("ood gravity")?;
            if g.overlaps(&self.gravity) {
                return Err(ParamError::OverlappingOod {
                    name:  "gravity",
                    ood:   g.to_string(),
                    train: self.gravity.to_string(),
                });
            }
            ood.gravity = g;
        }
        if let Some(r) = restitution {
            r.validate("ood restitution")?;
            if r.overlaps(&self.restitution) {
                return Err(ParamError::OverlappingOod {
                    name:  "restitution",
                    ood:   r.to_string(),
                    train: self.restitution.to_string(),
                });
            }
            ood.restitution = r;
        }

        ood.validate()?;
        Ok(ood)
    }

    pub fn sequence_options(&self, render: bool) -> SequenceOptions {
        SequenceOptions {
            sequence_length: self.sequence_length,
            frame_rate:      self.frame_rate,
            render,
        }
    }

    pub fn sample_initial<R: Rng + ?Sized>(&self, rng: &mut R) -> InitialConditions {
        InitialConditions {
            speed:     sample(&self.speed, rng),
            direction: sample(&self.direction, rng),
            position:  [sample(&self.position_x, rng), sample(&self.position_y, rng)],
        }
    }

    pub fn sample_params<R: Rng + ?Sized>(&self, rng: &mut R) -> PhysicsParams {
        PhysicsParams {
            gravity:     sample(&self.gravity, rng),
            restitution: sample(&self.restitution, rng),
        }
    }
}

/// Uniform draw from a closed range; a pinned range returns its value.
pub fn sample<R: Rng + ?Sized>(range: &ParamRange, rng: &mut R) -> f64 {
    if range.min == range.max {
        return range.min;
    }
    rng.gen_range(range.min..=range.max)
}

/// Sample fresh initial conditions and physics, then simulate.
pub fn generate_random_sequence<R: Rng + ?Sized>(
    world:  &impl Simulator,
    cfg:    &SamplerConfig,
    render: bool,
    rng:    &mut R,
) -> Result<Trajectory, ParamError> {
    let initial = cfg.sample_initial(rng);
    let params  = cfg.sample_params(rng);
    generate_sequence(world, &initial, params, cfg.sequence_options(render))
}
