// ============================================================
// Layer 3 — Physical Parameters and Initial Conditions
// ============================================================
// The two knobs that define a "physics" in this project are
// gravity strength and restitution (elasticity). Everything
// else — speed, launch direction, start position — is an
// initial condition that changes from trajectory to trajectory.
//
// Coordinates are physics space: x to the right, y UP, origin
// in the bottom-left corner of the 16×16 box.
//
// Reference: Rust Book §5 (Structs), §9 (Recoverable Errors)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{ensure_finite, ParamError};

/// An (x, y) pair in physics space.
pub type Point = [f64; 2];

// ─── PhysicsParams ────────────────────────────────────────────────────────────
/// Gravity and restitution shared by every substep of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Downward acceleration in units/s². Negative values pull up.
    pub gravity: f64,

    /// Elasticity of the square and of the walls, in [0, 1].
    pub restitution: f64,
}

impl PhysicsParams {
    pub fn new(gravity: f64, restitution: f64) -> Result<Self, ParamError> {
        let params = Self { gravity, restitution };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        ensure_finite("gravity", self.gravity)?;
        ensure_finite("restitution", self.restitution)?;
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ParamError::OutOfBounds {
                name:     "restitution",
                value:    self.restitution,
                expected: "[0, 1]",
            });
        }
        Ok(())
    }

    /// Elasticity of a body/wall contact.
    /// Both surfaces carry `restitution`, and a contact multiplies them.
    pub fn contact_elasticity(&self) -> f64 {
        self.restitution * self.restitution
    }
}

// ─── InitialConditions ────────────────────────────────────────────────────────
/// How a trajectory is launched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialConditions {
    pub speed:     f64,
    /// Launch angle in radians. 0 points right, π/2 points DOWN
    /// (image convention: velocity y is `-speed · sin θ`).
    pub direction: f64,
    pub position:  Point,
}

impl InitialConditions {
    pub fn validate(&self) -> Result<(), ParamError> {
        ensure_finite("speed", self.speed)?;
        ensure_finite("direction", self.direction)?;
        ensure_finite("position.x", self.position[0])?;
        ensure_finite("position.y", self.position[1])?;
        Ok(())
    }

    /// Decompose speed and direction into a velocity vector.
    pub fn velocity(&self) -> Point {
        [
            self.speed * self.direction.cos(),
            -self.speed * self.direction.sin(),
        ]
    }

    pub fn body_state(&self) -> BodyState {
        BodyState {
            position: self.position,
            velocity: self.velocity(),
        }
    }
}

/// Kinematic state of the square between substeps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Point,
    pub velocity: Point,
}

// ─── ParamRange ───────────────────────────────────────────────────────────────
/// A closed interval a parameter is sampled from uniformly.
/// `min == max` is allowed and pins the parameter to one value.
///
/// Parses from `"min..max"` or a single number, and prints back
/// in the same form, so it can be used directly as a CLI flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ParamError> {
        let range = Self { min, max };
        range.validate("range")?;
        Ok(range)
    }

    pub fn fixed(value: f64) -> Self {
        Self { min: value, max: value }
    }

    pub fn validate(&self, name: &'static str) -> Result<(), ParamError> {
        ensure_finite(name, self.min)?;
        ensure_finite(name, self.max)?;
        if self.min > self.max {
            return Err(ParamError::EmptyRange { name, min: self.min, max: self.max });
        }
        Ok(())
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// True when the two closed ranges share any value.
    /// Both ends are sampled inclusively, so touching ranges such as
    /// `5..10` and `10..15` overlap at 10.
    pub fn overlaps(&self, other: &ParamRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl fmt::Display for ParamRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

impl FromStr for ParamRange {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| ParamError::Parse(s.to_string()))
        };

        match s.split_once("..") {
            Some((lo, hi)) => ParamRange::new(parse(lo)?, parse(hi)?),
            None => {
                let value = parse(s)?;
                ensure_finite("range", value)?;
                Ok(ParamRange::fixed(value))
            }
        }
    }
}
