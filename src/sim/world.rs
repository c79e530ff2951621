// ============================================================
// Layer 5 — BoxWorld (fixed-step physics)
// ============================================================
// The square lives inside four static walls. Each wall is a
// line segment with a collision radius of 1 unit, so the body
// touches a wall once its centre is within
//
//     WALL_RADIUS + half_extent
//
// of the wall line. That gives the contact-free interior
//
//     x ∈ [1.5, 14.5],  y ∈ [1.5, 14.5]
//
// for the default 1-unit square in a 16×16 box.
//
// One substep, in Chipmunk's order:
//   1. integrate position with the incoming velocity   p += v·dt
//   2. project the position back into the interior
//   3. integrate gravity into velocity                 v.y -= g·dt
//   4. resolve wall contacts at the NEW position: for each axis
//      where the body touches a wall AND moves into it, reflect
//      the normal velocity and scale it by e = restitution²
//
// There is no friction, so contacts never change the tangential
// velocity and the body never spins.
//
// A body falling from rest therefore covers g·dt²·n(n-1)/2
// after n substeps, not g·dt²·n(n+1)/2.
//
// Reference: Chipmunk2D cpSpaceStep (positions, then collision
//            detection, then velocities and contact impulses)

use crate::domain::error::ParamError;
use crate::domain::params::{BodyState, PhysicsParams, Point};
use crate::domain::traits::Simulator;

/// Box width in physics units (equals the image width in pixels).
pub const BOX_WIDTH: f64 = 16.0;
/// Box height in physics units (equals the image height in pixels).
pub const BOX_HEIGHT: f64 = 16.0;
/// The square's side is `SHAPE_SIDE_LENGTH + 1` units / pixels.
pub const SHAPE_SIDE_LENGTH: f64 = 0.0;
/// Collision radius of each wall segment.
pub const WALL_RADIUS: f64 = 1.0;
/// Physics substeps per simulated second.
pub const PHYSICS_HZ: f64 = 60.0;
/// Duration of one substep.
pub const SUBSTEP: f64 = 1.0 / PHYSICS_HZ;

// ─── BoxWorld ─────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxWorld {
    width:       f64,
    height:      f64,
    half_extent: f64,
    wall_radius: f64,
}

impl Default for BoxWorld {
    fn default() -> Self {
        Self {
            width:       BOX_WIDTH,
            height:      BOX_HEIGHT,
            half_extent: (SHAPE_SIDE_LENGTH + 1.0) / 2.0,
            wall_radius: WALL_RADIUS,
        }
    }
}

impl BoxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowest centre coordinate on each axis that is not in contact.
    pub fn interior_min(&self) -> Point {
        let inset = self.wall_radius + self.half_extent;
        [inset, inset]
    }

    /// Highest centre coordinate on each axis that is not in contact.
    pub fn interior_max(&self) -> Point {
        let inset = self.wall_radius + self.half_extent;
        [self.width - inset, self.height - inset]
    }

    pub fn in_interior(&self, p: Point) -> bool {
        let (lo, hi) = (self.interior_min(), self.interior_max());
        (0..2).all(|axis| lo[axis] <= p[axis] && p[axis] <= hi[axis])
    }
}

impl Simulator for BoxWorld {
    fn step(&self, state: BodyState, params: &PhysicsParams, dt: f64) -> BodyState {
        debug_assert!(dt > 0.0, "substep must be positive");

        let lo = self.interior_min();
        let hi = self.interior_max();
        let e  = params.contact_elasticity();

        // ── 1 + 2. Integrate with the incoming velocity, then project ────────
        let p        = state.position;
        let mut v    = state.velocity;
        let mut next = [p[0] + v[0] * dt, p[1] + v[1] * dt];
        for axis in 0..2 {
            next[axis] = next[axis].clamp(lo[axis], hi[axis]);
        }

        // ── 3. Gravity ────────────────────────────────────────────────────────
        v[1] -= params.gravity * dt;

        // ── 4. Wall contacts at the new position ──────────────────────────────
        // Only bounce when moving INTO the wall. A body that is already
        // separating keeps its velocity even while touching.
        for axis in 0..2 {
            let into_low  = next[axis] <= lo[axis] && v[axis] < 0.0;
            let into_high = next[axis] >= hi[axis] && v[axis] > 0.0;
            if into_low || into_high {
                v[axis] = -e * v[axis];
            }
        }

        BodyState { position: next, velocity: v }
    }
}

/// Validate inputs, then advance `state` by one step of `dt` seconds.
pub fn simulate_motion(
    world:  &impl Simulator,
    state:  BodyState,
    params: &PhysicsParams,
    dt:     f64,
) -> Result<BodyState, ParamError> {
    if !(dt > 0.0 && dt.is_finite()) {
        return Err(ParamError::TimeStep(dt));
    }
    params.validate()?;
    Ok(world.step(state, params, dt))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(gravity: f64, restitution: f64) -> PhysicsParams {
        PhysicsParams::new(gravity, restitution).unwrap()
    }

    #[test]
    fn test_interior_bounds() {
        let w = BoxWorld::new();
        assert_eq!(w.interior_min(), [1.5, 1.5]);
        assert_eq!(w.interior_max(), [14.5, 14.5]);
    }

    #[test]
    fn test_free_flight_conserves_speed_without_gravity() {
        let w     = BoxWorld::new();
        let p     = params(0.0, 0.8);
        let start = BodyState { position: [8.0, 8.0], velocity: [1.0, -0.5] };

        let mut s = start;
        for _ in 0..60 {
            s = w.step(s, &p, SUBSTEP);
        }
        assert_eq!(s.velocity, start.velocity);
        assert!((s.position[0] - 9.0).abs() < 1e-9);
        assert!((s.position[1] - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let w  = BoxWorld::new();
        let p  = params(6.0, 1.0);
        let s1 = w.step(BodyState { position: [8.0, 8.0], velocity: [0.0, 0.0] }, &p, SUBSTEP);
        // the first substep moves with the incoming (zero) velocity
        assert_eq!(s1.position, [8.0, 8.0]);
        assert!((s1.velocity[1] + 0.1).abs() < 1e-12);

        let s2 = w.step(s1, &p, SUBSTEP);
        assert!(s2.position[1] < 8.0);
    }

    #[test]
    fn test_free_fall_from_rest_matches_closed_form() {
        let w   = BoxWorld::new();
        let g   = 10.0;
        let p   = params(g, 1.0);
        let mut s = BodyState { position: [8.0, 12.0], velocity: [0.0, 0.0] };
        for n in 1..=30 {
            s = w.step(s, &p, SUBSTEP);
            let nf       = n as f64;
            let expected = 12.0 - g * SUBSTEP * SUBSTEP * nf * (nf - 1.0) / 2.0;
            assert!(
                (s.position[1] - expected).abs() < 1e-9,
                "after {n} substeps y = {}, expected {expected}",
                s.position[1]
            );
        }
        assert!((s.position[1] - 10.791_666_666_666_666).abs() < 1e-9);
    }

    #[test]
    fn test_bounce_scales_by_restitution_squared() {
        let w = BoxWorld::new();
        // touching the right wall, moving right
        let s = w.step(
            BodyState { position: [14.5, 8.0], velocity: [4.0, 0.0] },
            &params(0.0, 0.5),
            SUBSTEP,
        );
        assert!((s.velocity[0] + 1.0).abs() < 1e-12);
        assert_eq!(s.position[0], 14.5);

        // the reflected velocity carries it off the wall on the next substep
        let s = w.step(s, &params(0.0, 0.5), SUBSTEP);
        assert!(s.position[0] < 14.5);
    }

    #[test]
    fn test_no_bounce_when_separating() {
        let w = BoxWorld::new();
        let s = w.step(
            BodyState { position: [1.5, 8.0], velocity: [2.0, 0.0] },
            &params(0.0, 0.5),
            SUBSTEP,
        );
        assert_eq!(s.velocity[0], 2.0);
    }

    #[test]
    fn test_outside_start_is_projected_inward() {
        let w = BoxWorld::new();
        let s = w.step(
            BodyState { position: [0.0, 16.0], velocity: [0.0, 0.0] },
            &params(0.0, 1.0),
            SUBSTEP,
        );
        assert!(w.in_interior(s.position));
    }

    #[test]
    fn test_simulate_motion_rejects_bad_dt() {
        let w     = BoxWorld::new();
        let state = BodyState { position: [8.0, 8.0], velocity: [0.0, 0.0] };
        let p     = params(9.8, 0.9);
        assert_eq!(simulate_motion(&w, state, &p, 0.0), Err(ParamError::TimeStep(0.0)));
        assert!(simulate_motion(&w, state, &p, -1.0).is_err());
        assert!(simulate_motion(&w, state, &p, f64::NAN).is_err());
        assert!(simulate_motion(&w, state, &p, SUBSTEP).is_ok());
    }

    proptest! {
        #[test]
        fn prop_position_stays_inside_box(
            x in -5.0f64..21.0,
            y in -5.0f64..21.0,
            vx in -50.0f64..50.0,
            vy in -50.0f64..50.0,
            g in 0.0f64..30.0,
            r in 0.0f64..=1.0,
        ) {
            let w = BoxWorld::new();
            let p = PhysicsParams { gravity: g, restitution: r };
            let mut s = BodyState { position: [x, y], velocity: [vx, vy] };
            for _ in 0..300 {
                s = w.step(s, &p, SUBSTEP);
                prop_assert!(w.in_interior(s.position));
            }
        }

        #[test]
        fn prop_bounce_never_gains_normal_speed(
            vx in 0.01f64..50.0,
            r in 0.0f64..=1.0,
        ) {
            let w = BoxWorld::new();
            let p = PhysicsParams { gravity: 0.0, restitution: r };
            let s = w.step(
                BodyState { position: [14.5, 8.0], velocity: [vx, 0.0] },
                &p,
                SUBSTEP,
            );
            prop_assert!(s.velocity[0].abs() <= vx);
        }
    }
}
