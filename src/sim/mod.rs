// ============================================================
// Layer 5 — Simulation Layer
// ============================================================
// The only layer that knows any physics or pixel geometry.
//
//   world.rs  — BoxWorld: a unit square of mass 1 bouncing
//               inside a walled 16×16 box under gravity.
//               One call = one fixed 1/60 s substep.
//
//   raster.rs — turns a physics-space position into a 16×16
//               black-and-white Frame (y flipped to image rows).
//
// Nothing here allocates per substep, so generating tens of
// thousands of trajectories stays cheap on one core.
//
// Reference: Rust Book §3 (Common Programming Concepts)

/// Fixed-step rigid-body world with four elastic walls
pub mod world;

/// Physics position → 1-bit frame
pub mod raster;
