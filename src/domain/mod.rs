// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits describing the bouncing
// square world:
//
//   params.rs     — physical parameters and initial conditions
//   trajectory.rs — a recorded coordinate sequence and the
//                   labelled dataset sample wrapping it
//   frame.rs      — a 1-bit raster of the box at one instant
//   error.rs      — validation errors for all of the above
//   traits.rs     — seams other layers implement
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O
//   - Only plain data, validation and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

pub mod error;
pub mod frame;
pub mod params;
pub mod traits;
pub mod trajectory;
