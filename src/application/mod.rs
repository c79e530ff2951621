// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// one user-facing goal each.
//
// Rules for this layer:
//   - No physics or tensor math here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Build a train / val / OOD trajectory dataset
pub mod generate_use_case;

// Build in-context-learning episodes
pub mod episode_use_case;

// Batch a generated split through Burn and summarise it
pub mod inspect_use_case;

// Simulate and draw a single trajectory
pub mod preview_use_case;
