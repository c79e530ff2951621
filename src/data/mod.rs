// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from sampled parameters to tensor batches.
//
// The pipeline flows in this order:
//
//   SamplerConfig
//       │
//       ▼
//   sampler         → draws launch + physics uniformly
//       │
//       ▼
//   sequence        → runs BoxWorld, records positions/frames
//       │
//       ├──────────▶ episode   → groups K+1 launches per physics
//       ▼                         into an ICL prompt
//   noise           → optional N(0, σ²) coordinate jitter
//       │
//       ▼
//   splitter        → shuffled train / validation split
//       │
//       ▼
//   TrajectoryDataset  → implements Burn's Dataset trait
//       │
//       ▼
//   TrajectoryBatcher  → [N, T-1, 2] input/target tensors
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Simulates one trajectory from explicit initial conditions
pub mod sequence;

/// Uniform parameter ranges and random trajectories
pub mod sampler;

/// Gaussian perturbation of recorded coordinates
pub mod noise;

/// Shuffles and splits data into train/validation sets
pub mod splitter;

/// Builds in-context-learning prompts sharing one physics
pub mod episode;

/// Implements Burn's Dataset trait for trajectory samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
