// ============================================================
// Layer 4 — Trajectory Batcher
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<TrajectorySample>
// into tensors for next-step prediction.
//
// For a batch of N samples with T recorded positions each:
//
//   inputs   [N, T-1, 2]   positions 0 .. T-2
//   targets  [N, T-1, 2]   positions 1 .. T-1   (shifted by one)
//   gravity      [N]       the physics that generated each row,
//   restitution  [N]       kept as labels for probing / analysis
//
// Coordinates are divided by the box size so every value lies
// in [0, 1] (noisy samples may stray slightly outside).
//
// Unequal lengths are truncated to the shortest sample in the
// batch. Callers guarantee at least two positions per sample.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::domain::trajectory::TrajectorySample;
use crate::sim::world::{BOX_HEIGHT, BOX_WIDTH};

// ─── TrajectoryBatch ──────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct TrajectoryBatch<B: Backend> {
    /// Normalised positions 0..T-1 — shape: [batch, steps, 2]
    pub inputs: Tensor<B, 3>,

    /// Normalised positions 1..T — shape: [batch, steps, 2]
    pub targets: Tensor<B, 3>,

    /// Gravity per sample — shape: [batch]
    pub gravity: Tensor<B, 1>,

    /// Restitution per sample — shape: [batch]
    pub restitution: Tensor<B, 1>,
}

// ─── TrajectoryBatcher ────────────────────────────────────────────────────────
/// Stateless: the target device is passed in by the DataLoader.
#[derive(Clone, Debug, Default)]
pub struct TrajectoryBatcher;

impl<B: Backend> Batcher<B, TrajectorySample, TrajectoryBatch<B>> for TrajectoryBatcher {
    fn batch(&self, items: Vec<TrajectorySample>, device: &B::Device) -> TrajectoryBatch<B> {
        let batch_size = items.len();
        let seq_len    = items
            .iter()
            .map(|s| s.trajectory.len())
            .min()
            .unwrap_or(0);
        let steps      = seq_len.saturating_sub(1);

        // ── Flatten positions ─────────────────────────────────────────────────
        // Row-major [sample][step][axis], normalised by the box size.
        let mut inputs  = Vec::with_capacity(batch_size * steps * 2);
        let mut targets = Vec::with_capacity(batch_size * steps * 2);

        for s in &items {
            let pos = &s.trajectory.positions[..seq_len];
            for t in 0..steps {
                inputs.push((pos[t][0] / BOX_WIDTH) as f32);
                inputs.push((pos[t][1] / BOX_HEIGHT) as f32);
                targets.push((pos[t + 1][0] / BOX_WIDTH) as f32);
                targets.push((pos[t + 1][1] / BOX_HEIGHT) as f32);
            }
        }

        let gravity: Vec<f32> = items
            .iter()
            .map(|s| s.trajectory.params.gravity as f32)
            .collect();
        let restitution: Vec<f32> = items
            .iter()
            .map(|s| s.trajectory.params.restitution as f32)
            .collect();

        // ── Create tensors ────────────────────────────────────────────────────
        TrajectoryBatch {
            inputs: Tensor::<B, 3>::from_data(
                TensorData::new(inputs, [batch_size, steps, 2]),
                device,
            ),
            targets: Tensor::<B, 3>::from_data(
                TensorData::new(targets, [batch_size, steps, 2]),
                device,
            ),
            gravity: Tensor::<B, 1>::from_data(TensorData::new(gravity, [batch_size]), device),
            restitution: Tensor::<B, 1>::from_data(
                TensorData::new(restitution, [batch_size]),
                device,
            ),
        }
    }
}
