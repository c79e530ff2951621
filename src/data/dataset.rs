use burn::data::dataset::Dataset;

use crate::domain::trajectory::TrajectorySample;

/// In-memory dataset of trajectory samples for Burn's DataLoader.
pub struct TrajectoryDataset {
    samples: Vec<TrajectorySample>,
}

impl TrajectoryDataset {
    pub fn new(samples: Vec<TrajectorySample>) -> Self { Self { samples } }

    /// Shortest recorded sequence, or 0 for an empty dataset.
    pub fn min_sequence_len(&self) -> usize {
        self.samples.iter().map(|s| s.trajectory.len()).min().unwrap_or(0)
    }
}

impl Dataset<TrajectorySample> for TrajectoryDataset {
    fn get(&self, index: usize) -> Option<TrajectorySample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
