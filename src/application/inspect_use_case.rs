// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Loads one split of a generated dataset and pushes it through
// the exact tensor pipeline a sequence model would consume:
//
//   split.jsonl → TrajectoryDataset → DataLoader(TrajectoryBatcher)
//
// and reports what came out: how many batches, tensor shapes,
// the physics ranges present and how far the square moves per
// recorded frame. Handy as a sanity check before training.
//
// Runs on Burn's NdArray (CPU) backend; no GPU needed.
//
// Reference: Burn Book §4 (DataLoader)

use anyhow::Result;
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    tensor::ElementConversion,
};
use std::{path::PathBuf, sync::Arc};

use crate::data::{
    batcher::{TrajectoryBatch, TrajectoryBatcher},
    dataset::TrajectoryDataset,
};
use crate::domain::{
    params::ParamRange,
    trajectory::{Split, TrajectorySample},
};
use crate::infra::dataset_store::DatasetStore;

type InspectBackend = burn::backend::NdArray;

/// What a split looks like once batched.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectSummary {
    pub split:   Split,
    pub samples: usize,
    /// Samples dropped for having fewer than two positions.
    pub skipped: usize,
    pub batches: usize,
    /// `[batch, steps, 2]` of the first batch.
    pub input_dims:  Option<[usize; 3]>,
    pub gravity:     Option<ParamRange>,
    pub restitution: Option<ParamRange>,
    /// Mean distance per recorded frame, in box units.
    pub mean_step_displacement: f64,
    /// Mean |target − input| over all batched tensor values
    /// (normalised coordinates).
    pub mean_abs_delta: f64,
}

pub struct InspectUseCase {
    dir: PathBuf,
}

impl InspectUseCase {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn execute(&self, split: Split, batch_size: usize) -> Result<InspectSummary> {
        if batch_size == 0 {
            anyhow::bail!("batch size must be at least 1");
        }

        let store = DatasetStore::open(&self.dir)?;
        if !store.has_split(split) {
            anyhow::bail!(
                "No '{}' split in '{}'",
                split.file_name(),
                store.dir().display()
            );
        }

        // ── Load and filter ───────────────────────────────────────────────────
        let all            = store.read_split(split)?;
        let total          = all.len();
        let samples: Vec<TrajectorySample> =
            all.into_iter().filter(|s| s.trajectory.len() >= 2).collect();
        let skipped        = total - samples.len();
        if skipped > 0 {
            tracing::warn!("Skipping {} samples with fewer than 2 positions", skipped);
        }
        tracing::info!("Loaded {} {} samples", samples.len(), split);

        let gravity     = span(samples.iter().map(|s| s.trajectory.params.gravity));
        let restitution = span(samples.iter().map(|s| s.trajectory.params.restitution));
        let steps: Vec<f64> = samples
            .iter()
            .flat_map(|s| s.trajectory.step_displacements())
            .collect();
        let mean_step_displacement = mean(&steps);

        let mut summary = InspectSummary {
            split,
            samples: samples.len(),
            skipped,
            batches: 0,
            input_dims: None,
            gravity,
            restitution,
            mean_step_displacement,
            mean_abs_delta: 0.0,
        };
        if samples.is_empty() {
            return Ok(summary);
        }

        // ── Batch through the DataLoader ──────────────────────────────────────
        let dataset = TrajectoryDataset::new(samples);
        tracing::debug!("Batches truncate to {} positions", dataset.min_sequence_len());
        let loader: Arc<dyn DataLoader<InspectBackend, TrajectoryBatch<InspectBackend>>> =
            DataLoaderBuilder::new(TrajectoryBatcher)
                .batch_size(batch_size)
                .num_workers(1)
                .build(dataset);

        let mut weighted_delta = 0.0f64;
        let mut weight         = 0usize;

        for batch in loader.iter() {
            let dims = batch.inputs.dims();
            if summary.input_dims.is_none() {
                summary.input_dims = Some(dims);
            }

            let values = dims.iter().product::<usize>();
            if values > 0 {
                let delta: f32 = (batch.targets - batch.inputs)
                    .abs()
                    .mean()
                    .into_scalar()
                    .elem();
                weighted_delta += f64::from(delta) * values as f64;
                weight         += values;
            }
            summary.batches += 1;
        }

        summary.mean_abs_delta = if weight > 0 { weighted_delta / weight as f64 } else { 0.0 };
        tracing::debug!("Inspected {} batches", summary.batches);
        Ok(summary)
    }
}

fn span(values: impl Iterator<Item = f64>) -> Option<ParamRange> {
    values.fold(None, |acc: Option<ParamRange>, v| match acc {
        None    => Some(ParamRange::fixed(v)),
        Some(r) => Some(ParamRange { min: r.min.min(v), max: r.max.max(v) }),
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generate_use_case::{GenerateConfig, GenerateUseCase};
    use crate::data::sampler::SamplerConfig;

    fn generate(dir: &std::path::Path, n: usize) {
        let cfg = GenerateConfig {
            output_dir:     dir.display().to_string(),
            num_samples:    n,
            train_fraction: 1.0,
            sampler:        SamplerConfig { sequence_length: 6, ..Default::default() },
            ..Default::default()
        };
        GenerateUseCase::new(cfg).execute().unwrap();
    }

    #[test]
    fn test_inspect_generated_split() {
        let tmp = tempfile::tempdir().unwrap();
        generate(tmp.path(), 10);

        let summary = InspectUseCase::new(tmp.path()).execute(Split::Train, 4).unwrap();
        assert_eq!(summary.samples, 10);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.batches, 3);
        assert_eq!(summary.input_dims.map(|d| [d[1], d[2]]), Some([5, 2]));

        let g = summary.gravity.unwrap();
        assert!(g.min >= 5.0 && g.max <= 10.0);
        assert!(summary.mean_step_displacement >= 0.0);
        assert!(summary.mean_abs_delta >= 0.0 && summary.mean_abs_delta <= 1.0);
    }

    #[test]
    fn test_empty_validation_split() {
        let tmp = tempfile::tempdir().unwrap();
        generate(tmp.path(), 4);

        // train_fraction 1.0 → val.jsonl exists but is empty
        let summary = InspectUseCase::new(tmp.path()).execute(Split::Val, 4).unwrap();
        assert_eq!(summary.samples, 0);
        assert_eq!(summary.batches, 0);
        assert_eq!(summary.gravity, None);
    }

    #[test]
    fn test_missing_split_or_dir_errors() {
        let tmp = tempfile::tempdir().unwrap();
        generate(tmp.path(), 2);
        assert!(InspectUseCase::new(tmp.path()).execute(Split::Ood, 4).is_err());
        assert!(InspectUseCase::new(tmp.path().join("missing")).execute(Split::Train, 4).is_err());
        assert!(InspectUseCase::new(tmp.path()).execute(Split::Train, 0).is_err());
    }

    #[test]
    fn test_span() {
        assert_eq!(span([3.0, 1.0, 2.0].into_iter()), Some(ParamRange { min: 1.0, max: 3.0 }));
        assert_eq!(span(std::iter::empty()), None);
    }
}
