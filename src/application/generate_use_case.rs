// ============================================================
// Layer 2 — GenerateUseCase
// ============================================================
// Orchestrates a full dataset build in order:
//
//   Step 1: Validate the config                (Layer 4 - data)
//   Step 2: Seed the RNG
//   Step 3: Sample + simulate N trajectories   (Layer 4 + 5)
//   Step 4: Add Gaussian noise (optional)      (Layer 4 - data)
//   Step 5: Split train / validation           (Layer 4 - data)
//   Step 6: Sample the OOD split (optional)    (Layer 4 + 5)
//   Step 7: Save config.json                   (Layer 6 - infra)
//   Step 8: Write JSONL splits + CSV, drop a   (Layer 6 - infra)
//           stale ood.jsonl
//   Step 9: Clear old frames, write new ones   (Layer 6 - infra)
//
// Steps 1–6 live in `generate()` and never touch disk, so tests
// can run the whole pipeline in memory.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{
    noise::perturb_sample,
    sampler::{generate_random_sequence, SamplerConfig},
    splitter::split_train_val,
};
use crate::domain::{
    error::{ensure_finite, ParamError},
    params::ParamRange,
    traits::SampleSink,
    trajectory::{Split, TrajectorySample},
};
use crate::infra::{
    dataset_store::DatasetStore,
    frame_writer::FrameWriter,
    positions_csv::PositionsCsv,
};
use crate::sim::world::BoxWorld;

// ─── Generate Configuration ──────────────────────────────────────────────────
// Everything needed to rebuild a dataset bit for bit.
// Saved as config.json next to the data it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub output_dir:      String,
    pub seed:            u64,
    pub num_samples:     usize,
    pub train_fraction:  f64,
    pub noise_std:       f64,
    pub render_frames:   bool,
    pub sampler:         SamplerConfig,
    pub ood_samples:     usize,
    pub ood_gravity:     Option<ParamRange>,
    pub ood_restitution: Option<ParamRange>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir:      "data/bouncing".to_string(),
            seed:            0,
            num_samples:     1000,
            train_fraction:  0.8,
            noise_std:       0.0,
            render_frames:   false,
            sampler:         SamplerConfig::default(),
            ood_samples:     0,
            ood_gravity:     None,
            ood_restitution: None,
        }
    }
}

impl GenerateConfig {
    pub fn validate(&self) -> Result<(), ParamError> {
        self.sampler.validate()?;
        if self.num_samples == 0 {
            return Err(ParamError::TooFew { name: "num_samples", value: 0, min: 1 });
        }
        ensure_finite("train_fraction", self.train_fraction)?;
        if !(0.0..=1.0).contains(&self.train_fraction) {
            return Err(ParamError::OutOfBounds {
                name:     "train_fraction",
                value:    self.train_fraction,
                expected: "[0, 1]",
            });
        }
        ensure_finite("noise_std", self.noise_std)?;
        if self.noise_std < 0.0 {
            return Err(ParamError::OutOfBounds {
                name:     "noise_std",
                value:    self.noise_std,
                expected: "[0, ∞)",
            });
        }
        self.ood_sampler()?;
        Ok(())
    }

    /// Sampler for the OOD split, or None when no OOD split is requested.
    pub fn ood_sampler(&self) -> Result<Option<SamplerConfig>, ParamError> {
        if self.ood_samples == 0 {
            return Ok(None);
        }
        self.sampler
            .out_of_distribution(self.ood_gravity, self.ood_restitution)
            .map(Some)
    }
}

// ─── Results ──────────────────────────────────────────────────────────────────
/// The three splits of a freshly generated dataset.
#[derive(Debug, Clone)]
pub struct GeneratedSplits {
    pub train: Vec<TrajectorySample>,
    pub val:   Vec<TrajectorySample>,
    /// None when no OOD split was requested.
    pub ood:   Option<Vec<TrajectorySample>>,
}

/// What `execute` wrote, for the CLI to report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub train:    usize,
    pub val:      usize,
    pub ood:      usize,
    pub csv_rows: usize,
    pub frames:   usize,
}

// ─── GenerateUseCase ──────────────────────────────────────────────────────────
pub struct GenerateUseCase {
    config: GenerateConfig,
}

impl GenerateUseCase {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    /// Generate and write the whole dataset.
    pub fn execute(&self) -> Result<GenerateReport> {
        let cfg = &self.config;

        let splits = self.generate()?;

        // ── Step 7: Save config ───────────────────────────────────────────────
        let store = DatasetStore::create(&cfg.output_dir)?;
        store.save_config(cfg)?;

        // ── Step 8: JSONL + CSV ───────────────────────────────────────────────
        // Every file in the directory must come from this config.
        write_splits(&store, &splits)?;
        if splits.ood.is_none() {
            store.remove_split(Split::Ood)?;
        }

        let csv      = PositionsCsv::create(store.dir())?;
        let mut rows = csv.append(&splits.train)?;
        rows        += csv.append(&splits.val)?;
        if let Some(ood) = &splits.ood {
            rows += csv.append(ood)?;
        }
        tracing::info!("Wrote {} position rows to '{}'", rows, csv.csv_path().display());

        // ── Step 9: Frames ────────────────────────────────────────────────────
        let writer = FrameWriter::new(store.dir());
        writer.clear()?;

        let mut frames = 0;
        if cfg.render_frames {
            frames += writer.write_all(&splits.train)?;
            frames += writer.write_all(&splits.val)?;
            if let Some(ood) = &splits.ood {
                frames += writer.write_all(ood)?;
            }
            tracing::info!("Wrote {} PBM frames", frames);
        }

        Ok(GenerateReport {
            train:    splits.train.len(),
            val:      splits.val.len(),
            ood:      splits.ood.as_ref().map_or(0, Vec::len),
            csv_rows: rows,
            frames,
        })
    }

    /// Steps 1–6: build all splits in memory.
    pub fn generate(&self) -> Result<GeneratedSplits> {
        let cfg = &self.config;

        // ── Step 1: Validate ──────────────────────────────────────────────────
        cfg.validate()?;

        // ── Step 2: Seed ──────────────────────────────────────────────────────
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let world   = BoxWorld::new();

        // ── Step 3 + 4: Simulate, then perturb ────────────────────────────────
        tracing::info!(
            "Simulating {} trajectories ({} frames × {} substeps each)",
            cfg.num_samples,
            cfg.sampler.sequence_length,
            cfg.sampler.frame_rate,
        );
        let samples = simulate_batch(
            &world,
            &cfg.sampler,
            0..cfg.num_samples,
            Split::Train,
            cfg,
            &mut rng,
        )?;

        // ── Step 5: Split ─────────────────────────────────────────────────────
        let (train, mut val) = split_train_val(samples, cfg.train_fraction, &mut rng);
        for s in val.iter_mut() {
            s.split = Split::Val;
        }
        tracing::info!("Split: {} train, {} validation", train.len(), val.len());

        // ── Step 6: OOD ───────────────────────────────────────────────────────
        let ood = match cfg.ood_sampler()? {
            Some(ood_cfg) => {
                tracing::info!(
                    "Simulating {} OOD trajectories (gravity {}, restitution {})",
                    cfg.ood_samples,
                    ood_cfg.gravity,
                    ood_cfg.restitution,
                );
                let first = cfg.num_samples;
                Some(simulate_batch(
                    &world,
                    &ood_cfg,
                    first..first + cfg.ood_samples,
                    Split::Ood,
                    cfg,
                    &mut rng,
                )?)
            }
            None => None,
        };

        Ok(GeneratedSplits { train, val, ood })
    }
}

/// Hand every split to a sink. The OOD split is skipped when absent.
pub fn write_splits(sink: &impl SampleSink, splits: &GeneratedSplits) -> Result<()> {
    sink.write_split(Split::Train, &splits.train)?;
    sink.write_split(Split::Val, &splits.val)?;
    if let Some(ood) = &splits.ood {
        sink.write_split(Split::Ood, ood)?;
    }
    Ok(())
}

fn simulate_batch(
    world:   &BoxWorld,
    sampler: &SamplerConfig,
    ids:     std::ops::Range<usize>,
    split:   Split,
    cfg:     &GenerateConfig,
    rng:     &mut StdRng,
) -> Result<Vec<TrajectorySample>> {
    let mut samples = Vec::with_capacity(ids.len());
    for id in ids {
        let trajectory = generate_random_sequence(world, sampler, cfg.render_frames, rng)?;
        let mut sample = TrajectorySample::new(id, split, trajectory);
        if cfg.noise_std > 0.0 {
            perturb_sample(&mut sample, cfg.noise_std, rng)?;
        }
        samples.push(sample);
    }
    Ok(samples)
}
