// ============================================================
// Layer 2 — EpisodeUseCase
// ============================================================
// Builds a file of in-context-learning prompts:
//
//   Step 1: Validate the config
//   Step 2: Seed the RNG
//   Step 3: For each episode, sample one physics and K+1 launches
//   Step 4: Add Gaussian noise to every trajectory (optional)
//   Step 5: Save config.json and episodes.jsonl
//
// Each JSONL line holds the full episode (params, context and
// query trajectories) plus `prompt`: the flattened coordinate
// stream with `null` between trajectories.

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{
    episode::{build_episode, Episode},
    noise::add_gaussian_noise,
    sampler::SamplerConfig,
};
use crate::domain::{
    error::{ensure_finite, ParamError},
    params::Point,
};
use crate::infra::dataset_store::DatasetStore;
use crate::sim::world::BoxWorld;

pub const EPISODES_FILE: &str = "episodes.jsonl";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    pub output_dir:   String,
    pub seed:         u64,
    pub num_episodes: usize,
    /// Context trajectories per episode (the query is extra).
    pub context_len:  usize,
    pub noise_std:    f64,
    pub sampler:      SamplerConfig,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            output_dir:   "data/episodes".to_string(),
            seed:         0,
            num_episodes: 500,
            context_len:  4,
            noise_std:    0.0,
            sampler:      SamplerConfig::default(),
        }
    }
}

impl EpisodeConfig {
    pub fn validate(&self) -> Result<(), ParamError> {
        self.sampler.validate()?;
        if self.num_episodes == 0 {
            return Err(ParamError::TooFew { name: "num_episodes", value: 0, min: 1 });
        }
        ensure_finite("noise_std", self.noise_std)?;
        if self.noise_std < 0.0 {
            return Err(ParamError::OutOfBounds {
                name:     "noise_std",
                value:    self.noise_std,
                expected: "[0, ∞)",
            });
        }
        Ok(())
    }
}

/// One line of episodes.jsonl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    #[serde(flatten)]
    pub episode:   Episode,
    pub noise_std: f64,
    pub prompt:    Vec<Option<Point>>,
}

pub struct EpisodeUseCase {
    config: EpisodeConfig,
}

impl EpisodeUseCase {
    pub fn new(config: EpisodeConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<usize> {
        let records = self.build()?;

        let store = DatasetStore::create(&self.config.output_dir)?;
        store.save_config(&self.config)?;
        let path = store.write_jsonl(EPISODES_FILE, &records)?;

        tracing::info!("Wrote {} episodes to '{}'", records.len(), path.display());
        Ok(records.len())
    }

    /// Steps 1–4, in memory.
    pub fn build(&self) -> Result<Vec<EpisodeRecord>> {
        let cfg = &self.config;
        cfg.validate()?;

        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let world   = BoxWorld::new();

        tracing::info!(
            "Building {} episodes with {} context trajectories each",
            cfg.num_episodes,
            cfg.context_len,
        );

        let mut records = Vec::with_capacity(cfg.num_episodes);
        for id in 0..cfg.num_episodes {
            let mut episode = build_episode(&world, &cfg.sampler, cfg.context_len, id, &mut rng)?;

            if cfg.noise_std > 0.0 {
                for t in episode.context.iter_mut() {
                    *t = add_gaussian_noise(t, cfg.noise_std, &mut rng)?;
                }
                episode.query = add_gaussian_noise(&episode.query, cfg.noise_std, &mut rng)?;
            }

            let prompt = episode.prompt_tokens();
            records.push(EpisodeRecord { episode, noise_std: cfg.noise_std, prompt });
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_episodes() {
        let cfg = EpisodeConfig { num_episodes: 6, context_len: 3, ..Default::default() };
        let records = EpisodeUseCase::new(cfg).build().unwrap();

        assert_eq!(records.len(), 6);
        let r = &records[2];
        assert_eq!(r.episode.id, 2);
        assert_eq!(r.episode.context.len(), 3);
        // 4 trajectories × 10 points + 3 separators
        assert_eq!(r.prompt.len(), 43);
    }

    #[test]
    fn test_execute_writes_jsonl() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = EpisodeConfig {
            output_dir:   tmp.path().display().to_string(),
            num_episodes: 3,
            context_len:  1,
            noise_std:    0.05,
            ..Default::default()
        };
        assert_eq!(EpisodeUseCase::new(cfg).execute().unwrap(), 3);

        let store = DatasetStore::open(tmp.path()).unwrap();
        let back: Vec<EpisodeRecord> = store.read_jsonl(EPISODES_FILE).unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back[0].noise_std, 0.05);
        assert_eq!(back[0].prompt.iter().filter(|t| t.is_none()).count(), 1);
    }

    #[test]
    fn test_zero_episodes_rejected() {
        let cfg = EpisodeConfig { num_episodes: 0, ..Default::default() };
        assert!(EpisodeUseCase::new(cfg).build().is_err());
    }
}
