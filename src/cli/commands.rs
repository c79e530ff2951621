// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands and all their configurable flags:
//
//   generate  — train / val / OOD trajectory dataset
//   episodes  — in-context-learning prompts
//   inspect   — batch a split through Burn and summarise it
//   preview   — draw one trajectory in the terminal
//
// Parameter ranges are written `min..max` (or a single number
// to pin a parameter), e.g. `--gravity 5..10 --restitution 0.9`.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::{
    episode_use_case::EpisodeConfig,
    generate_use_case::GenerateConfig,
    preview_use_case::PreviewConfig,
};
use crate::data::sampler::SamplerConfig;
use crate::domain::{params::ParamRange, trajectory::Split};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a bouncing-square trajectory dataset
    Generate(GenerateArgs),

    /// Generate in-context-learning episodes (shared physics per prompt)
    Episodes(EpisodeArgs),

    /// Load a generated split, batch it and print a summary
    Inspect(InspectArgs),

    /// Simulate one trajectory and draw its frames as ASCII
    Preview(PreviewArgs),
}

// ─── Shared sampler flags ─────────────────────────────────────────────────────
#[derive(Args, Debug, Clone)]
pub struct SamplerArgs {
    /// Recorded frames per trajectory
    #[arg(long, default_value_t = 10)]
    pub sequence_length: usize,

    /// Physics substeps (1/60 s each) between recorded frames
    #[arg(long, default_value_t = 30)]
    pub frame_rate: usize,

    /// Initial speed range
    #[arg(long, default_value = "0..10", allow_hyphen_values = true)]
    pub speed: ParamRange,

    /// Launch direction range in radians (π/2 points down)
    #[arg(long, default_value = "0..6.283185307179586", allow_hyphen_values = true)]
    pub direction: ParamRange,

    /// Start x range
    #[arg(long, default_value = "0..16", allow_hyphen_values = true)]
    pub position_x: ParamRange,

    /// Start y range
    #[arg(long, default_value = "0..16", allow_hyphen_values = true)]
    pub position_y: ParamRange,

    /// Gravity range
    #[arg(long, default_value = "5..10", allow_hyphen_values = true)]
    pub gravity: ParamRange,

    /// Restitution (elasticity) range, within [0, 1]
    #[arg(long, default_value = "0.5..1", allow_hyphen_values = true)]
    pub restitution: ParamRange,
}

impl From<SamplerArgs> for SamplerConfig {
    fn from(a: SamplerArgs) -> Self {
        SamplerConfig {
            sequence_length: a.sequence_length,
            frame_rate:      a.frame_rate,
            speed:           a.speed,
            direction:       a.direction,
            position_x:      a.position_x,
            position_y:      a.position_y,
            gravity:         a.gravity,
            restitution:     a.restitution,
        }
    }
}

// ─── generate ─────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Load the whole config from a JSON file instead of flags
    /// (e.g. the config.json of an earlier run)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to write the dataset to
    #[arg(long, default_value = "data/bouncing")]
    pub output_dir: String,

    /// RNG seed; the same seed and flags reproduce the same dataset
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// In-distribution trajectories (train + val)
    #[arg(long, default_value_t = 1000)]
    pub num_samples: usize,

    /// Fraction of in-distribution samples used for training
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Std-dev of Gaussian noise added to each coordinate (0 = exact)
    #[arg(long, default_value_t = 0.0)]
    pub noise_std: f64,

    /// Also write 16×16 PBM frames for every recorded position
    #[arg(long)]
    pub render_frames: bool,

    /// Out-of-distribution trajectories (needs --ood-gravity and/or --ood-restitution)
    #[arg(long, default_value_t = 0)]
    pub ood_samples: usize,

    /// OOD gravity range; must not overlap --gravity
    #[arg(long, allow_hyphen_values = true)]
    pub ood_gravity: Option<ParamRange>,

    /// OOD restitution range; must not overlap --restitution
    #[arg(long, allow_hyphen_values = true)]
    pub ood_restitution: Option<ParamRange>,

    #[command(flatten)]
    pub sampler: SamplerArgs,
}

impl From<GenerateArgs> for GenerateConfig {
    fn from(a: GenerateArgs) -> Self {
        GenerateConfig {
            output_dir:      a.output_dir,
            seed:            a.seed,
            num_samples:     a.num_samples,
            train_fraction:  a.train_fraction,
            noise_std:       a.noise_std,
            render_frames:   a.render_frames,
            sampler:         a.sampler.into(),
            ood_samples:     a.ood_samples,
            ood_gravity:     a.ood_gravity,
            ood_restitution: a.ood_restitution,
        }
    }
}

// ─── episodes ─────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct EpisodeArgs {
    /// Directory to write episodes.jsonl to
    #[arg(long, default_value = "data/episodes")]
    pub output_dir: String,

    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of episodes (prompts)
    #[arg(long, default_value_t = 500)]
    pub num_episodes: usize,

    /// Context trajectories per episode, before the query
    #[arg(long, default_value_t = 4)]
    pub context_len: usize,

    /// Std-dev of Gaussian noise added to each coordinate
    #[arg(long, default_value_t = 0.0)]
    pub noise_std: f64,

    #[command(flatten)]
    pub sampler: SamplerArgs,
}

impl From<EpisodeArgs> for EpisodeConfig {
    fn from(a: EpisodeArgs) -> Self {
        EpisodeConfig {
            output_dir:   a.output_dir,
            seed:         a.seed,
            num_episodes: a.num_episodes,
            context_len:  a.context_len,
            noise_std:    a.noise_std,
            sampler:      a.sampler.into(),
        }
    }
}

// ─── inspect ──────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dataset directory written by `generate`
    #[arg(long, default_value = "data/bouncing")]
    pub dataset_dir: PathBuf,

    /// Which split to load
    #[arg(long, value_enum, default_value_t = SplitArg::Train)]
    pub split: SplitArg,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum SplitArg {
    Train,
    Val,
    Ood,
}

impl From<SplitArg> for Split {
    fn from(s: SplitArg) -> Self {
        match s {
            SplitArg::Train => Split::Train,
            SplitArg::Val   => Split::Val,
            SplitArg::Ood   => Split::Ood,
        }
    }
}

// ─── preview ──────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[arg(long, default_value_t = 5.0)]
    pub speed: f64,

    /// Launch direction in radians (π/2 points down)
    #[arg(long, default_value_t = 0.5, allow_hyphen_values = true)]
    pub direction: f64,

    #[arg(long, default_value_t = 8.0)]
    pub x: f64,

    #[arg(long, default_value_t = 8.0)]
    pub y: f64,

    #[arg(long, default_value_t = 9.8, allow_hyphen_values = true)]
    pub gravity: f64,

    #[arg(long, default_value_t = 0.8)]
    pub restitution: f64,

    #[arg(long, default_value_t = 10)]
    pub sequence_length: usize,

    #[arg(long, default_value_t = 30)]
    pub frame_rate: usize,
}

impl From<PreviewArgs> for PreviewConfig {
    fn from(a: PreviewArgs) -> Self {
        PreviewConfig {
            speed:           a.speed,
            direction:       a.direction,
            x:               a.x,
            y:               a.y,
            gravity:         a.gravity,
            restitution:     a.restitution,
            sequence_length: a.sequence_length,
            frame_rate:      a.frame_rate,
        }
    }
}
