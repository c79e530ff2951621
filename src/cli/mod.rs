// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, converts them into application configs and prints the
// results. All real work is delegated to Layer 2.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EpisodeArgs, GenerateArgs, InspectArgs, PreviewArgs};

use crate::application::generate_use_case::GenerateConfig;

#[derive(Parser, Debug)]
#[command(
    name = "bounce-data",
    version,
    about = "Generate bouncing-square trajectory datasets for in-context learning of intuitive physics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate(args) => run_generate(args),
            Commands::Episodes(args) => run_episodes(args),
            Commands::Inspect(args)  => run_inspect(args),
            Commands::Preview(args)  => run_preview(args),
        }
    }
}

/// A `--config` file replaces the flags as a whole.
fn generate_config(args: GenerateArgs) -> Result<GenerateConfig> {
    use crate::infra::dataset_store::load_json_file;

    match args.config.clone() {
        Some(path) => {
            tracing::info!("Loading config from '{}'", path.display());
            load_json_file(&path)
        }
        None => Ok(args.into()),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    use crate::application::generate_use_case::GenerateUseCase;

    let config     = generate_config(args)?;
    let output_dir = config.output_dir.clone();
    let report     = GenerateUseCase::new(config).execute()?;

    println!(
        "Dataset written to '{}': {} train, {} val, {} ood ({} CSV rows, {} frames)",
        output_dir, report.train, report.val, report.ood, report.csv_rows, report.frames
    );
    Ok(())
}

fn run_episodes(args: EpisodeArgs) -> Result<()> {
    use crate::application::episode_use_case::EpisodeUseCase;

    let output_dir = args.output_dir.clone();
    let written    = EpisodeUseCase::new(args.into()).execute()?;

    println!("{} episodes written to '{}'", written, output_dir);
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::InspectUseCase;

    let s = InspectUseCase::new(args.dataset_dir).execute(args.split.into(), args.batch_size)?;

    println!("split:            {}", s.split);
    println!("samples:          {} ({} skipped)", s.samples, s.skipped);
    println!("batches:          {}", s.batches);
    if let Some(d) = s.input_dims {
        println!("first batch:      inputs/targets [{}, {}, {}]", d[0], d[1], d[2]);
    }
    if let (Some(g), Some(r)) = (s.gravity, s.restitution) {
        println!("gravity:          {:.3} .. {:.3}", g.min, g.max);
        println!("restitution:      {:.3} .. {:.3}", r.min, r.max);
    }
    println!("mean step:        {:.4} units/frame", s.mean_step_displacement);
    println!("mean |Δ| batched: {:.4} (normalised)", s.mean_abs_delta);
    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    use crate::application::preview_use_case::PreviewUseCase;

    for frame in PreviewUseCase::new(args.into()).execute()? {
        println!(
            "t={}  x={:.3}  y={:.3}\n{}\n",
            frame.t, frame.position[0], frame.position[1], frame.ascii
        );
    }
    Ok(())
}
