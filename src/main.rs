mod color;
mod config;
mod data;
mod export;
mod layout;
mod pipeline;

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{info, warn};

use color::PaletteMode;
use config::PipelineConfig;
use pipeline::PipelineRun;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaletteArg {
    /// Fixed four-colour bright palette, reused cyclically.
    Bright,
    /// Evenly-spaced hues, one distinct colour per category.
    Hue,
}

impl From<PaletteArg> for PaletteMode {
    fn from(arg: PaletteArg) -> Self {
        match arg {
            PaletteArg::Bright => PaletteMode::Bright,
            PaletteArg::Hue => PaletteMode::Hue,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Correlation table (.csv, .json, or .parquet)
    input: PathBuf,

    /// Minimum |correlation| for an edge to be kept
    #[arg(long, default_value_t = config::DEFAULT_CORR_THRESHOLD)]
    threshold: f64,

    /// Keep only edges whose both endpoints are in these categories
    /// (repeatable; default: all categories)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Category colour palette
    #[arg(long, value_enum, default_value_t = PaletteArg::Bright)]
    palette: PaletteArg,

    /// Write the graph artifacts JSON here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    // The run summary and the empty-result notice must reach the user even
    // without RUST_LOG set, so the filter defaults to `info` not `error`.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !(0.0..=1.0).contains(&args.threshold) {
        bail!("--threshold must be in [0.0, 1.0], got {}", args.threshold);
    }

    let dataset = data::loader::load_file(&args.input)?;
    if dataset.is_empty() {
        warn!("{} has no rows; nothing to filter.", args.input.display());
        return Ok(());
    }
    info!(
        "Loaded {} rows, {} categories from {}",
        dataset.len(),
        dataset.categories.len(),
        args.input.display()
    );

    let allowed_categories: Option<BTreeSet<String>> = if args.categories.is_empty() {
        None
    } else {
        Some(args.categories.iter().cloned().collect())
    };

    let config = PipelineConfig {
        corr_threshold: args.threshold,
        allowed_categories,
        palette: args.palette.into(),
        ..PipelineConfig::default()
    };

    let artifacts = match pipeline::run(&dataset, &config) {
        PipelineRun::Graph(g) => g,
        PipelineRun::Empty => {
            // Expected outcome for this parameter set, not a failure.
            warn!(
                "{}",
                export::empty_result_notice(args.threshold, config.allowed_categories.as_ref())
            );
            return Ok(());
        }
    };

    export::log_summary(&artifacts);
    match &args.out {
        Some(path) => export::write_artifacts_file(path, &artifacts)?,
        None => export::write_artifacts(std::io::stdout().lock(), &artifacts)?,
    }

    Ok(())
}
