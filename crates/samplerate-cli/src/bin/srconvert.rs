//! srconvert - Resample WAV and raw PCM16 files
//!
//! Usage:
//!   srconvert --rate 48000 <input>...
//!   srconvert --config srconvert.toml <input>...
//!   srconvert --rate 16000 --input-rate 8000 --channels 1 voice.pcm

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use samplerate_cli::config::SrConfig;
use samplerate_cli::convert::ConvertJob;
use samplerate_cli::output::{print_json, ConvertSummary};
use samplerate_core::Algorithm;
use samplerate_pcm::PcmFormat;

#[derive(Parser, Debug)]
#[command(name = "srconvert")]
#[command(about = "Convert audio files to a new sample rate", long_about = None)]
struct Args {
    /// Input files (.wav, or raw PCM16 LE .pcm/.raw)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Target sample rate in Hz
    #[arg(short, long)]
    rate: Option<u32>,

    /// Converter: sinc-best, sinc-medium, sinc-fastest, zoh, linear or an id
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Input frames per converter call
    #[arg(long)]
    chunk_frames: Option<usize>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Sample rate of raw PCM inputs
    #[arg(long)]
    input_rate: Option<u32>,

    /// Channel count of raw PCM inputs
    #[arg(long)]
    channels: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Verbose shows progress; otherwise only warnings reach stderr
    let level = if args.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env().filter_level(level).init();

    let job = build_job(&args)?;
    std::fs::create_dir_all(&job.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", job.output_dir.display())
    })?;

    log::info!(
        "Converting {} files to {}Hz with {}",
        args.inputs.len(),
        job.target_rate,
        job.converter.algorithm.name()
    );

    let outcomes: Vec<(&String, Result<_>)> = args
        .inputs
        .par_iter()
        .map(|input| {
            let outcome = job.run(Path::new(input));
            if let Err(e) = &outcome {
                log::warn!("Failed to convert {}: {:#}", input, e);
            }
            (input, outcome)
        })
        .collect();

    let summary = ConvertSummary::from_outcomes(outcomes);
    print_json(&summary);

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Merge the configuration file with command line overrides
fn build_job(args: &Args) -> Result<ConvertJob> {
    let mut config = match &args.config {
        Some(path) => SrConfig::load(Path::new(path))?,
        None => SrConfig::default(),
    };

    if let Some(algorithm) = args.algorithm {
        config.converter.algorithm = algorithm;
    }
    if let Some(chunk_frames) = args.chunk_frames {
        config.converter.chunk_frames = chunk_frames;
    }
    if let Some(dir) = &args.output_dir {
        config.output.directory = dir.clone();
    }
    if args.rate.is_some() {
        config.output.sample_rate = args.rate;
    }
    config.validate()?;

    let target_rate = config
        .output
        .sample_rate
        .context("No target rate: pass --rate or set output.sample_rate")?;

    let raw_format = match (args.input_rate, args.channels) {
        (Some(rate), Some(channels)) => {
            let format = PcmFormat::new(rate, channels);
            format.validate()?;
            Some(format)
        }
        (None, None) => None,
        _ => anyhow::bail!("--input-rate and --channels must be given together"),
    };

    Ok(ConvertJob {
        target_rate,
        converter: config.converter,
        output_dir: PathBuf::from(&config.output.directory),
        raw_format,
        sample_format: config.output.sample_format,
    })
}
