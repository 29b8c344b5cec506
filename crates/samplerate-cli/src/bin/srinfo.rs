//! srinfo - List the available converters
//!
//! Usage:
//!   srinfo                 # Library version and full catalog
//!   srinfo --algorithm 2   # One converter by id, slug or name

use anyhow::Result;
use clap::Parser;
use samplerate_cli::output::{print_json, AlgorithmInfo, LibraryInfo};
use samplerate_core::Algorithm;

#[derive(Parser, Debug)]
#[command(name = "srinfo")]
#[command(about = "Show sample rate converter catalog", long_about = None)]
struct Args {
    /// Show a single converter
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env().filter_level(level).init();

    match args.algorithm {
        Some(algorithm) => print_json(&AlgorithmInfo::from(algorithm)),
        None => {
            let info = LibraryInfo::collect();
            log::info!("{} converters available", info.algorithms.len());
            print_json(&info);
        }
    }

    Ok(())
}
