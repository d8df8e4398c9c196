//! Command line front end of the park accessibility analysis

mod analyze;
mod config;
mod sample;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use analyze::AnalyzeArgs;
use sample::{NearestArgs, SampleArgs};

#[derive(Parser, Debug)]
#[command(name = "parkreach")]
#[command(author, version, about = "Walking distance from buildings to parks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Network analysis: annotate every building with its walking distance to a park
    Analyze {
        /// TOML file describing the graph, building and park inputs
        #[arg(short, long)]
        config: PathBuf,
        /// Override the cutoff from the config file
        #[arg(short = 'd', long)]
        max_distance: Option<f64>,
        /// Annotated buildings GeoJSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Summary statistics JSON
        #[arg(short, long)]
        summary: Option<PathBuf>,
        /// Parks with their snapped graph node, as GeoJSON
        #[arg(long)]
        parks_output: Option<PathBuf>,
    },
    /// Straight-line accessibility over a regular grid covering the parks
    Sample {
        /// Park polygons GeoJSON (WGS84)
        #[arg(short, long)]
        parks: PathBuf,
        #[arg(long, default_value_t = 0.001)]
        step: f64,
        #[arg(short, long, default_value_t = 500.0)]
        threshold: f64,
        /// Write samples as GeoJSON points
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Nearest park to a single location
    Nearest {
        #[arg(short, long)]
        parks: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(short, long, default_value_t = 500.0)]
        threshold: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Analyze {
            config,
            max_distance,
            output,
            summary,
            parks_output,
        } => analyze::run(AnalyzeArgs {
            config,
            max_distance_m: max_distance,
            output,
            summary,
            parks_output,
        }),
        Command::Sample {
            parks,
            step,
            threshold,
            output,
        } => sample::run_sample(SampleArgs {
            parks,
            step_deg: step,
            threshold_m: threshold,
            output,
        }),
        Command::Nearest {
            parks,
            lat,
            lon,
            threshold,
        } => sample::run_nearest(NearestArgs {
            parks,
            lat,
            lon,
            threshold_m: threshold,
        }),
    }
}
