use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parkreach_core::output::{buildings_to_geojson_string, parks_to_geojson_string};
use parkreach_core::{AccessibilityResult, AccessibilityStats, DistanceBand, Meters};
use serde_json::{Value, json};
use tracing::info;

use crate::config::load_config;

pub struct AnalyzeArgs {
    pub config: PathBuf,
    pub max_distance_m: Option<Meters>,
    pub output: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub parks_output: Option<PathBuf>,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(cutoff) = args.max_distance_m {
        config.max_distance_m = cutoff;
    }

    let result = parkreach_core::loading::run_analysis(&config)
        .context("Network accessibility analysis failed")?;

    let output = args
        .output
        .unwrap_or_else(|| default_output(&result, "geojson"));
    let geojson = buildings_to_geojson_string(&result)?;
    write(&output, &geojson)?;
    info!("Annotated buildings written to {}", output.display());

    let summary = args
        .summary
        .unwrap_or_else(|| default_output(&result, "summary.json"));
    let text = serde_json::to_string_pretty(&summary_json(&result))?;
    write(&summary, &text)?;
    info!("Summary written to {}", summary.display());

    if let Some(parks) = args.parks_output {
        write(&parks, &parks_to_geojson_string(&result)?)?;
        info!("Snapped parks written to {}", parks.display());
    }

    print_band_table(&result.stats);
    Ok(())
}

fn default_output(result: &AccessibilityResult, extension: &str) -> PathBuf {
    PathBuf::from(format!("buildings_{}.{extension}", result.access_attribute()))
}

fn write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

fn summary_json(result: &AccessibilityResult) -> Value {
    json!({
        "cutoff_m": result.cutoff_m,
        "attribute": result.access_attribute(),
        "accessible_pct": result.stats.accessible_pct(),
        "stats": result.stats,
    })
}

fn print_band_table(stats: &AccessibilityStats) {
    println!("{:<16} {:>10}", "distance band", "buildings");
    for band in DistanceBand::ALL {
        println!("{:<16} {:>10}", band.as_str(), stats.bands.get(band));
    }
    println!(
        "{:<16} {:>9.1}%",
        "accessible",
        stats.accessible_pct()
    );
}
