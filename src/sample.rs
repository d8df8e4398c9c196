use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use parkreach_core::loading::load_park_locations;
use parkreach_core::output::samples_to_geojson_string;
use parkreach_core::{Meters, ParkIndex, sample_grid};
use tracing::info;

pub struct SampleArgs {
    pub parks: PathBuf,
    pub step_deg: f64,
    pub threshold_m: Meters,
    pub output: Option<PathBuf>,
}

pub struct NearestArgs {
    pub parks: PathBuf,
    pub lat: f64,
    pub lon: f64,
    pub threshold_m: Meters,
}

fn load_index(path: &Path) -> Result<ParkIndex> {
    let parks = load_park_locations(path)
        .with_context(|| format!("Failed to load parks from {}", path.display()))?;
    let index = ParkIndex::new(parks);
    if index.is_empty() {
        bail!("No parks found in {}", path.display());
    }
    info!("Loaded {} parks from {}", index.len(), path.display());
    Ok(index)
}

pub fn run_sample(args: SampleArgs) -> Result<()> {
    let index = load_index(&args.parks)?;
    let summary = sample_grid(&index, args.step_deg, args.threshold_m)?;

    println!("Total samples: {}", summary.samples.len());
    println!(
        "Accessible: {} ({:.1}%)",
        summary.accessible,
        summary.accessible_pct()
    );
    println!(
        "Not accessible: {} ({:.1}%)",
        summary.inaccessible,
        summary.inaccessible_pct()
    );

    if let Some(output) = args.output {
        fs::write(&output, samples_to_geojson_string(&summary)?)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Grid samples written to {}", output.display());
    }
    Ok(())
}

pub fn run_nearest(args: NearestArgs) -> Result<()> {
    let index = load_index(&args.parks)?;
    let check = index
        .check(args.lat, args.lon, args.threshold_m)?
        .context("Park index is empty")?;
    println!("{}", serde_json::to_string_pretty(&check)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use super::*;

    fn square(lon: f64, lat: f64, name: &str) -> Value {
        let half = 0.001;
        json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [[
                [lon - half, lat - half],
                [lon + half, lat - half],
                [lon + half, lat + half],
                [lon - half, lat + half],
                [lon - half, lat - half]
            ]] },
            "properties": { "name": name }
        })
    }

    fn write_parks(dir: &TempDir, features: Vec<Value>) -> PathBuf {
        let path = dir.path().join("parks.geojson");
        let collection = json!({ "type": "FeatureCollection", "features": features });
        fs::write(&path, collection.to_string()).unwrap();
        path
    }

    #[test]
    fn layer_without_polygons_is_rejected() {
        let dir = TempDir::new().unwrap();
        let parks = write_parks(
            &dir,
            vec![json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [4.9, 52.37] },
                "properties": { "name": "Dam" }
            })],
        );

        let err = load_index(&parks).unwrap_err();
        assert!(err.to_string().starts_with("No parks found in"));
    }

    #[test]
    fn unreadable_layer_names_the_file() {
        let dir = TempDir::new().unwrap();
        let err = load_index(&dir.path().join("absent.geojson")).unwrap_err();
        assert!(err.to_string().contains("absent.geojson"));
    }

    #[test]
    fn nearest_park_lookup() {
        let dir = TempDir::new().unwrap();
        let parks = write_parks(&dir, vec![square(4.8686, 52.3580, "Vondelpark")]);

        let result = run_nearest(NearestArgs {
            parks,
            lat: 52.3590,
            lon: 4.8700,
            threshold_m: 500.0,
        });
        assert!(result.is_ok());
    }

    #[test]
    fn nearest_rejects_invalid_threshold() {
        let dir = TempDir::new().unwrap();
        let parks = write_parks(&dir, vec![square(4.8686, 52.3580, "Vondelpark")]);

        let result = run_nearest(NearestArgs {
            parks,
            lat: 52.3590,
            lon: 4.8700,
            threshold_m: -1.0,
        });
        assert!(result.is_err());
    }

    #[test]
    fn sample_grid_is_written_as_geojson() {
        let dir = TempDir::new().unwrap();
        let parks = write_parks(
            &dir,
            vec![
                square(4.8686, 52.3580, "Vondelpark"),
                square(4.9200, 52.3600, "Oosterpark"),
            ],
        );
        let output = dir.path().join("samples.geojson");

        run_sample(SampleArgs {
            parks,
            step_deg: 0.01,
            threshold_m: 500.0,
            output: Some(output.clone()),
        })
        .unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["type"], "FeatureCollection");
        let features = written["features"].as_array().unwrap();
        assert!(!features.is_empty());
        assert!(features[0]["properties"]["accessible"].is_boolean());
    }
}
