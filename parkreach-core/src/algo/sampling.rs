//! Regular grid sampling of straight-line park accessibility over the area
//! covered by the parks. Used for the approximate coverage map and chart.

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use super::nearest_park::{ParkIndex, ParkLocation};
use crate::{Error, Meters};

/// Fraction of the park bounding box extent added on each side
const GRID_PADDING: f64 = 0.05;
const MAX_GRID_POINTS: usize = 5_000_000;

/// Accessibility of one grid point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSample {
    pub lat: f64,
    pub lon: f64,
    pub nearest_park: String,
    pub distance_m: Meters,
    pub accessible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSummary {
    pub samples: Vec<GridSample>,
    pub accessible: usize,
    pub inaccessible: usize,
    pub threshold_m: Meters,
    pub step_deg: f64,
}

impl GridSummary {
    #[allow(clippy::cast_precision_loss)]
    pub fn accessible_pct(&self) -> f64 {
        let total = self.accessible + self.inaccessible;
        if total == 0 {
            0.0
        } else {
            100.0 * self.accessible as f64 / total as f64
        }
    }

    pub fn inaccessible_pct(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            100.0 - self.accessible_pct()
        }
    }

    pub fn inaccessible_samples(&self) -> impl Iterator<Item = &GridSample> {
        self.samples.iter().filter(|sample| !sample.accessible)
    }
}

/// Regular (lat, lon) grid over the padded bounding box of the parks, row by
/// row from the southern edge
///
/// # Errors
///
/// - `EmptyInput` if `parks` is empty
/// - `InvalidArgument` if `step_deg` is not a positive number, a park lies
///   outside the WGS84 coordinate range, or the grid would be unreasonably
///   large (checked before any point is generated)
pub fn make_grid_points(parks: &[ParkLocation], step_deg: f64) -> Result<Vec<(f64, f64)>, Error> {
    if parks.is_empty() {
        return Err(Error::EmptyInput("parks"));
    }
    if !step_deg.is_finite() || step_deg <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "Grid step must be a positive number of degrees, got {step_deg}"
        )));
    }

    if let Some(park) = parks
        .iter()
        .find(|p| !(-90.0..=90.0).contains(&p.lat) || !(-180.0..=180.0).contains(&p.lon))
    {
        return Err(Error::InvalidArgument(format!(
            "Park '{}' at lat={}, lon={} is not a WGS84 coordinate",
            park.name, park.lat, park.lon
        )));
    }

    let (mut min_lat, mut max_lat) = bounds(parks.iter().map(|p| p.lat));
    let (mut min_lon, mut max_lon) = bounds(parks.iter().map(|p| p.lon));

    let pad_lat = (max_lat - min_lat) * GRID_PADDING;
    let pad_lon = (max_lon - min_lon) * GRID_PADDING;
    min_lat -= pad_lat;
    max_lat += pad_lat;
    min_lon -= pad_lon;
    max_lon += pad_lon;

    let rows = axis_len(min_lat, max_lat, step_deg);
    let columns = axis_len(min_lon, max_lon, step_deg);
    let too_large = || {
        Error::InvalidArgument(format!(
            "Grid step {step_deg} would produce more than {MAX_GRID_POINTS} points"
        ))
    };
    let (Some(rows), Some(columns)) = (rows, columns) else {
        return Err(too_large());
    };
    if rows.saturating_mul(columns) > MAX_GRID_POINTS {
        return Err(too_large());
    }

    let lats = axis(min_lat, max_lat, step_deg, rows);
    let lons = axis(min_lon, max_lon, step_deg, columns);
    Ok(lats
        .iter()
        .flat_map(|&lat| lons.iter().map(move |&lon| (lat, lon)))
        .collect())
}

/// Checks every grid point against the nearest park
///
/// # Errors
///
/// Propagates the errors of [`make_grid_points`] and [`ParkIndex::check`]
pub fn sample_grid(index: &ParkIndex, step_deg: f64, threshold_m: Meters) -> Result<GridSummary, Error> {
    let points = make_grid_points(index.parks(), step_deg)?;
    info!("Sampling {} grid points against {} parks", points.len(), index.len());

    let samples = points
        .par_iter()
        .map(|&(lat, lon)| {
            let check = index
                .check(lat, lon, threshold_m)?
                .ok_or(Error::EmptyInput("parks"))?;
            Ok(GridSample {
                lat,
                lon,
                nearest_park: check.nearest_park,
                distance_m: check.distance_m,
                accessible: check.accessible,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let accessible = samples.iter().filter(|s| s.accessible).count();
    let inaccessible = samples.len() - accessible;
    info!("Accessible points: {accessible}");
    info!("Inaccessible points: {inaccessible}");

    Ok(GridSummary {
        samples,
        accessible,
        inaccessible,
        threshold_m,
        step_deg,
    })
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    })
}

/// Number of values in `min..=max` at `step`, `None` when it does not fit in
/// the grid budget
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn axis_len(min: f64, max: f64, step: f64) -> Option<usize> {
    let steps = ((max - min) / step).floor();
    (steps.is_finite() && steps >= 0.0 && steps < MAX_GRID_POINTS as f64)
        .then(|| steps as usize + 1)
}

/// `len` comes from [`axis_len`]; one extra candidate absorbs rounding in the
/// division
#[allow(clippy::cast_precision_loss)]
fn axis(min: f64, max: f64, step: f64, len: usize) -> Vec<f64> {
    (0..=len)
        .map(|i| min + i as f64 * step)
        .take_while(|&value| value <= max)
        .collect()
}
