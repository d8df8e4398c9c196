//! Straight-line nearest park lookup.
//!
//! A quick approximation of park accessibility that skips the walking
//! network entirely: parks are indexed by their (lat, lon) centroid in an
//! R-tree and the distance to the nearest one is measured along the great
//! circle.

use geo::{Distance, Haversine, Point};
use log::warn;
use rstar::{AABB, PointDistance, RTree, RTreeObject};
use serde::{Deserialize, Serialize};

use crate::{Error, Meters};

/// Park centroid in geographic coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl ParkLocation {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

#[derive(Debug, Clone, Copy)]
struct IndexedPark {
    position: usize,
    coords: [f64; 2],
}

impl RTreeObject for IndexedPark {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords)
    }
}

impl PointDistance for IndexedPark {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.coords[0] - point[0];
        let dlon = self.coords[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

/// Result of a single accessibility check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityCheck {
    pub nearest_park: String,
    /// Great-circle distance, rounded to centimeters
    pub distance_m: Meters,
    pub accessible: bool,
    pub threshold_m: Meters,
}

/// Immutable spatial index over park centroids
#[derive(Debug, Clone)]
pub struct ParkIndex {
    tree: RTree<IndexedPark>,
    parks: Vec<ParkLocation>,
}

impl ParkIndex {
    /// Builds the index; parks with non-finite coordinates are dropped
    pub fn new(parks: Vec<ParkLocation>) -> Self {
        let (parks, dropped): (Vec<_>, Vec<_>) = parks
            .into_iter()
            .partition(|park| park.lat.is_finite() && park.lon.is_finite());
        if !dropped.is_empty() {
            warn!(
                "Dropped {} parks with invalid coordinates from the index",
                dropped.len()
            );
        }

        let indexed = parks
            .iter()
            .enumerate()
            .map(|(position, park)| IndexedPark {
                position,
                coords: [park.lat, park.lon],
            })
            .collect();

        Self {
            tree: RTree::bulk_load(indexed),
            parks,
        }
    }

    pub fn len(&self) -> usize {
        self.parks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parks.is_empty()
    }

    pub fn parks(&self) -> &[ParkLocation] {
        &self.parks
    }

    /// Nearest park in (lat, lon) degree space. Equidistant parks resolve to
    /// the one listed first.
    pub fn nearest(&self, lat: f64, lon: f64) -> Option<&ParkLocation> {
        let mut candidates = self.tree.nearest_neighbor_iter_with_distance_2(&[lat, lon]);
        let (first, best) = candidates.next()?;

        let mut position = first.position;
        for (candidate, distance_2) in candidates {
            if distance_2 > best {
                break;
            }
            position = position.min(candidate.position);
        }
        self.parks.get(position)
    }

    /// Nearest park and whether it lies strictly closer than `threshold_m`.
    /// Returns `Ok(None)` when the index holds no parks.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for non-finite coordinates or a negative or
    /// non-finite threshold
    pub fn check(
        &self,
        lat: f64,
        lon: f64,
        threshold_m: Meters,
    ) -> Result<Option<AccessibilityCheck>, Error> {
        if !(lat.is_finite() && lon.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "Invalid coordinates lat={lat}, lon={lon}"
            )));
        }
        if !threshold_m.is_finite() || threshold_m < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "Threshold must be a non-negative number, got {threshold_m}"
            )));
        }

        Ok(self.nearest(lat, lon).map(|park| {
            let distance = Haversine.distance(Point::new(lon, lat), park.point());
            AccessibilityCheck {
                nearest_park: park.name.clone(),
                distance_m: (distance * 100.0).round() / 100.0,
                accessible: distance < threshold_m,
                threshold_m,
            }
        }))
    }
}
