//! Network accessibility of buildings to parks
//!
//! Buildings and parks are snapped to the walking graph, every park node
//! becomes a source of one multi-source shortest path search bounded by the
//! cutoff, and each building is classified by the distance found at its node.

use itertools::{Itertools, MinMaxResult};
use log::info;
use serde::Serialize;

use super::classify::{BandCounts, classify};
use super::snapping::{snap_buildings, snap_parks, source_set};
use crate::{AnnotatedBuilding, Building, Error, Meters, Park, WalkGraph, shortest_distances};

/// Summary of an accessibility run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityStats {
    pub total: usize,
    pub accessible_count: usize,
    pub inaccessible_count: usize,
    /// Distance statistics over buildings with a park in reach, `None` if there are none
    pub min_dist: Option<Meters>,
    pub max_dist: Option<Meters>,
    pub mean_dist: Option<Meters>,
    pub bands: BandCounts,
}

impl AccessibilityStats {
    pub fn from_buildings(buildings: &[AnnotatedBuilding]) -> Self {
        let mut bands = BandCounts::default();
        for building in buildings {
            bands.add(building.distance_band());
        }

        let distances: Vec<Meters> = buildings
            .iter()
            .filter_map(|building| building.dist_to_park_m)
            .collect();

        let (min_dist, max_dist) = match distances.iter().copied().minmax() {
            MinMaxResult::NoElements => (None, None),
            MinMaxResult::OneElement(d) => (Some(d), Some(d)),
            MinMaxResult::MinMax(min, max) => (Some(min), Some(max)),
        };

        #[allow(clippy::cast_precision_loss)]
        let mean_dist = (!distances.is_empty())
            .then(|| distances.iter().sum::<Meters>() / distances.len() as f64);

        let accessible_count = buildings.iter().filter(|b| b.park_access).count();

        Self {
            total: buildings.len(),
            accessible_count,
            inaccessible_count: buildings.len() - accessible_count,
            min_dist,
            max_dist,
            mean_dist,
            bands,
        }
    }

    /// Share of buildings with park access in percent
    #[allow(clippy::cast_precision_loss)]
    pub fn accessible_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.accessible_count as f64 / self.total as f64
        }
    }
}

/// Annotated buildings together with their summary
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilityResult {
    pub buildings: Vec<AnnotatedBuilding>,
    /// Input parks with their snapped `nearest_node`
    pub parks: Vec<Park>,
    pub stats: AccessibilityStats,
    pub cutoff_m: Meters,
}

impl AccessibilityResult {
    /// Name of the boolean access attribute, e.g. `park_access_1500m`
    pub fn access_attribute(&self) -> String {
        access_attribute(self.cutoff_m)
    }
}

pub(crate) fn access_attribute(cutoff_m: Meters) -> String {
    format!("park_access_{cutoff_m}m")
}

/// Computes the walking distance from every building to its closest park.
///
/// The graph is only read, so concurrent calls on the same graph are safe and
/// each call owns its traversal state. Results are deterministic for fixed
/// inputs.
///
/// # Errors
///
/// - `EmptyInput` if there are no buildings or no parks
/// - `InvalidArgument` for a negative or NaN cutoff or non-finite points
/// - `ConfigurationError` if the graph has no nodes
pub fn compute_accessibility(
    graph: &WalkGraph,
    buildings: &[Building],
    parks: &[Park],
    cutoff_m: Meters,
) -> Result<AccessibilityResult, Error> {
    if buildings.is_empty() {
        return Err(Error::EmptyInput("buildings"));
    }
    if parks.is_empty() {
        return Err(Error::EmptyInput("parks"));
    }
    if cutoff_m.is_nan() || cutoff_m < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "Cutoff must be non-negative, got {cutoff_m}"
        )));
    }

    info!(
        "Snapping {} buildings and {} parks to {} graph nodes",
        buildings.len(),
        parks.len(),
        graph.node_count()
    );
    let snapped_buildings = snap_buildings(graph, buildings)?;
    let snapped_parks = snap_parks(graph, parks)?;
    let sources = source_set(&snapped_parks);
    info!("Parks collapsed onto {} distinct source nodes", sources.len());

    let distances = shortest_distances(graph, &sources, cutoff_m)?;
    let annotated = classify(&snapped_buildings, &distances, cutoff_m)?;
    let stats = AccessibilityStats::from_buildings(&annotated);

    info!("Total buildings: {}", stats.total);
    info!(
        "Buildings with {}=True: {}",
        access_attribute(cutoff_m),
        stats.accessible_count
    );
    info!(
        "Buildings with {}=False: {}",
        access_attribute(cutoff_m),
        stats.inaccessible_count
    );
    if let (Some(min), Some(max), Some(mean)) = (stats.min_dist, stats.max_dist, stats.mean_dist) {
        info!("Distance to park: min {min:.1} m, max {max:.1} m, mean {mean:.1} m");
    }

    Ok(AccessibilityResult {
        buildings: annotated,
        parks: snapped_parks,
        stats,
        cutoff_m,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::Point;

    use super::*;
    use crate::DistanceBand;

    fn annotated(dist: Option<f64>) -> AnnotatedBuilding {
        AnnotatedBuilding {
            id: "b".to_string(),
            geometry: Point::new(0.0, 0.0),
            nearest_node: 0,
            dist_to_park_m: dist,
            park_access: dist.is_some(),
        }
    }

    #[test]
    fn stats_over_reachable_buildings_only() {
        let buildings = vec![
            annotated(Some(100.0)),
            annotated(None),
            annotated(Some(700.0)),
            annotated(Some(400.0)),
        ];

        let stats = AccessibilityStats::from_buildings(&buildings);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.accessible_count, 3);
        assert_eq!(stats.inaccessible_count, 1);
        assert_eq!(stats.min_dist, Some(100.0));
        assert_eq!(stats.max_dist, Some(700.0));
        assert_relative_eq!(stats.mean_dist.unwrap(), 400.0);
        assert_relative_eq!(stats.accessible_pct(), 75.0);
        assert_eq!(stats.bands.get(DistanceBand::Within500), 2);
        assert_eq!(stats.bands.get(DistanceBand::Within1000), 1);
        assert_eq!(stats.bands.get(DistanceBand::NotAccessible), 1);
    }

    #[test]
    fn stats_without_reachable_buildings() {
        let stats = AccessibilityStats::from_buildings(&[annotated(None)]);
        assert_eq!(stats.min_dist, None);
        assert_eq!(stats.max_dist, None);
        assert_eq!(stats.mean_dist, None);
        assert_eq!(stats.accessible_pct(), 0.0);
    }

    #[test]
    fn single_distance_is_min_and_max() {
        let stats = AccessibilityStats::from_buildings(&[annotated(Some(42.0))]);
        assert_eq!(stats.min_dist, Some(42.0));
        assert_eq!(stats.max_dist, Some(42.0));
    }

    #[test]
    fn attribute_name_drops_trailing_zero() {
        assert_eq!(access_attribute(1500.0), "park_access_1500m");
        assert_eq!(access_attribute(250.5), "park_access_250.5m");
    }
}
