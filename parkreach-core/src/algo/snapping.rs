//! Snapping of arbitrary points onto the nearest walking graph node

use geo::Point;
use itertools::Itertools;
use log::trace;
use rayon::prelude::*;

use crate::{Building, Error, NodeId, Park, WalkGraph};

/// Maps every point to the id of the closest graph node (planar Euclidean
/// distance), preserving input order. Equidistant candidates resolve to the
/// lowest node id.
///
/// # Errors
///
/// - `ConfigurationError` if the graph has no nodes
/// - `InvalidArgument` if a point has non-finite coordinates
pub fn snap(graph: &WalkGraph, points: &[Point<f64>]) -> Result<Vec<NodeId>, Error> {
    ensure_snappable(graph)?;

    points
        .par_iter()
        .map(|point| nearest_node(graph, point))
        .collect()
}

/// Returns copies of the buildings with `nearest_node` filled in
pub(crate) fn snap_buildings(graph: &WalkGraph, buildings: &[Building]) -> Result<Vec<Building>, Error> {
    let points: Vec<Point<f64>> = buildings.iter().map(|b| b.geometry).collect();
    let nodes = snap(graph, &points)?;

    Ok(buildings
        .iter()
        .zip(nodes)
        .map(|(building, node)| building.clone().with_nearest_node(node))
        .collect())
}

/// Returns copies of the parks with `nearest_node` filled in
pub(crate) fn snap_parks(graph: &WalkGraph, parks: &[Park]) -> Result<Vec<Park>, Error> {
    let points: Vec<Point<f64>> = parks.iter().map(|p| p.geometry).collect();
    let nodes = snap(graph, &points)?;

    Ok(parks
        .iter()
        .zip(nodes)
        .map(|(park, node)| park.clone().with_nearest_node(node))
        .collect())
}

/// Sorted, deduplicated nodes of snapped parks; parks sharing a node
/// collapse into one source
pub(crate) fn source_set(parks: &[Park]) -> Vec<NodeId> {
    parks
        .iter()
        .filter_map(|park| park.nearest_node)
        .sorted_unstable()
        .dedup()
        .collect()
}

fn ensure_snappable(graph: &WalkGraph) -> Result<(), Error> {
    if graph.is_empty() {
        return Err(Error::ConfigurationError(
            "Walking graph has no nodes to snap to".to_string(),
        ));
    }
    Ok(())
}

fn nearest_node(graph: &WalkGraph, point: &Point<f64>) -> Result<NodeId, Error> {
    if !(point.x().is_finite() && point.y().is_finite()) {
        return Err(Error::InvalidArgument(format!(
            "Cannot snap point with non-finite coordinates {point:?}"
        )));
    }

    let mut candidates = graph
        .rtree()
        .nearest_neighbor_iter_with_distance_2(&[point.x(), point.y()]);

    let (first, best) = candidates.next().ok_or_else(|| {
        Error::ConfigurationError("Walking graph has no nodes to snap to".to_string())
    })?;

    let mut node = first.id;
    for (candidate, distance_2) in candidates {
        if distance_2 > best {
            break;
        }
        node = node.min(candidate.id);
    }

    trace!("Snapped {point:?} to node {node} at {:.1} m", best.sqrt());
    Ok(node)
}
