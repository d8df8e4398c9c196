use geo::{ConvexHull, Intersects, MultiPoint, Point};
use log::info;

use super::boundary::Boundary;
use super::config::AnalysisConfig;
use super::features::{load_buildings_within, load_parks_within};
use super::graph::load_walk_graph;
use crate::{AccessibilityResult, Building, Error, Park, WalkGraph, compute_accessibility};

/// Everything a network accessibility run needs, loaded into memory
#[derive(Debug, Clone)]
pub struct AnalysisInputs {
    pub graph: WalkGraph,
    pub buildings: Vec<Building>,
    pub parks: Vec<Park>,
}

/// Loads the walking graph, buildings and parks named in the configuration
///
/// # Errors
///
/// Returns an error if there are problems reading or validating the data
pub fn load_analysis_inputs(config: &AnalysisConfig) -> Result<AnalysisInputs, Error> {
    validate_config(config)?;

    info!(
        "Processing walking network: {} / {}",
        config.nodes_path.display(),
        config.edges_path.display()
    );
    let graph = load_walk_graph(config)?;

    let boundary = match &config.boundary_path {
        Some(path) => {
            info!("Clipping to study area boundary: {}", path.display());
            Some(Boundary::from_file(path)?)
        }
        None => None,
    };

    info!("Processing buildings: {}", config.buildings_path.display());
    let buildings = load_buildings_within(
        &config.buildings_path,
        &config.feature_id_property,
        boundary.as_ref(),
    )?;

    info!("Processing parks: {}", config.parks_path.display());
    let parks = load_parks_within(
        &config.parks_path,
        &config.feature_id_property,
        boundary.as_ref(),
    )?;

    validate_coverage(&graph, "buildings", buildings.iter().map(|b| b.geometry));
    validate_coverage(&graph, "parks", parks.iter().map(|p| p.geometry));

    Ok(AnalysisInputs {
        graph,
        buildings,
        parks,
    })
}

/// Loads all inputs and computes accessibility with the configured cutoff
///
/// # Errors
///
/// Propagates loading errors and the errors of [`compute_accessibility`]
pub fn run_analysis(config: &AnalysisConfig) -> Result<AccessibilityResult, Error> {
    let inputs = load_analysis_inputs(config)?;
    let result = compute_accessibility(
        &inputs.graph,
        &inputs.buildings,
        &inputs.parks,
        config.max_distance_m,
    )?;
    info!("Accessibility analysis complete");
    Ok(result)
}

fn validate_config(config: &AnalysisConfig) -> Result<(), Error> {
    if !config.max_distance_m.is_finite() || config.max_distance_m < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "max_distance_m must be a non-negative number, got {}",
            config.max_distance_m
        )));
    }

    let layers = [
        ("graph nodes", Some(&config.nodes_path)),
        ("graph edges", Some(&config.edges_path)),
        ("buildings", Some(&config.buildings_path)),
        ("parks", Some(&config.parks_path)),
        ("boundary", config.boundary_path.as_ref()),
    ];
    for (layer, path) in layers
        .into_iter()
        .filter_map(|(layer, path)| Some((layer, path?)))
    {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{layer} file not found: {}", path.display()),
            )));
        }
    }

    Ok(())
}

/// Warns about points outside the convex hull of the graph nodes and
/// returns how many there are
#[allow(clippy::cast_precision_loss)]
fn validate_coverage(
    graph: &WalkGraph,
    layer: &str,
    points: impl Iterator<Item = Point<f64>>,
) -> usize {
    if graph.is_empty() {
        return 0;
    }
    let graph_nodes: MultiPoint = graph.nodes().map(|node| node.geometry).collect();
    let graph_hull = graph_nodes.convex_hull();

    let mut total = 0usize;
    let mut outside = 0usize;
    for point in points {
        total += 1;
        if !point.intersects(&graph_hull) {
            outside += 1;
        }
    }

    if outside > 0 {
        let percentage = (outside as f64 / total as f64) * 100.0;
        log::warn!(
            "{outside} of {total} {layer} ({percentage:.1}%) are outside the walking network \
        coverage area. They will be snapped to the nearest edge of the network, which may \
        overstate their walking distance. Consider using a larger network extract."
        );
    }
    outside
}
