//! Walking network from node and edge GeoJSON layers

use geo::{Euclidean, Geometry, Length};
use log::info;

use super::config::AnalysisConfig;
use super::features::{f64_property, feature_geometry, read_feature_collection, u64_property};
use crate::{Error, WalkGraph, WalkGraphBuilder};

/// Builds the walking graph from the node and edge layers named in `config`.
///
/// Node features must be Points carrying an integer id; edge features carry
/// the ids of both endpoints and a length in meters. When the length property
/// is missing, the planar length of a LineString geometry is used instead.
///
/// # Errors
///
/// Returns `ConfigurationError` for malformed nodes or edges, or an I/O or
/// GeoJSON error if a layer cannot be read
pub fn load_walk_graph(config: &AnalysisConfig) -> Result<WalkGraph, Error> {
    let mut builder = WalkGraphBuilder::new().directed(config.directed);

    let nodes = read_feature_collection(&config.nodes_path)?;
    for (position, feature) in nodes.features.into_iter().enumerate() {
        let id = u64_property(&feature, &config.node_id_property)
            .or_else(|| feature.id.as_ref().and_then(numeric_feature_id))
            .ok_or_else(|| {
                Error::ConfigurationError(format!(
                    "Node feature {position} has no integer '{}' property",
                    config.node_id_property
                ))
            })?;

        match feature_geometry(feature) {
            Some(Geometry::Point(point)) => {
                builder.add_node(id, point)?;
            }
            _ => {
                return Err(Error::ConfigurationError(format!(
                    "Node {id} does not have a Point geometry"
                )));
            }
        }
    }

    let edges = read_feature_collection(&config.edges_path)?;
    for (position, feature) in edges.features.into_iter().enumerate() {
        let endpoint = |property: &str| {
            u64_property(&feature, property).ok_or_else(|| {
                Error::ConfigurationError(format!(
                    "Edge feature {position} has no integer '{property}' property"
                ))
            })
        };
        let from = endpoint(&config.edge_source_property)?;
        let to = endpoint(&config.edge_target_property)?;

        let length = match f64_property(&feature, &config.edge_length_property) {
            Some(length) => length,
            None => match feature_geometry(feature) {
                Some(Geometry::LineString(line)) => Euclidean.length(&line),
                _ => {
                    return Err(Error::ConfigurationError(format!(
                        "Edge {from} -> {to} has neither a '{}' property nor a LineString geometry",
                        config.edge_length_property
                    )));
                }
            },
        };

        builder.add_edge(from, to, length)?;
    }

    let graph = builder.build();
    info!(
        "Walking graph loaded: {} nodes, {} arcs ({})",
        graph.node_count(),
        graph.edge_count(),
        if graph.is_directed() { "directed" } else { "undirected" }
    );
    Ok(graph)
}

fn numeric_feature_id(id: &geojson::feature::Id) -> Option<u64> {
    match id {
        geojson::feature::Id::Number(n) => n.as_u64(),
        geojson::feature::Id::String(s) => s.trim().parse().ok(),
    }
}
