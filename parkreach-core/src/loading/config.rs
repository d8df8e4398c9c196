use std::path::PathBuf;

use serde::Deserialize;

use crate::Meters;

/// Inputs and parameters of a network accessibility run
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    /// GeoJSON with one Point feature per graph node (projected CRS)
    pub nodes_path: PathBuf,
    /// GeoJSON with one feature per graph edge
    pub edges_path: PathBuf,
    /// Building footprints, GeoJSON or CSV with `id` and `wkt` columns
    pub buildings_path: PathBuf,
    /// Park polygons, GeoJSON or CSV with `id` and `wkt` columns
    pub parks_path: PathBuf,
    /// Optional study area polygons (same CRS as buildings and parks);
    /// features outside it are left out of the analysis
    #[serde(default)]
    pub boundary_path: Option<PathBuf>,
    #[serde(default = "default_max_distance")]
    pub max_distance_m: Meters,
    /// Treat edges as one-way
    #[serde(default)]
    pub directed: bool,
    #[serde(default = "default_node_id_property")]
    pub node_id_property: String,
    #[serde(default = "default_edge_source_property")]
    pub edge_source_property: String,
    #[serde(default = "default_edge_target_property")]
    pub edge_target_property: String,
    #[serde(default = "default_edge_length_property")]
    pub edge_length_property: String,
    #[serde(default = "default_feature_id_property")]
    pub feature_id_property: String,
}

impl AnalysisConfig {
    pub fn new(
        nodes_path: impl Into<PathBuf>,
        edges_path: impl Into<PathBuf>,
        buildings_path: impl Into<PathBuf>,
        parks_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            edges_path: edges_path.into(),
            buildings_path: buildings_path.into(),
            parks_path: parks_path.into(),
            boundary_path: None,
            max_distance_m: default_max_distance(),
            directed: false,
            node_id_property: default_node_id_property(),
            edge_source_property: default_edge_source_property(),
            edge_target_property: default_edge_target_property(),
            edge_length_property: default_edge_length_property(),
            feature_id_property: default_feature_id_property(),
        }
    }
}

fn default_max_distance() -> Meters {
    1500.0
}

fn default_node_id_property() -> String {
    "osmid".to_string()
}

fn default_edge_source_property() -> String {
    "u".to_string()
}

fn default_edge_target_property() -> String {
    "v".to_string()
}

fn default_edge_length_property() -> String {
    "length".to_string()
}

fn default_feature_id_property() -> String {
    "osm_id".to_string()
}
