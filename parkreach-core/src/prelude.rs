// Re-export key components
pub use crate::algo::accessibility::{AccessibilityResult, AccessibilityStats, compute_accessibility};
pub use crate::algo::classify::{DistanceBand, classify};
pub use crate::algo::nearest_park::{AccessibilityCheck, ParkIndex, ParkLocation};
pub use crate::algo::sampling::{GridSummary, make_grid_points, sample_grid};
pub use crate::algo::snapping::snap;
pub use crate::loading::{AnalysisConfig, load_analysis_inputs, load_park_locations};
pub use crate::model::{AnnotatedBuilding, Building, Park, WalkGraph, WalkGraphBuilder};
pub use crate::output::{buildings_to_geojson, parks_to_geojson, samples_to_geojson};
pub use crate::routing::dijkstra::{DistanceMap, shortest_distances};

// Core types for the walking network
pub use crate::Error;
pub use crate::Meters;
pub use crate::NodeId;
