//! Walking-network accessibility of buildings to public parks.
//!
//! The crate snaps building and park locations onto a routable walking graph,
//! runs one multi-source shortest path traversal from every park node at once
//! and classifies each building against a distance cutoff. A lightweight
//! straight-line variant (`ParkIndex`) is available for quick lookups.

pub mod algo;
mod error;
pub mod loading;
pub mod model;
pub mod output;
pub mod prelude;
pub mod routing;

pub use error::Error;

pub use algo::accessibility::{AccessibilityResult, AccessibilityStats, compute_accessibility};
pub use algo::classify::{BandCounts, DistanceBand, classify};
pub use algo::nearest_park::{AccessibilityCheck, ParkIndex, ParkLocation};
pub use algo::sampling::{GridSample, GridSummary, make_grid_points, sample_grid};
pub use algo::snapping::snap;
pub use loading::{AnalysisConfig, AnalysisInputs, load_analysis_inputs};
pub use model::{AnnotatedBuilding, Building, Park, WalkGraph, WalkGraphBuilder};
pub use routing::dijkstra::{DistanceMap, shortest_distances};

/// Identifier of a walking graph node, as supplied by the graph provider
pub type NodeId = u64;
/// Distance along the walking network in meters
pub type Meters = f64;
