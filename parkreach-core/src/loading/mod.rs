//! This module is responsible for loading the walking network and the
//! building and park layers from disk and validating them before analysis.

mod boundary;
mod builder;
mod config;
mod features;
mod graph;

pub use boundary::Boundary;
pub use builder::{AnalysisInputs, load_analysis_inputs, run_analysis};
pub use config::AnalysisConfig;
pub use features::{load_buildings, load_park_locations, load_parks};
pub use graph::load_walk_graph;
