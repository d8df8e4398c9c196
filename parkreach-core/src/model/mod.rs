//! Data model for walking accessibility analysis
//!
//! Contains the walking network and the building and park records that are
//! snapped onto it.

pub mod features;
pub mod walk;

pub use features::{AnnotatedBuilding, Building, Park};
pub use walk::network::{IndexedPoint, WalkGraph, WalkGraphBuilder};
pub use walk::{WalkEdge, WalkNode};
