mod multi_source;
mod state;

pub use multi_source::{DistanceMap, shortest_distances};
