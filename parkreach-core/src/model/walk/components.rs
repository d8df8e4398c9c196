//! Walking network components - nodes and edges

use geo::Point;

use crate::{Meters, NodeId};

/// Walking graph node
#[derive(Debug, Clone)]
pub struct WalkNode {
    /// Identifier assigned by the graph provider (usually the OSM node id)
    pub id: NodeId,
    /// Node coordinates in the projected CRS of the graph
    pub geometry: Point<f64>,
}

/// Walking graph edge (street segment)
#[derive(Debug, Clone, Copy)]
pub struct WalkEdge {
    /// Segment length in meters
    pub length: Meters,
}

impl WalkEdge {
    pub fn length(&self) -> Meters {
        self.length
    }
}
