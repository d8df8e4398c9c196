//! Walking network graph with an R-tree over its nodes

use geo::Point;
use hashbrown::HashMap;
use petgraph::{
    Directed,
    graph::{DiGraph, Edges, NodeIndex},
};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use super::components::{WalkEdge, WalkNode};
use crate::{Error, Meters, NodeId};

/// Graph node position stored in the spatial index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint {
    pub index: NodeIndex,
    pub id: NodeId,
    pub coords: [f64; 2],
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.coords[0] - point[0];
        let dy = self.coords[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Routable walking network in a projected (planar, meter based) CRS.
///
/// The graph is read-only once built, so a single instance can be shared
/// between any number of concurrent analyses.
#[derive(Debug, Clone)]
pub struct WalkGraph {
    pub(crate) graph: DiGraph<WalkNode, WalkEdge>,
    rtree: RTree<IndexedPoint>,
    ids: HashMap<NodeId, NodeIndex>,
    directed: bool,
}

impl WalkGraph {
    pub fn builder() -> WalkGraphBuilder {
        WalkGraphBuilder::new()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of traversable arcs; an undirected segment counts twice
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.ids.contains_key(&id)
    }

    pub fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.ids.get(&id).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&WalkNode> {
        self.node_index(id)
            .and_then(|index| self.graph.node_weight(index))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &WalkNode> {
        self.graph.node_weights()
    }

    /// Outgoing arcs of a node
    pub fn edges(&self, node: NodeIndex) -> Edges<'_, WalkEdge, Directed> {
        self.graph.edges(node)
    }

    pub(crate) fn id_of(&self, index: NodeIndex) -> NodeId {
        self.graph[index].id
    }

    pub(crate) fn rtree(&self) -> &RTree<IndexedPoint> {
        &self.rtree
    }
}

/// Incremental constructor for [`WalkGraph`] that validates every node and
/// edge as it is added.
#[derive(Debug, Default)]
pub struct WalkGraphBuilder {
    graph: DiGraph<WalkNode, WalkEdge>,
    ids: HashMap<NodeId, NodeIndex>,
    directed: bool,
}

impl WalkGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep edges one-way. By default every edge is walkable in both directions.
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Adds a node with planar coordinates
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for duplicate ids or non-finite coordinates
    pub fn add_node(&mut self, id: NodeId, geometry: Point<f64>) -> Result<NodeIndex, Error> {
        if !(geometry.x().is_finite() && geometry.y().is_finite()) {
            return Err(Error::ConfigurationError(format!(
                "Node {id} has non-finite coordinates"
            )));
        }
        if self.ids.contains_key(&id) {
            return Err(Error::ConfigurationError(format!("Duplicate node id {id}")));
        }

        let index = self.graph.add_node(WalkNode { id, geometry });
        self.ids.insert(id, index);
        Ok(index)
    }

    /// Adds a street segment between two known nodes
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if an endpoint is unknown or the length
    /// is negative or not finite
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, length: Meters) -> Result<(), Error> {
        if !length.is_finite() || length < 0.0 {
            return Err(Error::ConfigurationError(format!(
                "Edge {from} -> {to} has invalid length {length}; lengths must be finite and non-negative"
            )));
        }
        let source = self.lookup(from)?;
        let target = self.lookup(to)?;

        self.graph.add_edge(source, target, WalkEdge { length });
        if !self.directed && source != target {
            self.graph.add_edge(target, source, WalkEdge { length });
        }
        Ok(())
    }

    pub fn build(self) -> WalkGraph {
        let points = self
            .graph
            .node_indices()
            .map(|index| {
                let node = &self.graph[index];
                IndexedPoint {
                    index,
                    id: node.id,
                    coords: [node.geometry.x(), node.geometry.y()],
                }
            })
            .collect();

        WalkGraph {
            graph: self.graph,
            rtree: RTree::bulk_load(points),
            ids: self.ids,
            directed: self.directed,
        }
    }

    fn lookup(&self, id: NodeId) -> Result<NodeIndex, Error> {
        self.ids.get(&id).copied().ok_or_else(|| {
            Error::ConfigurationError(format!("Edge references unknown node {id}"))
        })
    }
}
