use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use log::debug;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use crate::{Error, Meters, NodeId, model::WalkGraph};

/// Shortest walking distance from the closest source to every node reached
/// within the cutoff. Nodes outside the cutoff, or in a component without any
/// source, are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceMap {
    distances: HashMap<NodeId, Meters>,
}

impl DistanceMap {
    pub fn get(&self, node: NodeId) -> Option<Meters> {
        self.distances.get(&node).copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.distances.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Meters)> + '_ {
        self.distances.iter().map(|(&node, &distance)| (node, distance))
    }
}

impl FromIterator<(NodeId, Meters)> for DistanceMap {
    fn from_iter<I: IntoIterator<Item = (NodeId, Meters)>>(iter: I) -> Self {
        Self {
            distances: iter.into_iter().collect(),
        }
    }
}

/// Shortest network distance from the nearest of `sources` to every node
/// within `cutoff` meters (inclusive), computed in a single traversal seeded
/// from all sources at once.
///
/// # Errors
///
/// - `InvalidArgument` if `cutoff` is negative or NaN, or `sources` is empty
/// - `InvalidSource` if a source id is not a node of the graph
pub fn shortest_distances(
    graph: &WalkGraph,
    sources: &[NodeId],
    cutoff: Meters,
) -> Result<DistanceMap, Error> {
    if cutoff.is_nan() || cutoff < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "Cutoff must be non-negative, got {cutoff}"
        )));
    }
    if sources.is_empty() {
        return Err(Error::InvalidArgument(
            "At least one source node is required".to_string(),
        ));
    }

    let seeds = sources
        .iter()
        .map(|&id| graph.node_index(id).ok_or(Error::InvalidSource(id)))
        .collect::<Result<Vec<_>, _>>()?;

    let distances = multi_source_dijkstra(graph, &seeds, cutoff);
    debug!(
        "Reached {} of {} nodes from {} sources within {cutoff} m",
        distances.len(),
        graph.node_count(),
        seeds.len()
    );

    Ok(distances
        .into_iter()
        .map(|(index, distance)| (graph.id_of(index), distance))
        .collect())
}

/// Dijkstra's algorithm seeded with every source at distance zero, which is the
/// same as a single search from a virtual node joined to all sources by
/// zero-length edges. Stale heap entries are skipped once their node is settled.
fn multi_source_dijkstra(
    graph: &WalkGraph,
    sources: &[NodeIndex],
    cutoff: Meters,
) -> HashMap<NodeIndex, Meters> {
    let mut distances: HashMap<NodeIndex, Meters> = HashMap::with_capacity(sources.len());
    let mut settled = FixedBitSet::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::with_capacity(sources.len());

    for &source in sources {
        if distances.insert(source, 0.0).is_none() {
            heap.push(State {
                cost: 0.0,
                node: source,
            });
        }
    }

    while let Some(State { cost, node }) = heap.pop() {
        // Already settled through a shorter path
        if settled.put(node.index()) {
            continue;
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            if settled.contains(next.index()) {
                continue;
            }

            let next_cost = cost + edge.weight().length;
            if next_cost > cutoff {
                continue;
            }

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
}
