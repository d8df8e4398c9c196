#![allow(dead_code)]

use geo::Point;
use parkreach_core::{Building, NodeId, Park, WalkGraph, WalkGraphBuilder};

/// 0 - 1 - 2 - 3 - 4 along the x axis, every segment 100 m
pub fn line_graph() -> WalkGraph {
    let mut builder = WalkGraphBuilder::new();
    for id in 0..5u64 {
        builder
            .add_node(id, Point::new(id as f64 * 100.0, 0.0))
            .unwrap();
    }
    for id in 0..4u64 {
        builder.add_edge(id, id + 1, 100.0).unwrap();
    }
    builder.build()
}

/// Triangle A (nodes 1, 2, 3) near the origin and triangle B (nodes 11, 12,
/// 13) far to the east, with no connection between them
pub fn two_triangles() -> WalkGraph {
    let mut builder = WalkGraphBuilder::new();
    for (offset, base) in [(0.0, 0u64), (10_000.0, 10)] {
        builder.add_node(base + 1, Point::new(offset, 0.0)).unwrap();
        builder.add_node(base + 2, Point::new(offset + 100.0, 0.0)).unwrap();
        builder.add_node(base + 3, Point::new(offset + 50.0, 80.0)).unwrap();
        builder.add_edge(base + 1, base + 2, 100.0).unwrap();
        builder.add_edge(base + 2, base + 3, 95.0).unwrap();
        builder.add_edge(base + 3, base + 1, 95.0).unwrap();
    }
    builder.build()
}

/// Square grid of `side * side` nodes, `spacing` meters apart, ids row-major
pub fn grid_graph(side: u64, spacing: f64) -> WalkGraph {
    let mut builder = WalkGraphBuilder::new();
    for row in 0..side {
        for col in 0..side {
            builder
                .add_node(
                    row * side + col,
                    Point::new(col as f64 * spacing, row as f64 * spacing),
                )
                .unwrap();
        }
    }
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                builder.add_edge(id, id + 1, spacing).unwrap();
            }
            if row + 1 < side {
                builder.add_edge(id, id + side, spacing).unwrap();
            }
        }
    }
    builder.build()
}

pub fn building_at(id: &str, x: f64, y: f64) -> Building {
    Building::new(id, Point::new(x, y))
}

pub fn park_at(id: &str, x: f64, y: f64) -> Park {
    Park::new(id, Point::new(x, y))
}

pub fn node_point(graph: &WalkGraph, id: NodeId) -> Point<f64> {
    graph.node(id).unwrap().geometry
}
