//! Shortest path search over the walking network

pub mod dijkstra;
