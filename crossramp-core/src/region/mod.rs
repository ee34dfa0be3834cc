//! Intra-region road graph used to compute ramp weights

mod dijkstra;
mod graph;

pub use graph::{RegionGraph, RoadSegment};
