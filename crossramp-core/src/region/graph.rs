use hashbrown::HashMap;
use log::warn;
use petgraph::graph::{DiGraph, NodeIndex};

use super::dijkstra::segment_times;
use crate::{Error, RegionId, Segment};

/// Graph node: a directed segment and the seconds needed to traverse it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadSegment {
    pub segment: Segment,
    pub time: u32,
}

/// Directed segment graph of one region.
///
/// Nodes are directed segments, an edge `a -> b` means a vehicle leaving
/// `a` may continue onto `b`. The edge weight is the turn penalty plus the
/// traversal time of `b`.
#[derive(Debug, Clone)]
pub struct RegionGraph {
    pub graph: DiGraph<RoadSegment, u32>,
    region: RegionId,
    nodes: HashMap<Segment, NodeIndex>,
}

impl RegionGraph {
    pub fn new(region: RegionId) -> Self {
        Self {
            graph: DiGraph::new(),
            region,
            nodes: HashMap::new(),
        }
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Adds a directed segment, returning the existing node if it is already present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a segment of another region.
    pub fn add_segment(&mut self, segment: Segment, time: u32) -> Result<NodeIndex, Error> {
        if segment.region != self.region {
            return Err(Error::InvalidData(format!(
                "Segment {segment} does not belong to {}",
                self.region
            )));
        }

        if let Some(&node) = self.nodes.get(&segment) {
            warn!("Segment {segment} added twice, keeping the first traversal time");
            return Ok(node);
        }

        let node = self.graph.add_node(RoadSegment { segment, time });
        self.nodes.insert(segment, node);
        Ok(node)
    }

    /// Adds the forward segment of a road unit and, for two-way roads, the backward one.
    ///
    /// # Errors
    ///
    /// See [`RegionGraph::add_segment`].
    pub fn add_road(
        &mut self,
        feature_id: u32,
        segment_index: u32,
        time: u32,
        two_way: bool,
    ) -> Result<(), Error> {
        let forward = Segment::new(self.region, feature_id, segment_index, true);
        self.add_segment(forward, time)?;
        if two_way {
            self.add_segment(forward.reversed(), time)?;
        }
        Ok(())
    }

    /// Allows moving from `from` onto `to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSegment`] if either segment is not in the graph.
    pub fn connect(&mut self, from: &Segment, to: &Segment, turn_penalty: u32) -> Result<(), Error> {
        let from_node = self.node(from).ok_or(Error::UnknownSegment(*from))?;
        let to_node = self.node(to).ok_or(Error::UnknownSegment(*to))?;

        let weight = self.graph[to_node].time.saturating_add(turn_penalty);
        self.graph.add_edge(from_node, to_node, weight);
        Ok(())
    }

    pub fn node(&self, segment: &Segment) -> Option<NodeIndex> {
        self.nodes.get(segment).copied()
    }

    pub fn segment_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Times from `start` to every reachable segment, including the
    /// traversal of both `start` and the reached segment.
    pub fn shortest_times(&self, start: NodeIndex) -> HashMap<NodeIndex, u32> {
        segment_times(self, start)
    }

    /// Travel time from `from` to each of `targets`, `None` when a target
    /// is unreachable or not part of the graph.
    pub fn travel_times(&self, from: &Segment, targets: &[Segment]) -> Vec<Option<f64>> {
        let Some(start) = self.node(from) else {
            return vec![None; targets.len()];
        };

        let times = self.shortest_times(start);
        targets
            .iter()
            .map(|target| {
                self.node(target)
                    .and_then(|node| times.get(&node))
                    .map(|&time| f64::from(time))
            })
            .collect()
    }
}
