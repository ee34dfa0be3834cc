use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, RegionId, Segment,
    collect::{BoundaryRoad, TransitionCollector},
    region::RegionGraph,
};

/// Road unit of the region graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadRecord {
    pub feature_id: u32,
    pub segment_index: u32,
    /// Traversal time in seconds
    pub time: u32,
    #[serde(default)]
    pub two_way: bool,
}

/// Directed segment reference inside a region file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRef {
    pub feature_id: u32,
    pub segment_index: u32,
    #[serde(default = "forward")]
    pub forward: bool,
}

fn forward() -> bool {
    true
}

impl SegmentRef {
    pub fn segment(self, region: RegionId) -> Segment {
        Segment::new(region, self.feature_id, self.segment_index, self.forward)
    }
}

/// Permitted move from one segment onto the next
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub from: SegmentRef,
    pub to: SegmentRef,
    #[serde(default)]
    pub turn_penalty: u32,
}

/// JSON description of one compiled region: its road graph and the roads
/// crossing its border
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionFile {
    pub region: RegionId,
    pub roads: Vec<RoadRecord>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
    #[serde(default)]
    pub boundary: Vec<BoundaryRoad>,
}

impl RegionFile {
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a valid region description.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownSegment`] if a connection refers to a segment
    /// that no road provides.
    pub fn region_graph(&self) -> Result<RegionGraph, Error> {
        let mut graph = RegionGraph::new(self.region);
        for road in &self.roads {
            graph.add_road(road.feature_id, road.segment_index, road.time, road.two_way)?;
        }
        for connection in &self.connections {
            graph.connect(
                &connection.from.segment(self.region),
                &connection.to.segment(self.region),
                connection.turn_penalty,
            )?;
        }
        Ok(graph)
    }

    pub fn collector(&self) -> TransitionCollector {
        self.boundary.iter().cloned().collect()
    }
}
