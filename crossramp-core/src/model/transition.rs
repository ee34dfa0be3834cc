//! Transition record of one boundary road unit

use geo::Point;
use serde::{Deserialize, Serialize};

use super::Segment;

/// Position of a boundary unit in the enter and exit lists of a ramp.
///
/// A one-way unit is either an enter or an exit, a two-way unit is both:
/// one direction enters the region and the opposite one leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    OneWayEnter(u32),
    OneWayExit(u32),
    TwoWay { enter: u32, exit: u32 },
}

impl Side {
    pub fn enter_index(self) -> Option<u32> {
        match self {
            Side::OneWayEnter(enter) | Side::TwoWay { enter, .. } => Some(enter),
            Side::OneWayExit(_) => None,
        }
    }

    pub fn exit_index(self) -> Option<u32> {
        match self {
            Side::OneWayExit(exit) | Side::TwoWay { exit, .. } => Some(exit),
            Side::OneWayEnter(_) => None,
        }
    }

    pub fn is_one_way(self) -> bool {
        !matches!(self, Side::TwoWay { .. })
    }
}

/// A road unit lying on the region border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub side: Side,
    /// Start point of the unit in its forward direction
    pub back_point: Point<f64>,
    /// End point of the unit in its forward direction
    pub front_point: Point<f64>,
    /// Whether travelling the unit forward enters the region
    pub forward_is_enter: bool,
    /// Identifier shared with the twin unit of the neighbouring region (OSM way id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_id: Option<u64>,
}

impl Transition {
    pub fn enter_index(&self) -> Option<u32> {
        self.side.enter_index()
    }

    pub fn exit_index(&self) -> Option<u32> {
        self.side.exit_index()
    }

    pub fn is_one_way(&self) -> bool {
        self.side.is_one_way()
    }

    /// Whether `segment` travels this unit in the entering direction
    pub fn is_enter(&self, segment: &Segment) -> bool {
        segment.is_forward == self.forward_is_enter
    }

    /// `front_point` when the segment's direction matches `want_front`, `back_point` otherwise
    pub fn point(&self, is_forward: bool, want_front: bool) -> Point<f64> {
        if is_forward == want_front {
            self.front_point
        } else {
            self.back_point
        }
    }
}
