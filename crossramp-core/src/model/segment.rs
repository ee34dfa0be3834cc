//! Directed road segments and the direction-agnostic transition key

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an independently compiled map region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

/// One directed traversable unit of road geometry inside a region.
///
/// `feature_id` and `segment_index` locate the unit in the region's road
/// features, `is_forward` selects the direction of travel along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub region: RegionId,
    pub feature_id: u32,
    pub segment_index: u32,
    pub is_forward: bool,
}

impl Segment {
    pub fn new(region: RegionId, feature_id: u32, segment_index: u32, is_forward: bool) -> Self {
        Self {
            region,
            feature_id,
            segment_index,
            is_forward,
        }
    }

    /// Key of the road unit regardless of direction
    pub fn key(&self) -> Key {
        Key::new(self.feature_id, self.segment_index)
    }

    /// Same road unit travelled the other way
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            is_forward: !self.is_forward,
            ..*self
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}/{}{}",
            self.region,
            self.feature_id,
            self.segment_index,
            if self.is_forward { "+" } else { "-" }
        )
    }
}

/// Lookup key of a transition: a road unit without direction.
///
/// A bidirectional boundary unit is one key serving both as an enter and
/// as an exit, depending on the direction it is travelled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    pub feature_id: u32,
    pub segment_index: u32,
}

impl Key {
    pub fn new(feature_id: u32, segment_index: u32) -> Self {
        Self {
            feature_id,
            segment_index,
        }
    }

    /// Directed segment of this road unit in `region`
    pub fn segment(self, region: RegionId, is_forward: bool) -> Segment {
        Segment::new(region, self.feature_id, self.segment_index, is_forward)
    }
}

impl From<&Segment> for Key {
    fn from(segment: &Segment) -> Self {
        segment.key()
    }
}
