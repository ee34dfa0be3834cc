use geo::Point;
use hashbrown::HashMap;

use crate::{Key, RegionId, Segment, Transition};

/// Transitions of one region together with the enter and exit lists they index.
#[derive(Debug, Clone)]
pub(crate) struct TransitionTable {
    pub(crate) region: RegionId,
    pub(crate) transitions: HashMap<Key, Transition>,
    /// Cross-region id to feature id
    pub(crate) cross_ids: HashMap<u64, u32>,
    pub(crate) enters: Vec<Segment>,
    pub(crate) exits: Vec<Segment>,
}

impl TransitionTable {
    pub(crate) fn new(region: RegionId) -> Self {
        Self {
            region,
            transitions: HashMap::new(),
            cross_ids: HashMap::new(),
            enters: Vec::new(),
            exits: Vec::new(),
        }
    }

    pub(crate) fn transition(&self, segment: &Segment) -> Option<&Transition> {
        if segment.region != self.region {
            return None;
        }
        self.transitions.get(&segment.key())
    }

    /// # Panics
    ///
    /// If `segment` is not a boundary segment of this region.
    pub(crate) fn expect_transition(&self, segment: &Segment) -> &Transition {
        self.transition(segment)
            .unwrap_or_else(|| panic!("Segment {segment} is not a transition of {}", self.region))
    }

    pub(crate) fn is_transition(&self, segment: &Segment, is_outgoing: bool) -> bool {
        let Some(transition) = self.transition(segment) else {
            return false;
        };

        // One-way units are only travelled forward.
        if transition.is_one_way() && !segment.is_forward {
            return false;
        }

        transition.is_enter(segment) != is_outgoing
    }

    pub(crate) fn point(&self, segment: &Segment, want_front: bool) -> Point<f64> {
        self.expect_transition(segment).point(segment.is_forward, want_front)
    }

    pub(crate) fn transition_segment(
        &self,
        cross_id: u64,
        segment_index: u32,
        is_enter: bool,
    ) -> Option<Segment> {
        let feature_id = *self.cross_ids.get(&cross_id)?;
        let transition = self.transitions.get(&Key::new(feature_id, segment_index))?;

        if transition.cross_id != Some(cross_id) {
            return None;
        }

        let is_forward = transition.forward_is_enter == is_enter;
        if transition.is_one_way() && !is_forward {
            return None;
        }

        let segment = if is_enter {
            self.enters[transition.enter_index()? as usize]
        } else {
            self.exits[transition.exit_index()? as usize]
        };
        Some(segment)
    }

    pub(crate) fn cross_id(&self, segment: &Segment) -> Option<u64> {
        self.transition(segment)?.cross_id
    }
}
