use geo::Point;
use serde::{Deserialize, Serialize};

use super::{RampParts, table::TransitionTable};
use crate::{Key, RegionId, Segment, Transition, Weight};

/// Read-only transition index of one region with its filled weight matrix.
///
/// Weights are stored enter-major: the weight from enter `i` to exit `j`
/// lives at `i * exits.len() + j`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "RampParts", try_from = "RampParts")]
pub struct Ramp {
    pub(crate) table: TransitionTable,
    pub(crate) weights: Vec<Weight>,
}

/// Connectivity summary of a filled ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RampStats {
    pub transitions: usize,
    pub enters: usize,
    pub exits: usize,
    pub routes: usize,
    pub no_routes: usize,
}

impl Ramp {
    pub(crate) fn from_table(table: TransitionTable, weights: Vec<Weight>) -> Self {
        debug_assert_eq!(weights.len(), table.enters.len() * table.exits.len());
        Self { table, weights }
    }

    pub fn region(&self) -> RegionId {
        self.table.region
    }

    pub fn enters(&self) -> &[Segment] {
        &self.table.enters
    }

    pub fn exits(&self) -> &[Segment] {
        &self.table.exits
    }

    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    pub fn transition(&self, key: &Key) -> Option<&Transition> {
        self.table.transitions.get(key)
    }

    pub fn transitions(&self) -> impl Iterator<Item = (&Key, &Transition)> {
        self.table.transitions.iter()
    }

    pub fn transition_count(&self) -> usize {
        self.table.transitions.len()
    }

    /// Whether `segment` crosses the region border in the requested direction.
    ///
    /// A segment travelling a unit in its entering direction is an incoming
    /// transition (`is_outgoing == false`), one travelling the leaving
    /// direction an outgoing one. The backward direction of a one-way unit is
    /// never a transition.
    pub fn is_transition(&self, segment: &Segment, is_outgoing: bool) -> bool {
        self.table.is_transition(segment, is_outgoing)
    }

    /// Front or back point of the transition unit as seen from `segment`.
    ///
    /// # Panics
    ///
    /// If `segment` is not a transition of this region.
    pub fn point(&self, segment: &Segment, want_front: bool) -> Point<f64> {
        self.table.point(segment, want_front)
    }

    /// Enter (or exit) segment of the unit with the given cross-region id,
    /// used to step from a neighbouring region's exit onto this region's enter.
    pub fn transition_segment(
        &self,
        cross_id: u64,
        segment_index: u32,
        is_enter: bool,
    ) -> Option<Segment> {
        self.table.transition_segment(cross_id, segment_index, is_enter)
    }

    /// Cross-region id of the unit `segment` travels along
    pub fn cross_id(&self, segment: &Segment) -> Option<u64> {
        self.table.cross_id(segment)
    }

    /// Weight from enter `enter_idx` to exit `exit_idx`, `None` when unreachable.
    ///
    /// # Panics
    ///
    /// If either index is out of range.
    pub fn weight(&self, enter_idx: usize, exit_idx: usize) -> Option<Weight> {
        let weight = self.weights[self.weight_index(enter_idx, exit_idx)];
        weight.is_route().then_some(weight)
    }

    fn weight_index(&self, enter_idx: usize, exit_idx: usize) -> usize {
        let num_enters = self.table.enters.len();
        let num_exits = self.table.exits.len();
        assert!(
            enter_idx < num_enters,
            "Enter index {enter_idx} out of range ({num_enters} enters)"
        );
        assert!(
            exit_idx < num_exits,
            "Exit index {exit_idx} out of range ({num_exits} exits)"
        );
        enter_idx * num_exits + exit_idx
    }

    /// Appends the weighted edges implied by crossing the border at `segment`.
    ///
    /// Outgoing: `segment` is an enter, edges lead to every reachable exit.
    /// Ingoing: `segment` is an exit, edges come from every enter it is
    /// reachable from. Unreachable pairs are skipped.
    ///
    /// # Panics
    ///
    /// If `segment` is not a transition of this region, or the transition
    /// has no enter (outgoing) or no exit (ingoing).
    pub fn edges(&self, segment: &Segment, is_outgoing: bool, out: &mut Vec<(Segment, f64)>) {
        let transition = self.table.expect_transition(segment);

        if is_outgoing {
            let enter_idx = transition
                .enter_index()
                .unwrap_or_else(|| panic!("Segment {segment} has no enter side"));
            let enter_idx = enter_idx as usize;
            out.extend(
                self.table
                    .exits
                    .iter()
                    .enumerate()
                    .filter_map(|(exit_idx, exit)| {
                        self.weight(enter_idx, exit_idx)
                            .map(|weight| (*exit, weight.as_f64()))
                    }),
            );
        } else {
            let exit_idx = transition
                .exit_index()
                .unwrap_or_else(|| panic!("Segment {segment} has no exit side"));
            let exit_idx = exit_idx as usize;
            out.extend(
                self.table
                    .enters
                    .iter()
                    .enumerate()
                    .filter_map(|(enter_idx, enter)| {
                        self.weight(enter_idx, exit_idx)
                            .map(|weight| (*enter, weight.as_f64()))
                    }),
            );
        }
    }

    pub fn outgoing_edges(&self, segment: &Segment) -> Vec<(Segment, f64)> {
        let mut edges = Vec::new();
        self.edges(segment, true, &mut edges);
        edges
    }

    pub fn ingoing_edges(&self, segment: &Segment) -> Vec<(Segment, f64)> {
        let mut edges = Vec::new();
        self.edges(segment, false, &mut edges);
        edges
    }

    pub fn stats(&self) -> RampStats {
        let routes = self.weights.iter().filter(|w| w.is_route()).count();
        RampStats {
            transitions: self.table.transitions.len(),
            enters: self.table.enters.len(),
            exits: self.table.exits.len(),
            routes,
            no_routes: self.weights.len() - routes,
        }
    }
}
