use geo::Point;
use hashbrown::hash_map::Entry;
use log::{debug, warn};
use rayon::prelude::*;

use super::{Ramp, table::TransitionTable};
use crate::{Key, RegionId, Segment, Side, Transition, Weight};

/// Description of one boundary road unit handed to [`RampBuilder::push`]
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryTransition {
    pub cross_id: Option<u64>,
    pub feature_id: u32,
    pub segment_index: u32,
    pub one_way: bool,
    pub forward_is_enter: bool,
    pub back_point: Point<f64>,
    pub front_point: Point<f64>,
}

/// Ramp under construction.
///
/// Transitions are added while the region's road graph is compiled, then
/// [`RampBuilder::fill_weights`] computes the enter × exit matrix and turns
/// the builder into a read-only [`Ramp`].
#[derive(Debug, Clone)]
pub struct RampBuilder {
    table: TransitionTable,
}

impl RampBuilder {
    pub fn new(region: RegionId) -> Self {
        Self {
            table: TransitionTable::new(region),
        }
    }

    pub fn region(&self) -> RegionId {
        self.table.region
    }

    /// Registers a boundary road unit.
    ///
    /// The forward segment of the unit goes to the enter list when
    /// `forward_is_enter`, to the exit list otherwise. A two-way unit also
    /// gets its backward segment appended to the complementary list.
    ///
    /// Must be called at most once per `(feature_id, segment_index)`: a
    /// second call replaces the transition but its old segments stay in the
    /// lists.
    pub fn add_transition(
        &mut self,
        feature_id: u32,
        segment_index: u32,
        one_way: bool,
        forward_is_enter: bool,
        back_point: Point<f64>,
        front_point: Point<f64>,
    ) {
        self.push(BoundaryTransition {
            cross_id: None,
            feature_id,
            segment_index,
            one_way,
            forward_is_enter,
            back_point,
            front_point,
        });
    }

    /// Same as [`RampBuilder::add_transition`], also recording the
    /// cross-region id shared with the twin unit of the neighbouring region.
    ///
    /// A cross id stays with the first feature that claims it. Later units of
    /// other features carrying the same id are added without one.
    pub fn push(&mut self, boundary: BoundaryTransition) {
        let region = self.table.region;
        let key = Key::new(boundary.feature_id, boundary.segment_index);
        let forward = key.segment(region, true);

        let mut enter = None;
        let mut exit = None;
        if boundary.forward_is_enter {
            enter = Some(push_segment(&mut self.table.enters, forward));
        } else {
            exit = Some(push_segment(&mut self.table.exits, forward));
        }

        if !boundary.one_way {
            let backward = forward.reversed();
            if boundary.forward_is_enter {
                exit = Some(push_segment(&mut self.table.exits, backward));
            } else {
                enter = Some(push_segment(&mut self.table.enters, backward));
            }
        }

        let side = match (enter, exit) {
            (Some(enter), Some(exit)) => Side::TwoWay { enter, exit },
            (Some(enter), None) => Side::OneWayEnter(enter),
            (None, Some(exit)) => Side::OneWayExit(exit),
            (None, None) => unreachable!("a transition always has at least one segment"),
        };

        let mut cross_id = boundary.cross_id;
        if let Some(id) = cross_id {
            match self.table.cross_ids.entry(id) {
                Entry::Vacant(slot) => {
                    slot.insert(boundary.feature_id);
                }
                Entry::Occupied(slot) if *slot.get() != boundary.feature_id => {
                    warn!(
                        "Cross id {id} of feature {} already belongs to feature {}, dropped",
                        boundary.feature_id,
                        slot.get()
                    );
                    cross_id = None;
                }
                Entry::Occupied(_) => {}
            }
        }

        let transition = Transition {
            side,
            back_point: boundary.back_point,
            front_point: boundary.front_point,
            forward_is_enter: boundary.forward_is_enter,
            cross_id,
        };
        if self.table.transitions.insert(key, transition).is_some() {
            warn!(
                "Transition {}/{} of {region} added twice, stale segments left in enter/exit lists",
                key.feature_id, key.segment_index
            );
        }
    }

    pub fn enters(&self) -> &[Segment] {
        &self.table.enters
    }

    pub fn exits(&self) -> &[Segment] {
        &self.table.exits
    }

    pub fn transition(&self, key: &Key) -> Option<&Transition> {
        self.table.transitions.get(key)
    }

    pub fn transition_count(&self) -> usize {
        self.table.transitions.len()
    }

    pub fn is_transition(&self, segment: &Segment, is_outgoing: bool) -> bool {
        self.table.is_transition(segment, is_outgoing)
    }

    /// # Panics
    ///
    /// If `segment` is not a transition of this region.
    pub fn point(&self, segment: &Segment, want_front: bool) -> Point<f64> {
        self.table.point(segment, want_front)
    }

    /// Fills the weight matrix pair by pair.
    ///
    /// `calc` returns the intra-region cost from an enter to an exit, `None`
    /// when the exit cannot be reached. Rows are computed in parallel.
    ///
    /// # Panics
    ///
    /// If `calc` returns a negative, NaN or oversized cost.
    pub fn fill_weights<F>(self, calc: F) -> Ramp
    where
        F: Fn(&Segment, &Segment) -> Option<f64> + Sync,
    {
        self.fill_weights_by_row(|enter, exits| {
            exits.iter().map(|exit| calc(enter, exit)).collect()
        })
    }

    /// Fills the weight matrix one enter at a time.
    ///
    /// `row` gets an enter and the full exit list and returns the cost to
    /// every exit in exit order. This suits calculators that run one
    /// shortest-path wave per enter.
    ///
    /// # Panics
    ///
    /// If a row has the wrong length or holds an invalid cost.
    pub fn fill_weights_by_row<F>(self, row: F) -> Ramp
    where
        F: Fn(&Segment, &[Segment]) -> Vec<Option<f64>> + Sync,
    {
        let TransitionTable { enters, exits, .. } = &self.table;
        let num_exits = exits.len();
        let mut weights = vec![Weight::NO_ROUTE; enters.len() * num_exits];

        debug!(
            "Filling {} x {} weights of {}",
            enters.len(),
            num_exits,
            self.table.region
        );

        // Each row owns a disjoint chunk of the preallocated buffer.
        if num_exits > 0 {
            weights
                .par_chunks_mut(num_exits)
                .zip(enters.par_iter())
                .for_each(|(chunk, enter)| {
                    let costs = row(enter, exits);
                    assert_eq!(
                        costs.len(),
                        num_exits,
                        "Weight row of {enter} has {} values for {num_exits} exits",
                        costs.len()
                    );
                    for (slot, cost) in chunk.iter_mut().zip(costs) {
                        *slot = Weight::from_cost(cost);
                    }
                });
        }

        Ramp::from_table(self.table, weights)
    }
}

fn push_segment(list: &mut Vec<Segment>, segment: Segment) -> u32 {
    let index = u32::try_from(list.len()).expect("more than u32::MAX transition segments");
    list.push(segment);
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> RampBuilder {
        RampBuilder::new(RegionId(1))
    }

    fn add(builder: &mut RampBuilder, feature_id: u32, one_way: bool, forward_is_enter: bool) {
        builder.add_transition(
            feature_id,
            0,
            one_way,
            forward_is_enter,
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        );
    }

    #[test]
    fn two_way_transition_has_both_sides() {
        for forward_is_enter in [true, false] {
            let mut builder = builder();
            add(&mut builder, 1, false, forward_is_enter);

            let transition = builder.transition(&Key::new(1, 0)).unwrap();
            let enter = builder.enters()[transition.enter_index().unwrap() as usize];
            let exit = builder.exits()[transition.exit_index().unwrap() as usize];

            assert_ne!(enter.is_forward, exit.is_forward);
            assert_eq!(enter.is_forward, forward_is_enter);
            assert_eq!(enter.key(), exit.key());
        }
    }

    #[test]
    fn one_way_transition_has_one_side() {
        let mut builder = builder();
        add(&mut builder, 1, true, true);
        add(&mut builder, 2, true, false);

        let enter_only = builder.transition(&Key::new(1, 0)).unwrap();
        assert_eq!(enter_only.side, Side::OneWayEnter(0));

        let exit_only = builder.transition(&Key::new(2, 0)).unwrap();
        assert_eq!(exit_only.side, Side::OneWayExit(0));

        assert_eq!(builder.enters(), &[Segment::new(RegionId(1), 1, 0, true)]);
        assert_eq!(builder.exits(), &[Segment::new(RegionId(1), 2, 0, true)]);
    }

    #[test]
    fn indices_follow_insertion_order() {
        let mut builder = builder();
        add(&mut builder, 1, false, true);
        add(&mut builder, 2, false, false);
        add(&mut builder, 3, true, true);

        assert_eq!(builder.enters().len(), 3);
        assert_eq!(builder.exits().len(), 2);
        assert_eq!(
            builder.transition(&Key::new(2, 0)).unwrap().side,
            Side::TwoWay { enter: 1, exit: 1 }
        );
        assert_eq!(
            builder.transition(&Key::new(3, 0)).unwrap().side,
            Side::OneWayEnter(2)
        );
    }

    #[test]
    fn repeated_key_replaces_transition() {
        let mut builder = builder();
        add(&mut builder, 1, true, true);
        add(&mut builder, 1, true, true);

        assert_eq!(builder.transition_count(), 1);
        assert_eq!(builder.enters().len(), 2);
        assert_eq!(
            builder.transition(&Key::new(1, 0)).unwrap().side,
            Side::OneWayEnter(1)
        );
    }

    #[test]
    fn fill_weights_sizes_matrix() {
        let mut builder = builder();
        add(&mut builder, 1, false, true);
        add(&mut builder, 2, false, true);
        add(&mut builder, 3, true, true);

        let ramp = builder.fill_weights(|_, _| Some(1.0));
        assert_eq!(ramp.weights().len(), ramp.enters().len() * ramp.exits().len());
        assert_eq!(ramp.weights().len(), 3 * 2);
    }

    #[test]
    fn fill_weights_without_exits() {
        let mut builder = builder();
        add(&mut builder, 1, true, true);

        let ramp = builder.fill_weights(|_, _| Some(1.0));
        assert!(ramp.weights().is_empty());
        assert!(ramp.outgoing_edges(&Segment::new(RegionId(1), 1, 0, true)).is_empty());
    }

    #[test]
    fn fill_weights_is_enter_major() {
        let mut builder = builder();
        add(&mut builder, 1, false, true);
        add(&mut builder, 2, false, true);

        let ramp = builder.fill_weights(|enter, exit| {
            Some(f64::from(enter.feature_id * 10 + exit.feature_id))
        });
        let secs: Vec<_> = ramp.weights().iter().map(|w| w.secs().unwrap()).collect();
        assert_eq!(secs, vec![11, 12, 21, 22]);
    }

    #[test]
    fn large_matrix_rows_land_in_place() {
        let mut builder = builder();
        for feature_id in 0..64 {
            add(&mut builder, feature_id, false, true);
        }
        let cost = |enter: &Segment, exit: &Segment| {
            (enter.feature_id % 7 != exit.feature_id % 5)
                .then(|| f64::from(enter.feature_id * 100 + exit.feature_id))
        };

        let ramp = builder.fill_weights(cost);
        let (enters, exits) = (ramp.enters(), ramp.exits());
        assert_eq!((enters.len(), exits.len()), (64, 64));

        for (i, enter) in enters.iter().enumerate() {
            for (j, exit) in exits.iter().enumerate() {
                assert_eq!(
                    ramp.weights()[i * exits.len() + j],
                    Weight::from_cost(cost(enter, exit)),
                    "weight of {enter} -> {exit}"
                );
            }
        }
    }

    #[test]
    fn shared_cross_id_stays_with_first_feature() {
        let mut builder = builder();
        for feature_id in [5, 3] {
            builder.push(BoundaryTransition {
                cross_id: Some(100),
                feature_id,
                segment_index: 0,
                one_way: false,
                forward_is_enter: true,
                back_point: Point::new(0.0, 0.0),
                front_point: Point::new(1.0, 0.0),
            });
        }

        assert_eq!(builder.transition(&Key::new(5, 0)).unwrap().cross_id, Some(100));
        assert_eq!(builder.transition(&Key::new(3, 0)).unwrap().cross_id, None);
    }

    #[test]
    #[should_panic(expected = "has 1 values for 2 exits")]
    fn short_row_panics() {
        let mut builder = builder();
        add(&mut builder, 1, false, true);
        add(&mut builder, 2, false, true);

        let _ = builder.fill_weights_by_row(|_, _| vec![Some(1.0)]);
    }
}
