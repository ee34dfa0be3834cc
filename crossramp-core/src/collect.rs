//! Collection of boundary roads for all vehicle types at once.
//!
//! While a region is compiled, every road crossing its border is recorded
//! once, together with the vehicle types allowed on it and the vehicle
//! types for which it is one-way. A ramp is then prepared per vehicle type
//! from this shared list.

use geo::Point;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{BoundaryTransition, Key, RampBuilder, RegionId, VehicleMask, VehicleType};

/// Road unit crossing the region border, with per-vehicle access masks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRoad {
    /// OSM way id shared with the neighbouring region
    pub cross_id: u64,
    pub feature_id: u32,
    pub segment_index: u32,
    /// Vehicles allowed on the road
    pub road_mask: VehicleMask,
    /// Vehicles for which the road is one-way
    #[serde(default)]
    pub one_way_mask: VehicleMask,
    pub forward_is_enter: bool,
    pub back_point: Point<f64>,
    pub front_point: Point<f64>,
}

impl BoundaryRoad {
    pub fn key(&self) -> Key {
        Key::new(self.feature_id, self.segment_index)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransitionCollector {
    roads: Vec<BoundaryRoad>,
}

impl TransitionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, road: BoundaryRoad) {
        self.roads.push(road);
    }

    pub fn roads(&self) -> &[BoundaryRoad] {
        &self.roads
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    /// Builder holding the transitions usable by `vehicle`.
    ///
    /// Roads closed to the vehicle are skipped. Transitions are added in key
    /// order so enter and exit numbering does not depend on collection order.
    pub fn prepare(&self, region: RegionId, vehicle: VehicleType) -> RampBuilder {
        let mut builder = RampBuilder::new(region);

        for road in self
            .roads
            .iter()
            .filter(|road| road.road_mask.contains(vehicle))
            .sorted_by_key(|road| road.key())
        {
            builder.push(BoundaryTransition {
                cross_id: Some(road.cross_id),
                feature_id: road.feature_id,
                segment_index: road.segment_index,
                one_way: road.one_way_mask.contains(vehicle),
                forward_is_enter: road.forward_is_enter,
                back_point: road.back_point,
                front_point: road.front_point,
            });
        }

        info!(
            "{vehicle} ramp of {region}: {} transitions, {} enters, {} exits",
            builder.transition_count(),
            builder.enters().len(),
            builder.exits().len()
        );
        builder
    }
}

impl FromIterator<BoundaryRoad> for TransitionCollector {
    fn from_iter<T: IntoIterator<Item = BoundaryRoad>>(iter: T) -> Self {
        Self {
            roads: iter.into_iter().collect(),
        }
    }
}
