//! Cross-region transition index ("ramp") for tile-partitioned road routing.
//!
//! A region of the road network is compiled independently of its neighbours.
//! To let a single search cross from one region into another, every region
//! carries a [`Ramp`]: the list of boundary segments through which a route can
//! enter or leave the region, and a dense matrix of intra-region travel times
//! between every enter and every exit.
//!
//! A ramp is assembled with a [`RampBuilder`] and becomes a read-only [`Ramp`]
//! once its weight matrix is filled.

pub mod collect;
pub mod error;
pub mod export;
pub mod leaps;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod ramp;
pub mod region;

pub use error::Error;
pub use model::{Key, RegionId, Segment, Side, Transition, VehicleMask, VehicleType, Weight};
pub use ramp::{BoundaryTransition, Ramp, RampBuilder, RampParts, RampStats};
