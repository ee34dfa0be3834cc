//! Value types shared by the ramp, the region graph and the loaders.

pub mod segment;
pub mod transition;
pub mod vehicle;
pub mod weight;

pub use segment::{Key, RegionId, Segment};
pub use transition::{Side, Transition};
pub use vehicle::{VehicleMask, VehicleType};
pub use weight::Weight;
