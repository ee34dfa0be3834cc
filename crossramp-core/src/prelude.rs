// Re-export key components
pub use crate::collect::{BoundaryRoad, TransitionCollector};
pub use crate::leaps::fill_leaps;
pub use crate::loading::{BuildConfig, RegionFile, build_ramp};
pub use crate::region::RegionGraph;

// Core types of the transition index
pub use crate::{BoundaryTransition, Ramp, RampBuilder, RampParts, RampStats};
pub use crate::{Error, Key, RegionId, Segment, Side, Transition, Weight};
pub use crate::{VehicleMask, VehicleType};
