//! This module is responsible for loading region descriptions and build
//! settings from disk and turning them into filled ramps.

mod builder;
mod config;
mod region_file;

pub use builder::build_ramp;
pub use config::BuildConfig;
pub use region_file::{ConnectionRecord, RegionFile, RoadRecord, SegmentRef};
