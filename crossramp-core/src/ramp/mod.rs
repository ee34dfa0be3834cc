//! The cross-region transition index in its two states:
//! [`RampBuilder`] while transitions are collected and [`Ramp`] once the
//! weight matrix is filled.

mod builder;
mod filled;
mod parts;
mod table;

pub use builder::{BoundaryTransition, RampBuilder};
pub use filled::{Ramp, RampStats};
pub use parts::RampParts;
