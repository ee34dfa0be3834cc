//! Travel time between an enter and an exit of a ramp

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whole seconds of travel, rounded up from the calculated cost.
///
/// "No route" is stored out of band as [`Weight::NO_ROUTE`], so every
/// value from zero up to [`Weight::MAX_SECS`] is a real travel time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(u32);

impl Weight {
    pub const NO_ROUTE: Weight = Weight(u32::MAX);
    pub const MAX_SECS: u32 = u32::MAX - 1;

    /// Weight of a route lasting `secs` seconds
    ///
    /// # Panics
    ///
    /// If `secs` collides with the no-route encoding.
    pub fn from_secs(secs: u32) -> Self {
        assert!(
            secs <= Self::MAX_SECS,
            "Weight of {secs}s collides with the no-route encoding"
        );
        Weight(secs)
    }

    /// Rounds a calculated cost up to whole seconds, `None` meaning no route.
    ///
    /// Costs are rounded up so that stored weights never undercut an
    /// admissible A* heuristic.
    ///
    /// # Panics
    ///
    /// If the cost is negative, NaN, or too large to be stored.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_cost(cost: Option<f64>) -> Self {
        let Some(cost) = cost else {
            return Self::NO_ROUTE;
        };
        assert!(
            cost >= 0.0,
            "Calculated cost must be non-negative, got {cost}"
        );
        let secs = cost.ceil();
        assert!(
            secs <= f64::from(Self::MAX_SECS),
            "Calculated cost {cost} does not fit into a weight"
        );
        Weight(secs as u32)
    }

    pub fn is_route(self) -> bool {
        self != Self::NO_ROUTE
    }

    /// Seconds of travel, `None` when there is no route
    pub fn secs(self) -> Option<u32> {
        self.is_route().then_some(self.0)
    }

    /// Raw stored value, [`u32::MAX`] for no route
    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secs() {
            Some(secs) => write!(f, "{secs}s"),
            None => f.write_str("no route"),
        }
    }
}
