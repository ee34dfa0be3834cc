//! Vehicle types and road access masks

use std::{fmt, ops::BitOr, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Vehicle a ramp is prepared for. Each vehicle type gets its own ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Pedestrian,
    Bicycle,
    #[default]
    Car,
    Transit,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Pedestrian,
        VehicleType::Bicycle,
        VehicleType::Car,
        VehicleType::Transit,
    ];

    pub fn mask(self) -> VehicleMask {
        VehicleMask(1 << self as u8)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Pedestrian => "pedestrian",
            VehicleType::Bicycle => "bicycle",
            VehicleType::Car => "car",
            VehicleType::Transit => "transit",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .into_iter()
            .find(|vehicle| vehicle.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidData(format!("Unknown vehicle type: {s}")))
    }
}

/// Set of vehicle types, one bit per [`VehicleType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleMask(u8);

impl VehicleMask {
    pub const EMPTY: VehicleMask = VehicleMask(0);
    pub const ALL: VehicleMask = VehicleMask(0b1111);

    pub fn from_bits(bits: u8) -> Self {
        VehicleMask(bits & Self::ALL.0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, vehicle: VehicleType) -> bool {
        self.0 & vehicle.mask().0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for VehicleMask {
    type Output = VehicleMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        VehicleMask(self.0 | rhs.0)
    }
}

impl BitOr<VehicleType> for VehicleMask {
    type Output = VehicleMask;

    fn bitor(self, rhs: VehicleType) -> Self::Output {
        self | rhs.mask()
    }
}

impl FromIterator<VehicleType> for VehicleMask {
    fn from_iter<T: IntoIterator<Item = VehicleType>>(iter: T) -> Self {
        iter.into_iter().fold(VehicleMask::EMPTY, |mask, v| mask | v)
    }
}
