//! Blood type and stock models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the eight ABO/Rh blood groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    /// All blood types in display order.
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    /// Display label (e.g. "AB-").
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is not one of the eight blood types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown blood type: {0}")]
pub struct UnknownBloodType(pub String);

impl FromStr for BloodType {
    type Err = UnknownBloodType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        BloodType::ALL
            .into_iter()
            .find(|bt| bt.as_str() == label)
            .ok_or_else(|| UnknownBloodType(s.to_string()))
    }
}

/// Available units for a single blood type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodStock {
    #[serde(rename = "type")]
    pub blood_type: BloodType,
    pub units: u32,
}

/// Traffic-light classification of a stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockLevel {
    Critical,
    Low,
    Healthy,
}

impl StockLevel {
    fn classify(units: u32, critical_below: u32, low_below: u32) -> Self {
        if units < critical_below {
            StockLevel::Critical
        } else if units < low_below {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }
}

impl BloodStock {
    pub fn new(blood_type: BloodType, units: u32) -> Self {
        Self { blood_type, units }
    }

    /// Level shown on inventory cards (critical below 10, low below 20).
    pub fn card_level(&self) -> StockLevel {
        StockLevel::classify(self.units, 10, 20)
    }

    /// Level shown on the fill gauge (critical below 30, low below 60).
    pub fn gauge_level(&self) -> StockLevel {
        StockLevel::classify(self.units, 30, 60)
    }
}
