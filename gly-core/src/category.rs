use crate::units::{mmol_l_to_mgdl, GlucoseUnit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this (mg/dL) a value is low.
pub const LOW_THRESHOLD_MGDL: f64 = 70.0;
/// Above this (mg/dL) a value is high.
pub const HIGH_THRESHOLD_MGDL: f64 = 180.0;

/// Display bucket for a single glucose value.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlucoseCategory {
    Low,
    Normal,
    High,
}

impl fmt::Display for GlucoseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GlucoseCategory::Low => "low",
            GlucoseCategory::Normal => "normal",
            GlucoseCategory::High => "high",
        };
        write!(f, "{label}")
    }
}

/// Classify `value`, given in `unit`. Both thresholds are inclusive of
/// the normal band: 70 and 180 mg/dL are normal.
pub fn get_glucose_category(value: f64, unit: GlucoseUnit) -> GlucoseCategory {
    let mgdl = match unit {
        GlucoseUnit::MgDl => value,
        GlucoseUnit::MmolL => mmol_l_to_mgdl(value),
    };
    if mgdl < LOW_THRESHOLD_MGDL {
        GlucoseCategory::Low
    } else if mgdl > HIGH_THRESHOLD_MGDL {
        GlucoseCategory::High
    } else {
        GlucoseCategory::Normal
    }
}
