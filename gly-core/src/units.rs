//! Conversion between mg/dL and mmol/L.
//!
//! Values are stored in mg/dL. Converting to mmol/L keeps one decimal place,
//! converting back to mg/dL keeps none, so a round trip lands within 1 mg/dL
//! of the starting value across the physiological range.

use crate::error::GlyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// mg/dL per mmol/L for glucose.
pub const MGDL_PER_MMOL: f64 = 18.0;

/// Display unit for glucose concentration.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
pub enum GlucoseUnit {
    #[default]
    #[serde(rename = "mg/dL")]
    MgDl,
    #[serde(rename = "mmol/L")]
    MmolL,
}

impl fmt::Display for GlucoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlucoseUnit::MgDl => write!(f, "mg/dL"),
            GlucoseUnit::MmolL => write!(f, "mmol/L"),
        }
    }
}

impl FromStr for GlucoseUnit {
    type Err = GlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mg/dl" | "mgdl" | "mg" => Ok(GlucoseUnit::MgDl),
            "mmol/l" | "mmoll" | "mmol" => Ok(GlucoseUnit::MmolL),
            _ => Err(GlyError::UnknownUnit(s.trim().to_string())),
        }
    }
}

/// Clinical breakpoints for a display unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRanges {
    pub low: f64,
    pub normal: f64,
    pub high: f64,
    pub critical: f64,
}

const MGDL_RANGES: TargetRanges = TargetRanges {
    low: 70.0,
    normal: 130.0,
    high: 160.0,
    critical: 200.0,
};

// Published equivalents, not computed from MGDL_RANGES.
const MMOL_RANGES: TargetRanges = TargetRanges {
    low: 3.9,
    normal: 7.2,
    high: 8.9,
    critical: 11.1,
};

/// mg/dL to mmol/L, rounded to one decimal.
pub fn mgdl_to_mmol_l(value: f64) -> f64 {
    (value / MGDL_PER_MMOL * 10.0).round() / 10.0
}

/// mmol/L to mg/dL, rounded to a whole number.
pub fn mmol_l_to_mgdl(value: f64) -> f64 {
    (value * MGDL_PER_MMOL).round()
}

/// Convert `value` from one unit to another. Same-unit conversion returns
/// the value untouched, without rounding.
pub fn convert_glucose_value(value: f64, from: GlucoseUnit, to: GlucoseUnit) -> f64 {
    match (from, to) {
        (GlucoseUnit::MgDl, GlucoseUnit::MmolL) => mgdl_to_mmol_l(value),
        (GlucoseUnit::MmolL, GlucoseUnit::MgDl) => mmol_l_to_mgdl(value),
        _ => value,
    }
}

/// Render a stored mg/dL value in the requested display unit, e.g.
/// `"100 mg/dL"` or `"5.6 mmol/L"`.
pub fn format_glucose_value(value: f64, unit: GlucoseUnit) -> String {
    match unit {
        GlucoseUnit::MgDl => format!("{} {}", value.round() as i64, unit),
        GlucoseUnit::MmolL => format!("{:.1} {}", mgdl_to_mmol_l(value), unit),
    }
}

pub fn get_target_ranges(unit: GlucoseUnit) -> TargetRanges {
    match unit {
        GlucoseUnit::MgDl => MGDL_RANGES,
        GlucoseUnit::MmolL => MMOL_RANGES,
    }
}
