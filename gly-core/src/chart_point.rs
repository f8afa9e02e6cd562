use crate::reading::{GlucoseReading, GlucoseSample};
use serde::{Deserialize, Serialize};

/// A reading prepared for charting.
///
/// `x` and `y` mirror `timestamp` and `value` as floats for the triangle
/// geometry in downsampling. Smoothing later replaces `value` but leaves
/// `x`/`y` and `timestamp` as they were.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub value: f64,
    pub timestamp: i64,
    pub x: f64,
    pub y: f64,
}

impl From<GlucoseReading> for ChartPoint {
    fn from(reading: GlucoseReading) -> Self {
        Self {
            value: reading.value,
            timestamp: reading.timestamp,
            x: reading.timestamp as f64,
            y: reading.value,
        }
    }
}

impl From<&GlucoseReading> for ChartPoint {
    fn from(reading: &GlucoseReading) -> Self {
        (*reading).into()
    }
}

impl From<ChartPoint> for GlucoseReading {
    fn from(point: ChartPoint) -> Self {
        GlucoseReading::new(point.value, point.timestamp)
    }
}

impl GlucoseSample for ChartPoint {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn with_value(&self, value: f64) -> Self {
        Self { value, ..*self }
    }
}
