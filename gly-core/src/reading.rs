use crate::error::{GlyError, Result};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single glucose reading.
///
/// `value` is a concentration in mg/dL and `timestamp` is milliseconds since
/// the Unix epoch. Readings are never mutated by the analysis code; derived
/// series are built from copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlucoseReading {
    pub value: f64,
    pub timestamp: i64,
}

impl GlucoseReading {
    pub fn new(value: f64, timestamp: i64) -> Self {
        Self { value, timestamp }
    }

    /// Build a reading from any zoned `chrono` date time.
    pub fn at<Tz: TimeZone>(value: f64, when: &DateTime<Tz>) -> Self {
        Self {
            value,
            timestamp: when.timestamp_millis(),
        }
    }

    /// Ordering by timestamp only, for sorting mixed sensor/manual series.
    pub fn cmp_by_time(&self, other: &Self) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

/// Anything carrying a timestamped glucose value.
///
/// Implemented by [`GlucoseReading`] and [`crate::ChartPoint`] so the chart
/// smoothing pass can run over either.
pub trait GlucoseSample {
    fn timestamp(&self) -> i64;
    fn value(&self) -> f64;
    /// Copy of `self` with only the glucose value replaced.
    fn with_value(&self, value: f64) -> Self
    where
        Self: Sized;
}

impl GlucoseSample for GlucoseReading {
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

/// Parse a timestamp given either as epoch milliseconds or as RFC 3339.
pub fn parse_timestamp(s: &str) -> Result<i64> {
    let trimmed = s.trim();
    if let Ok(ms) = trimmed.parse::<i64>() {
        return Ok(ms);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| GlyError::InvalidTimestamp(trimmed.to_string()))
}

/// Parse a glucose value in mg/dL.
pub fn parse_value(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| GlyError::InvalidValue(trimmed.to_string()))
}
