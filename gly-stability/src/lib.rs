//! Glycemic stability scoring.
//!
//! Turns a window of glucose readings and meal times into a 0-100 score
//! built from five raw components:
//!
//! - post-meal excursion: winsorized mean rise from pre-meal baseline to
//!   post-meal peak
//! - daytime and overnight variability: mean absolute deviation of readings
//!   in each part of the day
//! - coverage: share of waking hours over the last week with a reading
//! - late-meal rate: share of meals eaten at or after 21:00
//!
//! Variability, excursion and late-meal rate are normalized against typical
//! values so that less is better; coverage is used as is. The weighted sum
//! is rounded and labelled.
//!
//! # Usage
//!
//! ```rust
//! use chrono::Utc;
//! use gly_core::{GlucoseReading, MealEvent};
//! use gly_stability::StabilityEngine;
//!
//! let engine = StabilityEngine::new(Utc);
//! let readings = vec![
//!     GlucoseReading::new(92.0, 1_718_200_800_000),
//!     GlucoseReading::new(97.0, 1_718_204_400_000),
//! ];
//! let meals = vec![MealEvent::new(1_718_199_000_000)];
//! let score = engine.calculate(&readings, &meals);
//! assert!(score.value <= 100);
//! ```

pub mod config;
pub mod engine;
pub mod metrics;
pub mod score;

pub use config::StabilityConfig;
pub use engine::StabilityEngine;
pub use score::{StabilityComponents, StabilityLabel, StabilityScore};

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use gly_core::{GlucoseReading, MealEvent};

/// Score readings and meals with default settings in the local zone.
pub fn calculate_stability_score(readings: &[GlucoseReading], meals: &[MealEvent]) -> StabilityScore {
    StabilityEngine::new(Local).calculate(readings, meals)
}

/// Score one local calendar day.
pub fn get_daily_stability_score(
    readings: &[GlucoseReading],
    meals: &[MealEvent],
    date: &NaiveDate,
) -> StabilityScore {
    StabilityEngine::new(Local).daily(readings, meals, date)
}

/// Score the seven days ending at `end_date`.
pub fn get_weekly_stability_score<Tz: TimeZone>(
    readings: &[GlucoseReading],
    meals: &[MealEvent],
    end_date: &DateTime<Tz>,
) -> StabilityScore {
    StabilityEngine::new(Local).weekly(readings, meals, end_date)
}
