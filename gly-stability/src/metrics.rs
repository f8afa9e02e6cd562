//! The five raw stability components.
//!
//! Each function is independent and pure. Hours and dates are taken in the
//! caller's zone. Readings whose timestamps cannot be placed in that zone
//! are ignored.

use crate::config::StabilityConfig;
use chrono::{NaiveDate, TimeZone};
use gly_core::{GlucoseReading, MealEvent};
use gly_utils::dates::{local_date, local_hour, MS_PER_DAY, MS_PER_MINUTE};
use log::debug;
use std::collections::HashSet;

/// Arithmetic mean, or None for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean absolute deviation from the mean; 0 for an empty slice.
pub fn mean_absolute_deviation(values: &[f64]) -> f64 {
    match mean(values) {
        Some(m) => values.iter().map(|v| (v - m).abs()).sum::<f64>() / values.len() as f64,
        None => 0.0,
    }
}

/// Clip values to the sorted values found at `floor(n * low)` and
/// `floor(n * high)`.
///
/// No interpolation: with fewer than five values both bounds are the
/// min and max, so nothing moves.
pub fn winsorize(values: &[f64], low: f64, high: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let index = |pct: f64| ((n as f64 * pct).floor().max(0.0) as usize).min(n - 1);
    let lower = sorted[index(low)];
    let upper = sorted[index(high)];

    values.iter().map(|v| v.max(lower).min(upper)).collect()
}

/// Rise from baseline to peak for each meal that has readings on both sides.
pub fn meal_excursions(
    readings: &[GlucoseReading],
    meals: &[MealEvent],
    config: &StabilityConfig,
) -> Vec<f64> {
    let baseline_ms = config.baseline_window_mins.saturating_mul(MS_PER_MINUTE).max(0) as u64;
    let post_start_ms = config.excursion_start_mins.saturating_mul(MS_PER_MINUTE);
    let post_end_ms = config.excursion_end_mins.saturating_mul(MS_PER_MINUTE);

    let mut excursions = Vec::new();
    for meal in meals {
        let baseline: Vec<f64> = readings
            .iter()
            .filter(|r| r.timestamp.abs_diff(meal.timestamp) <= baseline_ms)
            .map(|r| r.value)
            .collect();
        let peak = readings
            .iter()
            .filter(|r| {
                // readings too far from the meal to subtract are outside any window
                r.timestamp
                    .checked_sub(meal.timestamp)
                    .is_some_and(|since| since > post_start_ms && since <= post_end_ms)
            })
            .map(|r| r.value)
            .reduce(f64::max);

        match (mean(&baseline), peak) {
            (Some(base), Some(peak)) => excursions.push((peak - base).max(0.0)),
            _ => debug!("meal at {} has no baseline or post-meal reading, skipping", meal.timestamp),
        }
    }
    excursions
}

/// Winsorized mean post-meal excursion in mg/dL; 0 when no meal qualifies.
pub fn post_meal_excursion(
    readings: &[GlucoseReading],
    meals: &[MealEvent],
    config: &StabilityConfig,
) -> f64 {
    let excursions = meal_excursions(readings, meals, config);
    let clipped = winsorize(&excursions, config.winsor_low, config.winsor_high);
    mean(&clipped).unwrap_or(0.0)
}

fn values_in_hours<Tz, F>(readings: &[GlucoseReading], tz: &Tz, keep: F) -> Vec<f64>
where
    Tz: TimeZone,
    F: Fn(u32) -> bool,
{
    readings
        .iter()
        .filter(|r| local_hour(r.timestamp, tz).is_some_and(&keep))
        .map(|r| r.value)
        .collect()
}

/// MAD of readings taken during the day.
pub fn day_variability<Tz: TimeZone>(
    readings: &[GlucoseReading],
    tz: &Tz,
    config: &StabilityConfig,
) -> f64 {
    mean_absolute_deviation(&values_in_hours(readings, tz, |h| config.is_daytime(h)))
}

/// MAD of readings taken overnight.
pub fn overnight_variability<Tz: TimeZone>(
    readings: &[GlucoseReading],
    tz: &Tz,
    config: &StabilityConfig,
) -> f64 {
    mean_absolute_deviation(&values_in_hours(readings, tz, |h| config.is_overnight(h)))
}

/// Percentage of waking (date, hour) slots holding at least one reading,
/// over the `coverage_days` ending at the newest reading. Capped at 100.
pub fn coverage<Tz: TimeZone>(readings: &[GlucoseReading], tz: &Tz, config: &StabilityConfig) -> f64 {
    let Some(latest) = readings.iter().map(|r| r.timestamp).max() else {
        return 0.0;
    };
    let window_start = latest.saturating_sub(config.coverage_days.saturating_mul(MS_PER_DAY));

    let slots: HashSet<(NaiveDate, u32)> = readings
        .iter()
        .filter(|r| r.timestamp > window_start)
        .filter_map(|r| Some((local_date(r.timestamp, tz)?, local_hour(r.timestamp, tz)?)))
        .filter(|(_, hour)| config.is_daytime(*hour))
        .collect();

    (slots.len() as f64 / config.coverage_slots() * 100.0).min(100.0)
}

/// Percentage of meals eaten at or after the late-meal hour; 0 with no meals.
pub fn late_meal_rate<Tz: TimeZone>(meals: &[MealEvent], tz: &Tz, config: &StabilityConfig) -> f64 {
    if meals.is_empty() {
        return 0.0;
    }
    let late = meals
        .iter()
        .filter(|m| local_hour(m.timestamp, tz).is_some_and(|h| h >= config.late_meal_hour))
        .count();
    late as f64 / meals.len() as f64 * 100.0
}
