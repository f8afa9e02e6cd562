use crate::config::StabilityConfig;
use crate::metrics;
use crate::score::{StabilityComponents, StabilityScore};
use chrono::{DateTime, NaiveDate, TimeZone};
use gly_core::{GlucoseReading, MealEvent};
use gly_utils::dates::{end_of_day_ms, start_of_day_ms, trailing_window};
use log::debug;

/// Days covered by the weekly score.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Computes stability scores with hours and dates taken in `Tz`.
///
/// Holds no state between calls; one engine can be shared freely.
#[derive(Debug, Clone)]
pub struct StabilityEngine<Tz: TimeZone> {
    tz: Tz,
    config: StabilityConfig,
}

impl<Tz: TimeZone> StabilityEngine<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self::with_config(tz, StabilityConfig::default())
    }

    pub fn with_config(tz: Tz, config: StabilityConfig) -> Self {
        Self { tz, config }
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    pub fn config(&self) -> &StabilityConfig {
        &self.config
    }

    /// The five raw components, each computed over all of the input.
    pub fn components(&self, readings: &[GlucoseReading], meals: &[MealEvent]) -> StabilityComponents {
        StabilityComponents {
            post_meal_excursion: metrics::post_meal_excursion(readings, meals, &self.config),
            day_var: metrics::day_variability(readings, &self.tz, &self.config),
            overnight_var: metrics::overnight_variability(readings, &self.tz, &self.config),
            coverage: metrics::coverage(readings, &self.tz, &self.config),
            late_meal_rate: metrics::late_meal_rate(meals, &self.tz, &self.config),
        }
    }

    /// Score a window of readings and meals. Empty input is valid and
    /// scores as stable-but-unlogged.
    pub fn calculate(&self, readings: &[GlucoseReading], meals: &[MealEvent]) -> StabilityScore {
        let components = self.components(readings, meals);
        let score = StabilityScore::from_components(components, &self.config);
        debug!(
            "stability: {} readings, {} meals -> {} ({}) {:?}",
            readings.len(),
            meals.len(),
            score.value,
            score.label,
            score.components
        );
        score
    }

    /// Score only what falls on `date`, midnight to 23:59:59.999 local.
    pub fn daily(&self, readings: &[GlucoseReading], meals: &[MealEvent], date: &NaiveDate) -> StabilityScore {
        let start = start_of_day_ms(date, &self.tz);
        let end = end_of_day_ms(date, &self.tz);
        self.calculate_between(readings, meals, start, end)
    }

    /// Score the seven days up to and including `end`.
    pub fn weekly<Z: TimeZone>(
        &self,
        readings: &[GlucoseReading],
        meals: &[MealEvent],
        end: &DateTime<Z>,
    ) -> StabilityScore {
        let (start, end) = trailing_window(end.timestamp_millis(), WEEKLY_WINDOW_DAYS);
        self.calculate_between(readings, meals, start, end)
    }

    fn calculate_between(
        &self,
        readings: &[GlucoseReading],
        meals: &[MealEvent],
        start: i64,
        end: i64,
    ) -> StabilityScore {
        let in_window = |ts: i64| ts >= start && ts <= end;
        let readings: Vec<GlucoseReading> =
            readings.iter().filter(|r| in_window(r.timestamp)).copied().collect();
        let meals: Vec<MealEvent> = meals.iter().filter(|m| in_window(m.timestamp)).copied().collect();
        self.calculate(&readings, &meals)
    }
}
