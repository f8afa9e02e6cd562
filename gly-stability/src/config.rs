use serde::{Deserialize, Serialize};

/// Scale applied to a z-score so that about three standard deviations
/// either side of typical span 0..100.
pub const Z_SCALE: f64 = 16.67;

/// Typical value and spread for one raw component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentNorm {
    pub typical: f64,
    pub stddev: f64,
}

/// Reference values for the components that are normalized.
/// Coverage is already a percentage and has no entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationTable {
    pub post_meal_excursion: ComponentNorm,
    pub day_var: ComponentNorm,
    pub overnight_var: ComponentNorm,
    pub late_meal_rate: ComponentNorm,
}

impl Default for NormalizationTable {
    fn default() -> Self {
        Self {
            post_meal_excursion: ComponentNorm { typical: 45.0, stddev: 25.0 },
            day_var: ComponentNorm { typical: 20.0, stddev: 15.0 },
            overnight_var: ComponentNorm { typical: 10.0, stddev: 8.0 },
            late_meal_rate: ComponentNorm { typical: 20.0, stddev: 15.0 },
        }
    }
}

/// Composite weights; they sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub post_meal_excursion: f64,
    pub day_var: f64,
    pub overnight_var: f64,
    pub coverage: f64,
    pub late_meal_rate: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            post_meal_excursion: 0.35,
            day_var: 0.25,
            overnight_var: 0.15,
            coverage: 0.15,
            late_meal_rate: 0.10,
        }
    }
}

/// Tunable parameters for stability scoring.
///
/// The defaults are the calibrated values; changing them changes scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityConfig {
    pub weights: ComponentWeights,
    pub norms: NormalizationTable,

    /// Readings within this many minutes either side of a meal form its baseline
    pub baseline_window_mins: i64,
    /// Post-meal peak window is (meal + start, meal + end]
    pub excursion_start_mins: i64,
    pub excursion_end_mins: i64,

    /// Index-based percentile bounds for clipping excursions
    pub winsor_low: f64,
    pub winsor_high: f64,

    /// Daytime is [day_start_hour, day_end_hour]; overnight is
    /// hour >= day_end_hour or hour <= day_start_hour. Both ends are shared.
    pub day_start_hour: u32,
    pub day_end_hour: u32,

    pub coverage_days: i64,
    pub coverage_hours_per_day: u32,

    /// Meals at or after this local hour count as late
    pub late_meal_hour: u32,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            norms: NormalizationTable::default(),
            baseline_window_mins: 30,
            excursion_start_mins: 30,
            excursion_end_mins: 120,
            winsor_low: 0.05,
            winsor_high: 0.95,
            day_start_hour: 7,
            day_end_hour: 23,
            coverage_days: 7,
            coverage_hours_per_day: 16,
            late_meal_hour: 21,
        }
    }
}

impl StabilityConfig {
    pub fn is_daytime(&self, hour: u32) -> bool {
        hour >= self.day_start_hour && hour <= self.day_end_hour
    }

    pub fn is_overnight(&self, hour: u32) -> bool {
        hour >= self.day_end_hour || hour <= self.day_start_hour
    }

    /// Expected number of (date, hour) buckets in a full coverage window.
    pub fn coverage_slots(&self) -> f64 {
        (self.coverage_days * self.coverage_hours_per_day as i64) as f64
    }
}
