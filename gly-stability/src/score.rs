use crate::config::{ComponentNorm, StabilityConfig, Z_SCALE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw, unweighted sub-metrics behind a score.
///
/// Excursion and variability are in mg/dL; coverage and late-meal rate are
/// percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityComponents {
    pub post_meal_excursion: f64,
    pub day_var: f64,
    pub overnight_var: f64,
    pub coverage: f64,
    pub late_meal_rate: f64,
}

/// Qualitative tier for a score.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum StabilityLabel {
    #[serde(rename = "Very steady")]
    VerySteady,
    #[serde(rename = "Mostly steady")]
    MostlySteady,
    #[serde(rename = "Some ups & downs")]
    SomeUpsAndDowns,
    #[serde(rename = "Wide swings")]
    WideSwings,
}

impl StabilityLabel {
    /// Lower bounds are inclusive: 80, 60 and 40.
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => StabilityLabel::VerySteady,
            60..=79 => StabilityLabel::MostlySteady,
            40..=59 => StabilityLabel::SomeUpsAndDowns,
            _ => StabilityLabel::WideSwings,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityLabel::VerySteady => "Very steady",
            StabilityLabel::MostlySteady => "Mostly steady",
            StabilityLabel::SomeUpsAndDowns => "Some ups & downs",
            StabilityLabel::WideSwings => "Wide swings",
        }
    }
}

impl fmt::Display for StabilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 0-100 stability score with its label and raw components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityScore {
    pub value: u8,
    pub label: StabilityLabel,
    pub components: StabilityComponents,
}

impl StabilityScore {
    pub fn from_components(components: StabilityComponents, config: &StabilityConfig) -> Self {
        let value = composite_score(&components, config);
        Self {
            value,
            label: StabilityLabel::from_score(value),
            components,
        }
    }
}

/// Map `raw` onto 0..100 around its typical value: typical lands on 50 and
/// each standard deviation moves it by `Z_SCALE`.
pub fn normalize(raw: f64, norm: &ComponentNorm) -> f64 {
    if norm.stddev == 0.0 {
        return 50.0;
    }
    let z = (raw - norm.typical) / norm.stddev;
    (50.0 + z * Z_SCALE).clamp(0.0, 100.0)
}

/// Normalized score where less of `raw` is better.
pub fn inverted_score(raw: f64, norm: &ComponentNorm) -> f64 {
    100.0 - normalize(raw, norm)
}

/// Weighted composite, rounded and clamped to 0..=100.
pub fn composite_score(components: &StabilityComponents, config: &StabilityConfig) -> u8 {
    let w = &config.weights;
    let n = &config.norms;

    let weighted = w.post_meal_excursion * inverted_score(components.post_meal_excursion, &n.post_meal_excursion)
        + w.day_var * inverted_score(components.day_var, &n.day_var)
        + w.overnight_var * inverted_score(components.overnight_var, &n.overnight_var)
        + w.coverage * components.coverage
        + w.late_meal_rate * inverted_score(components.late_meal_rate, &n.late_meal_rate);

    // NaN casts to 0
    weighted.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_breakpoints() {
        assert_eq!(StabilityLabel::from_score(85).as_str(), "Very steady");
        assert_eq!(StabilityLabel::from_score(65).as_str(), "Mostly steady");
        assert_eq!(StabilityLabel::from_score(45).as_str(), "Some ups & downs");
        assert_eq!(StabilityLabel::from_score(20).as_str(), "Wide swings");

        assert_eq!(StabilityLabel::from_score(100), StabilityLabel::VerySteady);
        assert_eq!(StabilityLabel::from_score(80), StabilityLabel::VerySteady);
        assert_eq!(StabilityLabel::from_score(79), StabilityLabel::MostlySteady);
        assert_eq!(StabilityLabel::from_score(60), StabilityLabel::MostlySteady);
        assert_eq!(StabilityLabel::from_score(59), StabilityLabel::SomeUpsAndDowns);
        assert_eq!(StabilityLabel::from_score(40), StabilityLabel::SomeUpsAndDowns);
        assert_eq!(StabilityLabel::from_score(39), StabilityLabel::WideSwings);
        assert_eq!(StabilityLabel::from_score(0), StabilityLabel::WideSwings);
    }

    #[test]
    fn test_normalize() {
        let norm = ComponentNorm { typical: 20.0, stddev: 15.0 };
        assert_eq!(normalize(20.0, &norm), 50.0);
        assert!((normalize(35.0, &norm) - 66.67).abs() < 1e-9);
        assert_eq!(normalize(1000.0, &norm), 100.0);
        assert_eq!(normalize(-1000.0, &norm), 0.0);
        assert_eq!(normalize(99.0, &ComponentNorm { typical: 20.0, stddev: 0.0 }), 50.0);
    }

    #[test]
    fn test_inverted_score_rewards_low_values() {
        let norm = ComponentNorm { typical: 10.0, stddev: 8.0 };
        assert!(inverted_score(0.0, &norm) > inverted_score(10.0, &norm));
        assert_eq!(inverted_score(10.0, &norm), 50.0);
    }

    #[test]
    fn test_composite_of_zero_components() {
        let config = StabilityConfig::default();
        // 0.35*80.006 + 0.25*72.227 + 0.15*70.838 + 0 + 0.10*72.227 = 63.9
        assert_eq!(composite_score(&StabilityComponents::default(), &config), 64);
    }

    #[test]
    fn test_composite_at_typical_values() {
        let config = StabilityConfig::default();
        let components = StabilityComponents {
            post_meal_excursion: 45.0,
            day_var: 20.0,
            overnight_var: 10.0,
            coverage: 50.0,
            late_meal_rate: 20.0,
        };
        assert_eq!(composite_score(&components, &config), 50);
    }

    #[test]
    fn test_composite_is_clamped() {
        let config = StabilityConfig::default();
        let worst = StabilityComponents {
            post_meal_excursion: 500.0,
            day_var: 300.0,
            overnight_var: 300.0,
            coverage: 0.0,
            late_meal_rate: 100.0,
        };
        assert_eq!(composite_score(&worst, &config), 0);

        let best = StabilityComponents {
            coverage: 100.0,
            ..StabilityComponents::default()
        };
        let score = composite_score(&best, &config);
        assert!(score <= 100);
        assert_eq!(score, 79);
    }

    #[test]
    fn test_score_serializes_with_display_names() {
        let score = StabilityScore::from_components(StabilityComponents::default(), &StabilityConfig::default());
        let json = serde_json::to_value(score).unwrap();
        assert_eq!(json["value"], 64);
        assert_eq!(json["label"], "Mostly steady");
        assert_eq!(json["components"]["postMealExcursion"], 0.0);
        assert_eq!(json["components"]["lateMealRate"], 0.0);
    }
}
