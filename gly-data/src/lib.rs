//! Data processing for glucose series.
//!
//! This crate turns raw readings into forms suitable for charting: a
//! shape-preserving downsample followed by a light smoothing pass. It also
//! carries the synthetic series used when a user has no readings yet.

pub mod downsample;
pub mod sample;

pub use downsample::downsample_lttb;
pub use sample::{generate_sample_glucose_data, generate_sample_glucose_data_with};

/// Centered moving average over glucose values.
pub mod smoothing {
    use gly_core::GlucoseSample;

    /// Replace each value with the rounded mean of a centered window.
    ///
    /// The window for index `i` is `[i - floor(w/2), i + ceil(w/2))`, clipped
    /// to the slice. Timestamps and any other fields are carried over. A
    /// window of 0 or 1, or a series shorter than the window, comes back as
    /// a plain copy.
    pub fn moving_average<T>(data: &[T], window_size: usize) -> Vec<T>
    where
        T: GlucoseSample + Clone,
    {
        if window_size <= 1 || data.len() < window_size {
            return data.to_vec();
        }

        let behind = window_size / 2;
        let ahead = window_size - behind;

        data.iter()
            .enumerate()
            .map(|(i, point)| {
                let start = i.saturating_sub(behind);
                let end = (i + ahead).min(data.len());
                let window = &data[start..end];
                let sum: f64 = window.iter().map(|p| p.value()).sum();
                point.with_value((sum / window.len() as f64).round())
            })
            .collect()
    }

}

/// Downsample-then-smooth pipeline feeding chart renderers.
pub mod pipeline {
    use crate::downsample::downsample_lttb;
    use crate::smoothing::moving_average;
    use gly_core::{ChartPoint, GlucoseReading};
    use serde::{Deserialize, Serialize};

    /// Default number of points handed to a chart.
    pub const DEFAULT_CHART_THRESHOLD: usize = 200;

    /// Default smoothing window applied after downsampling.
    pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ChartConfig {
        pub threshold: usize,
        pub window_size: usize,
    }

    impl Default for ChartConfig {
        fn default() -> Self {
            Self {
                threshold: DEFAULT_CHART_THRESHOLD,
                window_size: DEFAULT_SMOOTHING_WINDOW,
            }
        }
    }

    /// Sort readings by time, reduce them to at most `config.threshold`
    /// points, then smooth with `config.window_size`.
    pub fn prepare_chart_series(readings: &[GlucoseReading], config: &ChartConfig) -> Vec<ChartPoint> {
        let mut sorted = readings.to_vec();
        sorted.sort_by(GlucoseReading::cmp_by_time);
        let points: Vec<ChartPoint> = sorted.into_iter().map(ChartPoint::from).collect();

        let reduced = downsample_lttb(&points, config.threshold);
        log::debug!(
            "prepare_chart_series: {} readings -> {} points",
            points.len(),
            reduced.len()
        );
        moving_average(&reduced, config.window_size)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_prepare_chart_series_bounds_and_order() {
            // newest first, as a store might return them
            let readings: Vec<GlucoseReading> = (0..500)
                .rev()
                .map(|i| GlucoseReading::new(100.0 + (i % 40) as f64, i * 300_000))
                .collect();
            let config = ChartConfig {
                threshold: 50,
                window_size: 3,
            };
            let series = prepare_chart_series(&readings, &config);
            assert_eq!(series.len(), 50);
            assert_eq!(series[0].timestamp, 0);
            assert_eq!(series[49].timestamp, 499 * 300_000);
            assert!(series.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        }

        #[test]
        fn test_prepare_chart_series_empty() {
            assert!(prepare_chart_series(&[], &ChartConfig::default()).is_empty());
        }

        #[test]
        fn test_prepare_chart_series_short_series_is_only_smoothed() {
            let readings = vec![
                GlucoseReading::new(100.0, 0),
                GlucoseReading::new(130.0, 1),
                GlucoseReading::new(100.0, 2),
            ];
            let series = prepare_chart_series(
                &readings,
                &ChartConfig {
                    threshold: 10,
                    window_size: 3,
                },
            );
            assert_eq!(series.len(), 3);
            assert_eq!(series[1].value, 110.0);
        }
    }
}
