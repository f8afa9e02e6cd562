//! Largest-Triangle-Three-Buckets downsampling.
//!
//! Keeps the first and last points, splits the rest into `threshold - 2`
//! buckets and from each bucket keeps the point spanning the largest
//! triangle with the previously kept point and the centroid of the next
//! bucket.

use gly_core::ChartPoint;
use log::debug;

/// Reduce `data` (sorted by time) to `threshold` visually representative
/// points.
///
/// Returns a copy of `data` when `threshold >= data.len()` or
/// `threshold <= 2`.
pub fn downsample_lttb(data: &[ChartPoint], threshold: usize) -> Vec<ChartPoint> {
    let len = data.len();
    if threshold >= len || threshold <= 2 {
        return data.to_vec();
    }

    let every = (len - 2) as f64 / (threshold - 2) as f64;
    let mut sampled = Vec::with_capacity(threshold);
    let mut anchor = 0usize;
    sampled.push(data[anchor]);

    for bucket in 0..threshold - 2 {
        let (avg_x, avg_y) = next_bucket_centroid(data, bucket, every);

        let range_start = bucket_edge(bucket, every);
        let range_end = bucket_edge(bucket + 1, every).min(len);
        let a = &data[anchor];

        let mut max_area = -1.0;
        let mut selected = None;
        for (idx, point) in data.iter().enumerate().take(range_end).skip(range_start) {
            let area = triangle_area(a, point, avg_x, avg_y);
            if area > max_area {
                max_area = area;
                selected = Some(idx);
            }
        }

        match selected {
            Some(idx) => {
                sampled.push(data[idx]);
                anchor = idx;
            }
            None => debug!("downsample_lttb: bucket {bucket} is empty, skipping"),
        }
    }

    sampled.push(data[len - 1]);
    sampled
}

/// Index where bucket `i` starts; index 0 is reserved for the first point.
fn bucket_edge(i: usize, every: f64) -> usize {
    (i as f64 * every).floor() as usize + 1
}

/// Mean x/y of the bucket after `bucket`. An empty range leaves the
/// centroid at the origin.
fn next_bucket_centroid(data: &[ChartPoint], bucket: usize, every: f64) -> (f64, f64) {
    let start = bucket_edge(bucket + 1, every);
    let end = bucket_edge(bucket + 2, every).min(data.len());
    if start >= end {
        return (0.0, 0.0);
    }

    let range = &data[start..end];
    let (sum_x, sum_y) = range
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = range.len() as f64;
    (sum_x / n, sum_y / n)
}

fn triangle_area(a: &ChartPoint, b: &ChartPoint, cx: f64, cy: f64) -> f64 {
    ((a.x - cx) * (b.y - a.y) - (a.x - b.x) * (cy - a.y)).abs() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use gly_core::GlucoseReading;

    fn series(values: &[f64]) -> Vec<ChartPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| GlucoseReading::new(*v, i as i64 * 60_000).into())
            .collect()
    }

    fn wave(len: usize) -> Vec<ChartPoint> {
        let values: Vec<f64> = (0..len)
            .map(|i| 120.0 + 40.0 * (i as f64 / 9.0).sin())
            .collect();
        series(&values)
    }

    #[test]
    fn test_lttb_returns_threshold_points() {
        let data = wave(1000);
        for threshold in [3, 10, 57, 200, 999] {
            let sampled = downsample_lttb(&data, threshold);
            assert_eq!(sampled.len(), threshold, "threshold {threshold}");
            assert_eq!(sampled[0], data[0]);
            assert_eq!(sampled[threshold - 1], data[999]);
        }
    }

    #[test]
    fn test_lttb_keeps_time_order() {
        let data = wave(300);
        let sampled = downsample_lttb(&data, 40);
        assert!(sampled.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_lttb_noop_cases() {
        let data = wave(20);
        assert_eq!(downsample_lttb(&data, 20), data);
        assert_eq!(downsample_lttb(&data, 50), data);
        assert_eq!(downsample_lttb(&data, 2), data);
        assert_eq!(downsample_lttb(&data, 0), data);
        assert!(downsample_lttb(&[], 10).is_empty());
    }

    #[test]
    fn test_lttb_keeps_isolated_spike() {
        let mut values = vec![100.0; 50];
        values[25] = 250.0;
        let sampled = downsample_lttb(&series(&values), 10);
        assert_eq!(sampled.len(), 10);
        assert!(sampled.iter().any(|p| p.value == 250.0));
    }

    #[test]
    fn test_lttb_selects_max_area_point() {
        // n=5, threshold=3: a single bucket over indices 1..=3, with the
        // last point as the centroid of the following bucket.
        let data = series(&[100.0, 105.0, 160.0, 98.0, 100.0]);
        let sampled = downsample_lttb(&data, 3);
        assert_eq!(sampled.len(), 3);
        assert_eq!(sampled[1].value, 160.0);
    }

    #[test]
    fn test_lttb_anchor_moves_to_each_selected_point() {
        // n=8, threshold=4: buckets [1,4) and [4,7). The first pick (180)
        // becomes the anchor for the second bucket, which then prefers 70;
        // anchored at the first point it would have taken 140 instead.
        let data = series(&[100.0, 110.0, 180.0, 105.0, 100.0, 70.0, 140.0, 100.0]);
        let sampled = downsample_lttb(&data, 4);
        let values: Vec<f64> = sampled.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100.0, 180.0, 70.0, 100.0]);
        assert_eq!(sampled[1].timestamp, data[2].timestamp);
        assert_eq!(sampled[2].timestamp, data[5].timestamp);
    }

    #[test]
    fn test_centroid_of_empty_range_is_origin() {
        let data = series(&[100.0, 101.0]);
        // bucket 5 of a 2-point slice has nothing after it
        assert_eq!(next_bucket_centroid(&data, 5, 1.0), (0.0, 0.0));
    }

    #[test]
    fn test_triangle_area() {
        let a: ChartPoint = GlucoseReading::new(0.0, 0).into();
        let b: ChartPoint = GlucoseReading::new(4.0, 0).into();
        // (0,0), (0,4), (3,0)
        assert_eq!(triangle_area(&a, &b, 3.0, 0.0), 6.0);
    }
}
