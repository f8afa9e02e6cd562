//! Synthetic glucose readings for empty-state charts.
//!
//! One week of seven readings per day, each drawn uniformly from a
//! per-slot range at a random minute inside the slot's hour.

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};
use gly_core::GlucoseReading;
use gly_utils::dates::local_to_millis;
use rand::Rng;

/// Number of days of sample data, ending today.
pub const SAMPLE_DAYS: i64 = 7;

/// A time-of-day window and its value range in mg/dL (inclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSlot {
    pub name: &'static str,
    pub hour: u32,
    pub minute: u32,
    pub span_minutes: u32,
    pub low: u32,
    pub high: u32,
}

pub const SAMPLE_SLOTS: [SampleSlot; 7] = [
    SampleSlot { name: "morning", hour: 6, minute: 30, span_minutes: 60, low: 80, high: 110 },
    SampleSlot { name: "breakfast", hour: 8, minute: 0, span_minutes: 60, low: 110, high: 160 },
    SampleSlot { name: "mid-morning", hour: 10, minute: 0, span_minutes: 60, low: 90, high: 130 },
    SampleSlot { name: "lunch", hour: 12, minute: 30, span_minutes: 60, low: 110, high: 170 },
    SampleSlot { name: "afternoon", hour: 15, minute: 0, span_minutes: 60, low: 85, high: 125 },
    SampleSlot { name: "dinner", hour: 18, minute: 30, span_minutes: 60, low: 115, high: 175 },
    SampleSlot { name: "evening", hour: 21, minute: 30, span_minutes: 60, low: 90, high: 130 },
];

/// Sample week ending today, using the thread RNG and the local zone.
pub fn generate_sample_glucose_data() -> Vec<GlucoseReading> {
    generate_sample_glucose_data_with(&mut rand::thread_rng(), &Local::now())
}

/// Sample week ending on `now`'s calendar day in `now`'s zone, sorted by
/// timestamp.
pub fn generate_sample_glucose_data_with<R, Tz>(rng: &mut R, now: &DateTime<Tz>) -> Vec<GlucoseReading>
where
    R: Rng,
    Tz: TimeZone,
{
    let tz = now.timezone();
    let today = now.date_naive();
    let mut readings = Vec::with_capacity(SAMPLE_DAYS as usize * SAMPLE_SLOTS.len());

    for days_back in (0..SAMPLE_DAYS).rev() {
        let date = today - Duration::days(days_back);
        for slot in &SAMPLE_SLOTS {
            let slot_start = NaiveTime::from_hms_opt(slot.hour, slot.minute, 0).unwrap_or(NaiveTime::MIN);
            let offset = Duration::minutes(rng.gen_range(0..slot.span_minutes) as i64);
            let when = date.and_time(slot_start) + offset;
            let value = rng.gen_range(slot.low..=slot.high) as f64;
            readings.push(GlucoseReading::new(value, local_to_millis(&when, &tz)));
        }
    }

    readings.sort_by(GlucoseReading::cmp_by_time);
    readings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use gly_utils::dates::local_date;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 14, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_sample_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let readings = generate_sample_glucose_data_with(&mut rng, &fixed_now());
        assert_eq!(readings.len(), 49);
        assert!(readings.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_sample_values_within_slot_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let readings = generate_sample_glucose_data_with(&mut rng, &fixed_now());
        // slots never overlap, so sorted order is day-major, slot-minor
        for (i, reading) in readings.iter().enumerate() {
            let slot = &SAMPLE_SLOTS[i % SAMPLE_SLOTS.len()];
            assert!(
                reading.value >= slot.low as f64 && reading.value <= slot.high as f64,
                "{} reading {} outside {}..={}",
                slot.name,
                reading.value,
                slot.low,
                slot.high
            );
        }
    }

    #[test]
    fn test_sample_covers_trailing_week() {
        let mut rng = StdRng::seed_from_u64(1);
        let readings = generate_sample_glucose_data_with(&mut rng, &fixed_now());
        let first = local_date(readings[0].timestamp, &Utc).unwrap();
        let last = local_date(readings[48].timestamp, &Utc).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 4, 14).unwrap());
    }

    #[test]
    fn test_sample_is_deterministic_for_a_seed() {
        let a = generate_sample_glucose_data_with(&mut StdRng::seed_from_u64(9), &fixed_now());
        let b = generate_sample_glucose_data_with(&mut StdRng::seed_from_u64(9), &fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_thread_rng_variant() {
        let readings = generate_sample_glucose_data();
        assert_eq!(readings.len(), 49);
        assert!(readings.iter().all(|r| r.value >= 80.0 && r.value <= 175.0));
    }
}
