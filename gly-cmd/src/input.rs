//! CSV loading for readings and meals.
//!
//! # CSV Formats
//!
//! - **Readings** (has headers): `timestamp,value` with value in mg/dL
//! - **Meals** (has headers): `timestamp,meal_type` where meal_type may be empty
//!
//! Timestamps are epoch milliseconds or RFC 3339.

use anyhow::Context;
use gly_core::reading::{parse_timestamp, parse_value};
use gly_core::{GlucoseReading, MealEvent, MealType};
use std::path::Path;

fn reader(csv_data: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes())
}

/// Parse readings from CSV text.
///
/// # Example CSV
/// ```text
/// timestamp,value
/// 1718200800000,92
/// 2024-06-12T15:00:00Z,97
/// ```
pub fn parse_readings_csv(csv_data: &str) -> anyhow::Result<Vec<GlucoseReading>> {
    let mut rdr = reader(csv_data);
    let mut readings = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let r = result?;
        let line = row + 2;
        let timestamp = parse_timestamp(r.get(0).unwrap_or(""))
            .with_context(|| format!("readings line {line}"))?;
        let value = parse_value(r.get(1).unwrap_or("")).with_context(|| format!("readings line {line}"))?;
        readings.push(GlucoseReading::new(value, timestamp));
    }
    log::info!("input: parsed {} readings", readings.len());
    Ok(readings)
}

/// Parse meals from CSV text.
///
/// # Example CSV
/// ```text
/// timestamp,meal_type
/// 1718199000000,breakfast
/// 1718220000000,
/// ```
pub fn parse_meals_csv(csv_data: &str) -> anyhow::Result<Vec<MealEvent>> {
    let mut rdr = reader(csv_data);
    let mut meals = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let r = result?;
        let line = row + 2;
        let timestamp = parse_timestamp(r.get(0).unwrap_or("")).with_context(|| format!("meals line {line}"))?;
        let meal_type = match r.get(1).filter(|s| !s.is_empty()) {
            Some(s) => Some(s.parse::<MealType>().with_context(|| format!("meals line {line}"))?),
            None => None,
        };
        meals.push(MealEvent { timestamp, meal_type });
    }
    log::info!("input: parsed {} meals", meals.len());
    Ok(meals)
}

pub fn load_readings(path: &Path) -> anyhow::Result<Vec<GlucoseReading>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read readings from {}", path.display()))?;
    parse_readings_csv(&data)
}

pub fn load_meals(path: &Path) -> anyhow::Result<Vec<MealEvent>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read meals from {}", path.display()))?;
    parse_meals_csv(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_readings_mixed_timestamps() {
        let csv = "timestamp,value\n1000,92\n1970-01-01T00:00:02Z, 97.5 \n";
        let readings = parse_readings_csv(csv).unwrap();
        assert_eq!(
            readings,
            vec![GlucoseReading::new(92.0, 1000), GlucoseReading::new(97.5, 2000)]
        );
    }

    #[test]
    fn test_parse_readings_reports_line() {
        let csv = "timestamp,value\n1000,92\n2000,HI\n";
        let err = parse_readings_csv(csv).unwrap_err();
        assert!(format!("{err:#}").contains("readings line 3"), "{err:#}");
    }

    #[test]
    fn test_parse_readings_header_only() {
        assert!(parse_readings_csv("timestamp,value\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_meals_optional_type() {
        let csv = "timestamp,meal_type\n1000,Breakfast\n2000,\n3000\n";
        let meals = parse_meals_csv(csv).unwrap();
        assert_eq!(meals.len(), 3);
        assert_eq!(meals[0].meal_type, Some(MealType::Breakfast));
        assert_eq!(meals[1].meal_type, None);
        assert_eq!(meals[2], MealEvent::new(3000));
    }

    #[test]
    fn test_parse_meals_rejects_unknown_type() {
        assert!(parse_meals_csv("timestamp,meal_type\n1000,brunch\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_readings(Path::new("/nonexistent/readings.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to read readings"));
    }
}
