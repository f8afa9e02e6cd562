//! Chart series and sample data output.

use crate::input::load_readings;
use anyhow::Context;
use chrono::TimeZone;
use gly_core::units::format_glucose_value;
use gly_core::{ChartPoint, GlucoseReading, GlucoseUnit};
use gly_data::generate_sample_glucose_data;
use gly_data::pipeline::{prepare_chart_series, ChartConfig};
use gly_utils::dates::to_datetime;
use log::info;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

fn output_writer(output_csv: Option<&str>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match output_csv {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {path}"))?,
        ),
        None => Box::new(io::stdout()),
    })
}

/// Write chart points as `timestamp,time,value,display`.
pub fn write_chart_csv<W, Tz>(
    points: &[ChartPoint],
    unit: GlucoseUnit,
    tz: &Tz,
    writer: W,
) -> anyhow::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["timestamp", "time", "value", "display"])?;
    for point in points {
        let time = to_datetime(point.timestamp, tz)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();
        wtr.write_record([
            point.timestamp.to_string(),
            time,
            point.value.to_string(),
            format_glucose_value(point.value, unit),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write readings in the same `timestamp,value` layout the loader reads.
pub fn write_readings_csv<W: Write>(readings: &[GlucoseReading], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["timestamp", "value"])?;
    for reading in readings {
        wtr.write_record([reading.timestamp.to_string(), reading.value.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn run_chart<Tz>(
    readings_csv: &str,
    output_csv: Option<&str>,
    config: &ChartConfig,
    unit: GlucoseUnit,
    tz: &Tz,
) -> anyhow::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let readings = load_readings(Path::new(readings_csv))?;
    let points = prepare_chart_series(&readings, config);
    info!(
        "Chart series: {} readings -> {} points (threshold {}, window {})",
        readings.len(),
        points.len(),
        config.threshold,
        config.window_size
    );
    write_chart_csv(&points, unit, tz, output_writer(output_csv)?)
}

pub fn run_sample(output_csv: Option<&str>) -> anyhow::Result<()> {
    let readings = generate_sample_glucose_data();
    info!("Generated {} sample readings", readings.len());
    write_readings_csv(&readings, output_writer(output_csv)?)
}
