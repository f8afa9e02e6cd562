//! Command implementations for the glucose stability CLI.
//!
//! Provides subcommands for scoring logged readings, preparing chart
//! series, generating sample data and unit lookups.

use anyhow::Context;
use chrono::{Local, TimeZone};
use clap::Subcommand;
use gly_core::units::{convert_glucose_value, get_target_ranges};
use gly_core::{get_glucose_category, GlucoseUnit};
use gly_stability::StabilityEngine;
use gly_utils::dates::parse_date;
use std::fmt::Display;

pub mod chart;
pub mod input;
pub mod score;
pub mod settings;

pub use settings::Settings;

use score::ScoreWindow;

#[derive(Subcommand)]
pub enum Command {
    /// Compute a stability score from readings and meals CSV files
    Score {
        /// Readings CSV (`timestamp,value`, value in mg/dL)
        #[arg(short = 'r', long)]
        readings_csv: String,

        /// Meals CSV (`timestamp,meal_type`)
        #[arg(short = 'm', long)]
        meals_csv: Option<String>,

        /// Only score this local day (YYYY-MM-DD)
        #[arg(long, conflicts_with = "week_ending")]
        date: Option<String>,

        /// Only score the seven days ending on this local day (YYYY-MM-DD)
        #[arg(long)]
        week_ending: Option<String>,

        /// Print the score as JSON
        #[arg(long)]
        json: bool,
    },

    /// Downsample and smooth readings into a chart series CSV
    Chart {
        #[arg(short = 'r', long)]
        readings_csv: String,

        /// Output CSV path (stdout when omitted)
        #[arg(short = 'o', long)]
        output_csv: Option<String>,

        /// Maximum number of points (overrides settings)
        #[arg(long)]
        threshold: Option<usize>,

        /// Smoothing window (overrides settings)
        #[arg(long)]
        window: Option<usize>,
    },

    /// Write a synthetic week of readings
    Sample {
        /// Output CSV path (stdout when omitted)
        #[arg(short = 'o', long)]
        output_csv: Option<String>,
    },

    /// Convert a glucose value between mg/dL and mmol/L
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        #[arg(long)]
        from: GlucoseUnit,

        #[arg(long)]
        to: GlucoseUnit,
    },

    /// Classify a glucose value as low, normal or high
    Classify {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Unit of the value (display unit from settings when omitted)
        #[arg(long)]
        unit: Option<GlucoseUnit>,
    },

    /// Print the target ranges for a unit
    Ranges {
        #[arg(long)]
        unit: Option<GlucoseUnit>,
    },
}

pub fn run(command: Command, settings: &Settings) -> anyhow::Result<()> {
    match settings.fixed_offset()? {
        Some(offset) => run_in_zone(command, settings, offset),
        None => run_in_zone(command, settings, Local),
    }
}

fn run_in_zone<Tz>(command: Command, settings: &Settings, tz: Tz) -> anyhow::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match command {
        Command::Score {
            readings_csv,
            meals_csv,
            date,
            week_ending,
            json,
        } => {
            let window = score_window(date.as_deref(), week_ending.as_deref())?;
            let engine = StabilityEngine::new(tz);
            score::run_score(&engine, &readings_csv, meals_csv.as_deref(), window, json)
        }
        Command::Chart {
            readings_csv,
            output_csv,
            threshold,
            window,
        } => {
            let mut config = settings.chart;
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            if let Some(window) = window {
                config.window_size = window;
            }
            chart::run_chart(&readings_csv, output_csv.as_deref(), &config, settings.display_unit, &tz)
        }
        Command::Sample { output_csv } => chart::run_sample(output_csv.as_deref()),
        Command::Convert { value, from, to } => {
            println!("{} {}", convert_glucose_value(value, from, to), to);
            Ok(())
        }
        Command::Classify { value, unit } => {
            println!("{}", get_glucose_category(value, unit.unwrap_or(settings.display_unit)));
            Ok(())
        }
        Command::Ranges { unit } => {
            let unit = unit.unwrap_or(settings.display_unit);
            let ranges = get_target_ranges(unit);
            println!(
                "low: {} {unit}\nnormal: {} {unit}\nhigh: {} {unit}\ncritical: {} {unit}",
                ranges.low, ranges.normal, ranges.high, ranges.critical
            );
            Ok(())
        }
    }
}

fn score_window(date: Option<&str>, week_ending: Option<&str>) -> anyhow::Result<ScoreWindow> {
    Ok(match (date, week_ending) {
        (Some(d), _) => ScoreWindow::Day(parse_date(d).with_context(|| format!("invalid --date {d}"))?),
        (None, Some(d)) => {
            ScoreWindow::WeekEnding(parse_date(d).with_context(|| format!("invalid --week-ending {d}"))?)
        }
        (None, None) => ScoreWindow::All,
    })
}
