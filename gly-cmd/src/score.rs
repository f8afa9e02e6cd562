//! Stability score command.

use crate::input::{load_meals, load_readings};
use anyhow::Context;
use chrono::{NaiveDate, TimeZone};
use gly_core::{GlucoseReading, MealEvent};
use gly_stability::{StabilityEngine, StabilityScore};
use gly_utils::dates::{end_of_day_ms, format_date, to_datetime};
use log::info;
use std::path::Path;

/// Which slice of the input to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreWindow {
    All,
    Day(NaiveDate),
    WeekEnding(NaiveDate),
}

impl ScoreWindow {
    pub fn describe(&self) -> String {
        match self {
            ScoreWindow::All => "all readings".to_string(),
            ScoreWindow::Day(date) => format!("day {}", format_date(date)),
            ScoreWindow::WeekEnding(date) => format!("week ending {}", format_date(date)),
        }
    }
}

pub fn compute_score<Tz: TimeZone>(
    engine: &StabilityEngine<Tz>,
    readings: &[GlucoseReading],
    meals: &[MealEvent],
    window: ScoreWindow,
) -> anyhow::Result<StabilityScore> {
    let score = match window {
        ScoreWindow::All => engine.calculate(readings, meals),
        ScoreWindow::Day(date) => engine.daily(readings, meals, &date),
        ScoreWindow::WeekEnding(date) => {
            let tz = engine.timezone();
            let end = to_datetime(end_of_day_ms(&date, tz), tz)
                .with_context(|| format!("week ending {date} is out of range"))?;
            engine.weekly(readings, meals, &end)
        }
    };
    Ok(score)
}

/// Plain-text report for a score.
pub fn render_score(score: &StabilityScore, window: ScoreWindow) -> String {
    let c = &score.components;
    format!(
        "Stability score for {}: {} ({})\n\
         \x20 post-meal excursion:   {:.1} mg/dL\n\
         \x20 daytime variability:   {:.1} mg/dL\n\
         \x20 overnight variability: {:.1} mg/dL\n\
         \x20 coverage:              {:.1}%\n\
         \x20 late-meal rate:        {:.1}%",
        window.describe(),
        score.value,
        score.label,
        c.post_meal_excursion,
        c.day_var,
        c.overnight_var,
        c.coverage,
        c.late_meal_rate
    )
}

pub fn run_score<Tz: TimeZone>(
    engine: &StabilityEngine<Tz>,
    readings_csv: &str,
    meals_csv: Option<&str>,
    window: ScoreWindow,
    json: bool,
) -> anyhow::Result<()> {
    let readings = load_readings(Path::new(readings_csv))?;
    let meals = match meals_csv {
        Some(path) => load_meals(Path::new(path))?,
        None => Vec::new(),
    };
    info!(
        "Scoring {} readings and {} meals over {}",
        readings.len(),
        meals.len(),
        window.describe()
    );

    let score = compute_score(engine, &readings, &meals, window)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&score)?);
    } else {
        println!("{}", render_score(&score, window));
    }
    Ok(())
}
