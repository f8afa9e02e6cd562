//! Core types for the glucose stability toolkit.
//!
//! Readings are always held in mg/dL. mmol/L is a display concern handled
//! by [`units`], and [`category`] buckets a value for styling.

pub mod category;
pub mod chart_point;
pub mod error;
pub mod meal;
pub mod reading;
pub mod units;

pub use category::{get_glucose_category, GlucoseCategory};
pub use chart_point::ChartPoint;
pub use error::{GlyError, Result};
pub use meal::{MealEvent, MealType};
pub use reading::{GlucoseReading, GlucoseSample};
pub use units::GlucoseUnit;
