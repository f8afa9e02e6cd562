/// Error types for parsing glucose data at the edges of the toolkit.
///
/// The numeric operations themselves are total and never return these.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GlyError {
    /// Unit label was neither mg/dL nor mmol/L
    #[error("Unknown glucose unit: {0}")]
    UnknownUnit(String),

    /// Meal type label was not breakfast, lunch, dinner or snack
    #[error("Unknown meal type: {0}")]
    UnknownMealType(String),

    /// Timestamp was neither epoch milliseconds nor RFC 3339
    #[error("Failed to parse timestamp: {0}")]
    InvalidTimestamp(String),

    /// Glucose value was not a number
    #[error("Failed to parse glucose value: {0}")]
    InvalidValue(String),
}

/// Type alias for Results using GlyError
pub type Result<T> = std::result::Result<T, GlyError>;
