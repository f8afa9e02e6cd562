use crate::error::GlyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Optional tag attached to a meal. Not used by the numeric scoring, which
/// only looks at when a meal happened.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        };
        write!(f, "{label}")
    }
}

impl FromStr for MealType {
    type Err = GlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(GlyError::UnknownMealType(other.to_string())),
        }
    }
}

/// A logged meal. Meals join readings only through time windows around
/// `timestamp` (epoch milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealEvent {
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
}

impl MealEvent {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            meal_type: None,
        }
    }

    pub fn with_type(timestamp: i64, meal_type: MealType) -> Self {
        Self {
            timestamp,
            meal_type: Some(meal_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_parse_and_display() {
        assert_eq!("Dinner".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!(" snack ".parse::<MealType>().unwrap(), MealType::Snack);
        assert_eq!(MealType::Breakfast.to_string(), "breakfast");
        assert_eq!(
            "brunch".parse::<MealType>(),
            Err(GlyError::UnknownMealType("brunch".to_string()))
        );
    }

    #[test]
    fn test_meal_event_serde_omits_missing_type() {
        let untagged = serde_json::to_string(&MealEvent::new(42)).unwrap();
        assert_eq!(untagged, r#"{"timestamp":42}"#);

        let tagged: MealEvent =
            serde_json::from_str(r#"{"timestamp":7,"meal_type":"lunch"}"#).unwrap();
        assert_eq!(tagged, MealEvent::with_type(7, MealType::Lunch));
    }
}
