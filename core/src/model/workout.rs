use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One record exactly as the data source hands it over, before any typing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub date: String,
    pub exercise: String,
    pub category: String,
    // Empty cells come through as None.
    pub weight: Option<String>,
    pub reps: Option<String>,
}

impl RawRow {
    pub fn new(date: &str, exercise: &str, category: &str, weight: &str, reps: &str) -> Self {
        let cell = |s: &str| {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };
        Self {
            date: date.to_string(),
            exercise: exercise.to_string(),
            category: category.to_string(),
            weight: cell(weight),
            reps: cell(reps),
        }
    }
}

/// A single logged set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub exercise: String,
    pub category: String,
    /// Pounds.
    pub weight: Option<f64>,
    pub reps: Option<u32>,
}

impl WorkoutEntry {
    pub fn new(
        date: NaiveDate,
        exercise: impl Into<String>,
        category: impl Into<String>,
        weight: Option<f64>,
        reps: Option<u32>,
    ) -> Self {
        Self {
            date,
            exercise: exercise.into(),
            category: category.into(),
            weight,
            reps,
        }
    }

    /// weight * reps, or None when either side was not logged.
    pub fn volume(&self) -> Option<f64> {
        match (self.weight, self.reps) {
            (Some(w), Some(r)) => Some(w * r as f64),
            _ => None,
        }
    }
}
