use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::model::workout::WorkoutEntry;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// Monday-start weeks.
    Week,
    /// Calendar months.
    Month,
}

impl FromStr for Period {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "w" | "week" | "weekly" => Ok(Period::Week),
            "m" | "month" | "monthly" => Ok(Period::Month),
            _ => Err(ReportError::UnknownPeriod(s.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Week => f.write_str("week"),
            Period::Month => f.write_str("month"),
        }
    }
}

/// Which entry field selects the participants of an aggregation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Category,
    Exercise,
}

impl Dimension {
    pub fn field<'a>(&self, entry: &'a WorkoutEntry) -> &'a str {
        match self {
            Dimension::Category => &entry.category,
            Dimension::Exercise => &entry.exercise,
        }
    }
}

impl FromStr for Dimension {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "category" => Ok(Dimension::Category),
            "e" | "exercise" => Ok(Dimension::Exercise),
            _ => Err(ReportError::UnknownVariant {
                kind: "dimension",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Category => f.write_str("category"),
            Dimension::Exercise => f.write_str("exercise"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Sum of volume.
    Sum,
    /// Heaviest weight.
    Max,
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Sum
    }
}

impl FromStr for Metric {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" | "volume" => Ok(Metric::Sum),
            "max" | "weight" => Ok(Metric::Max),
            _ => Err(ReportError::UnknownVariant {
                kind: "metric",
                value: s.to_string(),
            }),
        }
    }
}

impl Metric {
    pub fn value_of(&self, entry: &WorkoutEntry) -> Option<f64> {
        match self {
            Metric::Sum => entry.volume(),
            Metric::Max => entry.weight,
        }
    }

    pub fn combine(&self, acc: f64, value: f64) -> f64 {
        match self {
            Metric::Sum => acc + value,
            Metric::Max => acc.max(value),
        }
    }

    pub fn axis_label(&self) -> &'static str {
        match self {
            Metric::Sum => "Volume [lbs]",
            Metric::Max => "Weight [lbs]",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

impl Default for ChartKind {
    fn default() -> Self {
        ChartKind::Line
    }
}

impl FromStr for ChartKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            _ => Err(ReportError::UnknownVariant {
                kind: "chart kind",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Line => f.write_str("line"),
            ChartKind::Bar => f.write_str("bar"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period() {
        assert_eq!("week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("W".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("Month".parse::<Period>().unwrap(), Period::Month);
    }

    #[test]
    fn test_unknown_period_is_rejected() {
        let err = "quarter".parse::<Period>().unwrap_err();
        assert!(matches!(err, ReportError::UnknownPeriod(ref p) if p == "quarter"));
        // No silent fallback for the empty string either.
        assert!("".parse::<Period>().is_err());
    }

    #[test]
    fn test_parse_dimension_and_kind() {
        assert_eq!("exercise".parse::<Dimension>().unwrap(), Dimension::Exercise);
        assert_eq!("bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert!("pie".parse::<ChartKind>().is_err());
    }
}
