use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    /// Start of the bucket.
    pub label: NaiveDate,
    pub value: f64,
}

/// Bucketed values sorted by label. Buckets without data are absent, not zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Points must already be strictly ascending by label.
    pub(crate) fn from_sorted(points: Vec<SeriesPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].label < w[1].label));
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }

    pub fn first_label(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.label)
    }

    pub fn last_label(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.label)
    }
}
