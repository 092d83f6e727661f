use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::model::workout::{RawRow, WorkoutEntry};
use crate::time::parse_entry_date;

/// The cleaned workout log. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    entries: Vec<WorkoutEntry>,
}

impl RecordStore {
    pub fn new(entries: Vec<WorkoutEntry>) -> Self {
        Self { entries }
    }

    /// Types every raw row. Row numbers in errors are 1-based data rows (header excluded).
    pub fn load(rows: Vec<RawRow>) -> ReportResult<Self> {
        let mut entries = Vec::with_capacity(rows.len());
        for (idx, row) in rows.into_iter().enumerate() {
            entries.push(parse_row(idx + 1, row)?);
        }
        debug!(entries = entries.len(), "record store loaded");
        Ok(Self { entries })
    }

    /// Entries strictly after `cutoff`.
    pub fn filter_since(&self, cutoff: NaiveDate) -> RecordStore {
        let entries: Vec<WorkoutEntry> = self
            .entries
            .iter()
            .filter(|e| e.date > cutoff)
            .cloned()
            .collect();
        debug!(
            %cutoff,
            kept = entries.len(),
            dropped = self.entries.len() - entries.len(),
            "filtered record store"
        );
        RecordStore { entries }
    }

    pub fn entries(&self) -> &[WorkoutEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn categories(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|e| e.category.as_str()))
    }

    pub fn exercises(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|e| e.exercise.as_str()))
    }

    /// (first, last) logged date.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.entries.iter().map(|e| e.date).min()?;
        let last = self.entries.iter().map(|e| e.date).max()?;
        Some((first, last))
    }
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn parse_row(row: usize, raw: RawRow) -> ReportResult<WorkoutEntry> {
    if raw.date.trim().is_empty() {
        return Err(ReportError::data_format(row, "missing date"));
    }
    let date = parse_entry_date(&raw.date)
        .ok_or_else(|| ReportError::data_format(row, format!("unparsable date '{}'", raw.date)))?;

    let category = raw.category.trim();
    if category.is_empty() {
        return Err(ReportError::data_format(row, "missing category"));
    }

    let weight = match raw.weight.as_deref() {
        Some(w) => {
            let value: f64 = w.trim().parse().map_err(|_| {
                ReportError::data_format(row, format!("unparsable weight '{}'", w))
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(ReportError::data_format(
                    row,
                    format!("weight must be a non-negative number, got '{}'", w),
                ));
            }
            Some(value)
        }
        None => None,
    };

    let reps = match raw.reps.as_deref() {
        Some(r) => Some(r.trim().parse::<u32>().map_err(|_| {
            ReportError::data_format(row, format!("unparsable reps '{}'", r))
        })?),
        None => None,
    };

    Ok(WorkoutEntry {
        date,
        exercise: raw.exercise.trim().to_string(),
        category: category.to_string(),
        weight,
        reps,
    })
}
