use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::{ReportError, ReportResult};
use crate::model::workout::RawRow;
use crate::repository::traits::WorkoutSource;

pub const COL_DATE: &str = "Date";
pub const COL_EXERCISE: &str = "Exercise";
pub const COL_CATEGORY: &str = "Category";
pub const COL_WEIGHT: &str = "Weight (lbs)";
pub const COL_REPS: &str = "Reps";

/// Reads a FitNotes-style CSV export. Columns other than the five required ones are ignored.
#[derive(Clone, Debug)]
pub struct CsvWorkoutSource {
    file_path: PathBuf,
}

impl CsvWorkoutSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn read_rows<R: Read>(reader: R) -> ReportResult<Vec<RawRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let columns = Columns::locate(&headers)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(columns.extract(&record?));
        }
        debug!(rows = rows.len(), "read csv rows");
        Ok(rows)
    }
}

impl WorkoutSource for CsvWorkoutSource {
    fn rows(&self) -> ReportResult<Vec<RawRow>> {
        info!(path = %self.file_path.display(), "reading workout log");
        let file = File::open(&self.file_path)?;
        Self::read_rows(BufReader::new(file))
    }
}

struct Columns {
    date: usize,
    exercise: usize,
    category: usize,
    weight: usize,
    reps: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> ReportResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ReportError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            date: find(COL_DATE)?,
            exercise: find(COL_EXERCISE)?,
            category: find(COL_CATEGORY)?,
            weight: find(COL_WEIGHT)?,
            reps: find(COL_REPS)?,
        })
    }

    fn extract(&self, record: &StringRecord) -> RawRow {
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        RawRow::new(
            cell(self.date),
            cell(self.exercise),
            cell(self.category),
            cell(self.weight),
            cell(self.reps),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
Date,Exercise,Category,Weight (lbs),Reps,Distance,Distance Unit,Time,Comment
2022-10-03,Barbell Squat,Legs,100.0,5,,,,
2022-10-03,Treadmill Running,Cardio,,,5.0,km,0:30:00,easy
2022-10-04,Flat Barbell Bench Press,Chest,80.0,8,,,,
";

    #[test]
    fn test_read_rows_ignores_extra_columns() {
        let rows = CsvWorkoutSource::read_rows(EXPORT.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], RawRow::new("2022-10-03", "Barbell Squat", "Legs", "100.0", "5"));
        assert_eq!(rows[1].weight, None);
        assert_eq!(rows[1].reps, None);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Date,Exercise,Category,Reps\n2022-10-03,Squat,Legs,5\n";
        let err = CsvWorkoutSource::read_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::MissingColumn(ref c) if c == COL_WEIGHT));
        assert!(err.is_data_format());
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "Reps,Weight (lbs),Category,Exercise,Date\n5,100,Legs,Squat,2022-10-03\n";
        let rows = CsvWorkoutSource::read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0], RawRow::new("2022-10-03", "Squat", "Legs", "100", "5"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CsvWorkoutSource::new("/definitely/not/here.csv");
        assert!(matches!(source.rows(), Err(ReportError::Io(_))));
    }
}
