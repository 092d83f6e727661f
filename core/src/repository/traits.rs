use crate::error::ReportResult;
use crate::model::report::Document;
use crate::model::workout::RawRow;

/// Where the raw workout log comes from.
pub trait WorkoutSource {
    fn rows(&self) -> ReportResult<Vec<RawRow>>;
}

/// Consumes a finished document, e.g. by drawing it to a file.
pub trait Renderer {
    fn render(&self, document: &Document) -> anyhow::Result<()>;
}
