pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use error::{ReportError, ReportResult};
pub use model::period::{ChartKind, Dimension, Metric, Period};
pub use model::record_store::RecordStore;
pub use model::report::{ChartSpec, Document, PageKind, ReportPlan};
pub use model::series::{Series, SeriesPoint};
pub use model::workout::{RawRow, WorkoutEntry};
pub use repository::{CsvWorkoutSource, Renderer, WorkoutSource};
pub use service::aggregator::aggregate;
pub use time::parse_since;
pub use usecase::report::{ReportBuilder, ReportUseCase};
