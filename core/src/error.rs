use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("data format error in row {row}: {message}")]
    DataFormat { row: usize, message: String },

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("unknown period '{0}' (expected week or month)")]
    UnknownPeriod(String),

    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub fn data_format(row: usize, message: impl Into<String>) -> Self {
        ReportError::DataFormat {
            row,
            message: message.into(),
        }
    }

    /// Both a malformed cell and an absent header count as bad input data.
    pub fn is_data_format(&self) -> bool {
        matches!(
            self,
            ReportError::DataFormat { .. } | ReportError::MissingColumn(_)
        )
    }
}
