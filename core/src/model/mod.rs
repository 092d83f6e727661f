pub mod period;
pub mod record_store;
pub mod report;
pub mod series;
pub mod workout;
