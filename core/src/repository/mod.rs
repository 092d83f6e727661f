pub mod file;
pub mod traits;

// Re-export
pub use file::CsvWorkoutSource;
pub use traits::{Renderer, WorkoutSource};
