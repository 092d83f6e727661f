pub mod json;
pub mod svg;

use std::path::Path;

pub use json::JsonRenderer;
pub use svg::SvgRenderer;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Svg,
    Json,
}

impl Format {
    /// Picks the format from the output extension when none was requested.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Svg,
        }
    }
}
