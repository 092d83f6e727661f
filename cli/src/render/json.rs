use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use gymreport_core::{Document, Renderer};

/// Dumps the computed document, series included, as pretty JSON.
pub struct JsonRenderer {
    file_path: PathBuf,
}

impl JsonRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: path.into(),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, document: &Document) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("Could not create {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, document)?;
        writer.flush()?;
        info!(path = %self.file_path.display(), "wrote json report");
        Ok(())
    }
}
