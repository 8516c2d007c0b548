use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::CsvReader};
use tracing::info;

/// Read-only historical feature table, loaded once at startup and shared by
/// reference across pipeline invocations.
#[derive(Debug, Clone)]
pub struct HistoricalData {
    frame: DataFrame,
}

impl HistoricalData {
    /// Wrap an already-materialized frame.
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Reads a CSV file from `path` into the store.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open historical data: {}", path.display()))?;
        let frame = CsvReader::new(file).finish()?;
        info!(rows = frame.height(), cols = frame.width(), "loaded historical data");
        Ok(Self { frame })
    }

    #[inline] pub fn frame(&self) -> &DataFrame { &self.frame }

    #[inline] pub fn height(&self) -> usize { self.frame.height() }

    #[inline] pub fn is_empty(&self) -> bool { self.frame.height() == 0 }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }
}
