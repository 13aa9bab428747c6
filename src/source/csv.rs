//! CSV table source
//!
//! Each range id maps to a headerless CSV export of that range. Fields are
//! typed with [`Cell::from_field`].

use std::collections::HashMap;
use std::path::PathBuf;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Cell, Row};

use super::TableSource;

/// Table source reading one CSV file per range
#[derive(Debug, Clone, Default)]
pub struct CsvSource {
    files: HashMap<String, PathBuf>,
}

impl CsvSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: map a range id to a CSV file
    pub fn with_range(mut self, range: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        self.files.insert(range.into(), file.into());
        self
    }

    /// Parse CSV text into rows
    pub fn parse_rows<R: std::io::Read>(reader: R) -> Result<Vec<Row>, csv::Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(Cell::from_field).collect());
        }
        Ok(rows)
    }
}

impl TableSource for CsvSource {
    fn fetch_range(&self, range: &str) -> LedgerResult<Vec<Row>> {
        let path = self
            .files
            .get(range)
            .ok_or_else(|| LedgerError::fetch_failed(range, "no CSV file configured"))?;

        let file = std::fs::File::open(path).map_err(|e| {
            LedgerError::fetch_failed(range, format!("failed to open {}: {}", path.display(), e))
        })?;

        let rows = Self::parse_rows(file).map_err(|e| {
            LedgerError::fetch_failed(range, format!("failed to read {}: {}", path.display(), e))
        })?;

        debug!(range, path = %path.display(), rows = rows.len(), "Read CSV range");
        Ok(rows)
    }
}
