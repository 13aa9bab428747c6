//! In-memory table source

use std::collections::HashMap;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Row;

use super::TableSource;

/// Table source backed by a map of range id to rows
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    ranges: HashMap<String, Vec<Row>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: add or replace a range
    pub fn with_range(mut self, range: impl Into<String>, rows: Vec<Row>) -> Self {
        self.insert(range, rows);
        self
    }

    /// Add or replace a range
    pub fn insert(&mut self, range: impl Into<String>, rows: Vec<Row>) {
        self.ranges.insert(range.into(), rows);
    }

    /// Range ids held by this source
    pub fn range_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.ranges.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl TableSource for MemorySource {
    fn fetch_range(&self, range: &str) -> LedgerResult<Vec<Row>> {
        self.ranges
            .get(range)
            .cloned()
            .ok_or_else(|| LedgerError::fetch_failed(range, "range not present in source"))
    }
}
