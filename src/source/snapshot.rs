//! Values snapshot documents
//!
//! A snapshot is the JSON body of a spreadsheet "batch get values" response
//! saved to disk. Every range in it was read at the same time, which makes it
//! a consistent source for the balance and transaction ranges together.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LedgerResult;
use crate::models::Row;
use crate::storage::file_io::read_json_required;

use super::MemorySource;

/// One range of a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// Range id, e.g. `201911!U1:AH2`
    pub range: String,

    /// Row-major cell values; trailing blank rows and cells may be omitted
    #[serde(default)]
    pub values: Vec<Row>,
}

/// A batch of ranges read together
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,

    #[serde(default)]
    pub value_ranges: Vec<ValueRange>,
}

impl From<SnapshotDocument> for MemorySource {
    fn from(doc: SnapshotDocument) -> Self {
        doc.value_ranges
            .into_iter()
            .fold(MemorySource::new(), |source, vr| {
                source.with_range(vr.range, vr.values)
            })
    }
}

/// Load a snapshot file into a memory source
pub fn load_snapshot(path: &Path) -> LedgerResult<MemorySource> {
    let doc: SnapshotDocument = read_json_required(path)?;
    debug!(
        path = %path.display(),
        ranges = doc.value_ranges.len(),
        "Loaded values snapshot"
    );
    Ok(doc.into())
}
