//! Raw table sources
//!
//! A table source answers "give me the rows of this range". The core treats
//! it as an opaque capability: no retries, timeouts or caching happen here.
//!
//! The balance range and the transaction range are joined by column
//! position only, so callers should fetch them together through
//! [`TableSource::fetch_ranges`]. Sources that can serve several ranges from
//! one consistent read override it.

pub mod csv;
pub mod memory;
pub mod snapshot;

pub use self::csv::CsvSource;
pub use memory::MemorySource;
pub use snapshot::{load_snapshot, SnapshotDocument, ValueRange};

use crate::config::paths::LedgerPaths;
use crate::config::settings::{Settings, SourceSettings};
use crate::error::LedgerResult;
use crate::models::Row;

/// Provider of fixed-shape tabular ranges
pub trait TableSource {
    /// Fetch the rows of a single range
    fn fetch_range(&self, range: &str) -> LedgerResult<Vec<Row>>;

    /// Fetch several ranges, in the order requested
    fn fetch_ranges(&self, ranges: &[&str]) -> LedgerResult<Vec<Vec<Row>>> {
        ranges.iter().map(|range| self.fetch_range(range)).collect()
    }
}

impl<T: TableSource + ?Sized> TableSource for Box<T> {
    fn fetch_range(&self, range: &str) -> LedgerResult<Vec<Row>> {
        (**self).fetch_range(range)
    }

    fn fetch_ranges(&self, ranges: &[&str]) -> LedgerResult<Vec<Vec<Row>>> {
        (**self).fetch_ranges(ranges)
    }
}

/// Open the source configured in settings
///
/// A snapshot path without an explicit location falls back to
/// `snapshot.json` in the base directory.
pub fn open_source(settings: &Settings, paths: &LedgerPaths) -> LedgerResult<Box<dyn TableSource>> {
    match &settings.source {
        SourceSettings::Snapshot { path } => {
            let path = path.clone().unwrap_or_else(|| paths.snapshot_file());
            Ok(Box::new(load_snapshot(&path)?))
        }
        SourceSettings::Csv {
            balance_file,
            transaction_file,
        } => {
            let source = CsvSource::new()
                .with_range(&settings.ranges.balance, paths.resolve(balance_file))
                .with_range(&settings.ranges.transactions, paths.resolve(transaction_file));
            Ok(Box::new(source))
        }
    }
}
