//! Configuration module for sheet-ledger
//!
//! - XDG-compliant path resolution
//! - Settings persistence (source, ranges, column layout)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{Settings, SheetRanges, SourceSettings};
