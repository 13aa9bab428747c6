//! Export module for sheet-ledger
//!
//! - JSON: machine-readable snapshot with row accounting
//! - YAML: the same structure, human-readable
//! - CSV: flat transaction and balance tables

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_balances_csv, export_transactions_csv};
pub use json::{export_json, read_export_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
