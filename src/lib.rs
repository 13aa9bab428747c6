//! sheet-ledger - shared expense ledger reconciliation from spreadsheet ranges
//!
//! This library reads a group expense spreadsheet as raw cell ranges and
//! turns it into typed data: per-user balances from a two-row balance table,
//! and one transaction per expense row, with the row's value split among
//! participants in proportion to their weights.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Cells, users, balances and transactions
//! - `source`: Raw table sources (snapshot files, CSV, in-memory)
//! - `services`: Balance extraction, transaction derivation, reconciliation
//! - `storage`: JSON file storage for the user registry
//! - `export`: JSON, YAML and CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `sheet-ledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use sheet_ledger::config::{LedgerPaths, Settings};
//! use sheet_ledger::services::LedgerService;
//! use sheet_ledger::source::open_source;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let source = open_source(&settings, &paths)?;
//! let snapshot = LedgerService::new(&*source, &settings).reconcile()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod source;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
