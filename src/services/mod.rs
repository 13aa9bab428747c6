//! Service layer for sheet-ledger
//!
//! The pure derivation core (balance extraction, transaction derivation,
//! batch reconciliation) plus the services that drive it over a table source
//! and keep the local user registry.

pub mod balance;
pub mod derive;
pub mod ledger;
pub mod reconcile;
pub mod user;

pub use balance::extract_balances;
pub use derive::{derive_transaction, ColumnMapping, RowError};
pub use ledger::{LedgerService, LedgerSnapshot};
pub use reconcile::{derive_transactions, reconcile_rows, ReconcileReport, RowDiagnostic};
pub use user::{SyncResult, UserService};
