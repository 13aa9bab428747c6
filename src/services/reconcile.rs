//! Batch reconciliation
//!
//! Runs transaction derivation over every row of the transaction range.
//! Empty rows are dropped silently; rows that fail to derive are dropped with
//! a diagnostic and a warning, and never abort the batch. Output keeps the
//! input row order.

use tracing::{debug, warn};

use crate::models::{Row, Transaction, User};

use super::derive::{derive_transaction, ColumnMapping, RowError};

/// A row that was dropped because it could not be derived
#[derive(Debug, Clone, PartialEq)]
pub struct RowDiagnostic {
    /// Position of the row within the fetched range (0-indexed)
    pub row_index: usize,
    /// The raw row as fetched
    pub row: Row,
    /// Why derivation failed
    pub error: RowError,
}

/// Outcome of reconciling one batch of rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    /// Derived transactions, in row order
    pub transactions: Vec<Transaction>,
    /// Number of rows that encoded no transaction
    pub empty_rows: usize,
    /// Rows dropped because derivation failed
    pub diagnostics: Vec<RowDiagnostic>,
}

impl ReconcileReport {
    /// Number of rows processed
    pub fn total_rows(&self) -> usize {
        self.transactions.len() + self.empty_rows + self.diagnostics.len()
    }

    /// Check whether every non-empty row produced a transaction
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Transactions whose receivers do not account for the whole value,
    /// with their position in [`Self::transactions`]
    pub fn unbalanced(&self, tolerance: f64) -> Vec<(usize, &Transaction)> {
        self.transactions
            .iter()
            .enumerate()
            .filter(|(_, txn)| !txn.is_balanced(tolerance))
            .collect()
    }
}

/// Reconcile a batch of raw rows against the user ordering
pub fn reconcile_rows(rows: &[Row], users: &[User], columns: &ColumnMapping) -> ReconcileReport {
    debug!(transaction_count = rows.len(), "Reconciling transaction rows");

    let mut report = ReconcileReport::default();
    for (row_index, row) in rows.iter().enumerate() {
        match derive_transaction(row, users, columns) {
            Ok(txn) => report.transactions.push(txn),
            Err(RowError::Empty) => report.empty_rows += 1,
            Err(error) => {
                warn!(row = row_index, error = %error, raw = ?row, "Skipping transaction row");
                report.diagnostics.push(RowDiagnostic {
                    row_index,
                    row: row.clone(),
                    error,
                });
            }
        }
    }

    debug!(
        derived = report.transactions.len(),
        empty = report.empty_rows,
        dropped = report.diagnostics.len(),
        "Reconciliation finished"
    );
    report
}

/// Derive all transactions from a batch of rows, dropping the rest
pub fn derive_transactions(
    rows: &[Row],
    users: &[User],
    columns: &ColumnMapping,
) -> Vec<Transaction> {
    reconcile_rows(rows, users, columns).transactions
}
