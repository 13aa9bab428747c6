//! Transaction display formatting
//!
//! Register views, single transaction details and the reconcile summary.

use crate::models::Transaction;
use crate::services::ReconcileReport;

use super::{format_amount, truncate};

/// Format a single transaction as a register row
pub fn format_transaction_row(
    index: usize,
    txn: &Transaction,
    symbol: &str,
    tolerance: f64,
) -> String {
    let flag = if txn.is_balanced(tolerance) { " " } else { "!" };
    let senders: Vec<_> = txn.senders.iter().map(|s| s.name.as_str()).collect();

    format!(
        "{:>4} {} {:24} {:12} {:>12} {:>3}",
        index,
        flag,
        truncate(&txn.description, 24),
        truncate(&senders.join(", "), 12),
        format_amount(txn.value, symbol),
        txn.receivers.len()
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[Transaction],
    symbol: &str,
    tolerance: f64,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4} {} {:24} {:12} {:>12} {:>3}\n",
        "#", " ", "Description", "Sender", "Value", "Rcv"
    ));
    output.push_str(&"-".repeat(61));
    output.push('\n');

    for (i, txn) in transactions.iter().enumerate() {
        output.push_str(&format_transaction_row(i, txn, symbol, tolerance));
        output.push('\n');
    }

    output
}

/// Format transaction details, one party per line
///
/// The unallocated remainder is only shown when it exceeds `tolerance`.
pub fn format_transaction_details(txn: &Transaction, symbol: &str, tolerance: f64) -> String {
    let mut output = String::new();

    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Value:       {}\n", format_amount(txn.value, symbol)));

    output.push_str("Senders:\n");
    for sender in &txn.senders {
        output.push_str(&format!(
            "  {:20} {:>12}\n",
            sender.name,
            format_amount(sender.amount, symbol)
        ));
    }

    output.push_str("Receivers:\n");
    if txn.receivers.is_empty() {
        output.push_str("  (none)\n");
    }
    for receiver in &txn.receivers {
        output.push_str(&format!(
            "  {:20} {:>12}\n",
            receiver.name,
            format_amount(receiver.amount, symbol)
        ));
    }

    if !txn.is_balanced(tolerance) {
        output.push_str(&format!(
            "Unallocated: {}\n",
            format_amount(txn.allocation_gap(), symbol)
        ));
    }

    output
}

/// Summarize a reconcile run, optionally listing dropped rows
///
/// Row numbers are 0-based offsets into the transaction range, as in logs
/// and exports.
pub fn format_reconcile_summary(
    report: &ReconcileReport,
    tolerance: f64,
    show_dropped: bool,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} rows: {} transactions, {} empty, {} dropped",
        report.total_rows(),
        report.transactions.len(),
        report.empty_rows,
        report.diagnostics.len()
    ));
    let unbalanced = report.unbalanced(tolerance).len();
    if unbalanced > 0 {
        output.push_str(&format!(", {} unbalanced (!)", unbalanced));
    }
    output.push('\n');

    if show_dropped {
        for diag in &report.diagnostics {
            output.push_str(&format!("  row {}: {}\n", diag.row_index, diag.error));
        }
    }

    output
}
