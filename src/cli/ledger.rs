//! Ledger CLI commands
//!
//! Balances, the transaction register and single transaction details, all
//! read live from the configured table source.

use crate::config::Settings;
use crate::display::{
    format_balance_list, format_reconcile_summary, format_transaction_details,
    format_transaction_register,
};
use crate::error::LedgerResult;
use crate::services::LedgerService;
use crate::source::TableSource;

/// Print the balance of every user
pub fn handle_balances(source: &dyn TableSource, settings: &Settings) -> LedgerResult<()> {
    let service = LedgerService::new(source, settings);
    let balances = service.list_user_balances()?;

    print!("{}", format_balance_list(&balances, &settings.currency_symbol));
    Ok(())
}

/// Print the transaction register followed by the reconcile summary
pub fn handle_transactions(
    source: &dyn TableSource,
    settings: &Settings,
    limit: Option<usize>,
    show_skipped: bool,
) -> LedgerResult<()> {
    let service = LedgerService::new(source, settings);
    let snapshot = service.reconcile()?;
    let report = &snapshot.report;

    let shown = match limit {
        Some(limit) => &report.transactions[..limit.min(report.transactions.len())],
        None => &report.transactions[..],
    };

    print!(
        "{}",
        format_transaction_register(shown, &settings.currency_symbol, settings.balance_tolerance)
    );
    if shown.len() < report.transactions.len() {
        println!("... {} more", report.transactions.len() - shown.len());
    }
    println!();
    print!(
        "{}",
        format_reconcile_summary(report, settings.balance_tolerance, show_skipped)
    );

    Ok(())
}

/// Print a single transaction by register index
pub fn handle_transaction(
    source: &dyn TableSource,
    settings: &Settings,
    index: usize,
) -> LedgerResult<()> {
    let service = LedgerService::new(source, settings);
    let txn = service.transaction(index)?;

    print!(
        "{}",
        format_transaction_details(&txn, &settings.currency_symbol, settings.balance_tolerance)
    );
    Ok(())
}
