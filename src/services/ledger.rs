//! Ledger service
//!
//! Runs the whole pipeline over a table source: fetch the balance and
//! transaction ranges, extract the user ordering, and reconcile the
//! transaction rows against it. Fetch failures and a malformed balance table
//! fail the whole call; row failures end up in the report.

use tracing::debug;

use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, User, UserBalance};
use crate::source::TableSource;

use super::balance::extract_balances;
use super::reconcile::{reconcile_rows, ReconcileReport};

/// Balances and transactions from one consistent fetch
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    pub balances: Vec<UserBalance>,
    pub report: ReconcileReport,
}

impl LedgerSnapshot {
    /// Users in balance table order
    pub fn users(&self) -> Vec<User> {
        self.balances.iter().map(|b| b.user.clone()).collect()
    }
}

/// Service reading the ledger from a table source
pub struct LedgerService<'a, S: TableSource + ?Sized> {
    source: &'a S,
    settings: &'a Settings,
}

impl<'a, S: TableSource + ?Sized> LedgerService<'a, S> {
    /// Create a new ledger service
    pub fn new(source: &'a S, settings: &'a Settings) -> Self {
        Self { source, settings }
    }

    /// Fetch the balance table and extract user balances
    pub fn list_user_balances(&self) -> LedgerResult<Vec<UserBalance>> {
        let range = &self.settings.ranges.balance;
        debug!(range = %range, "Fetching balance range");
        let table = self.source.fetch_range(range)?;
        extract_balances(&table)
    }

    /// Users in balance table order
    pub fn list_users(&self) -> LedgerResult<Vec<User>> {
        Ok(self
            .list_user_balances()?
            .into_iter()
            .map(|b| b.user)
            .collect())
    }

    /// Fetch both ranges together and reconcile the transaction rows
    pub fn reconcile(&self) -> LedgerResult<LedgerSnapshot> {
        let ranges = &self.settings.ranges;
        let columns = &self.settings.columns;

        debug!(
            balance = %ranges.balance,
            transactions = %ranges.transactions,
            "Fetching ledger ranges"
        );
        let mut tables = self
            .source
            .fetch_ranges(&[ranges.balance.as_str(), ranges.transactions.as_str()])?;

        let (Some(transaction_rows), Some(balance_table)) = (tables.pop(), tables.pop()) else {
            return Err(LedgerError::fetch_failed(
                ranges.transactions.as_str(),
                "source returned fewer ranges than requested",
            ));
        };

        let balances = extract_balances(&balance_table)?;
        let users: Vec<User> = balances.iter().map(|b| b.user.clone()).collect();

        columns.validate_for(users.len())?;
        if columns.window_covers_total_count(users.len()) {
            debug!(
                users = users.len(),
                total_count_column = columns.total_count_column,
                "Last participant column is the total count column"
            );
        }

        let report = reconcile_rows(&transaction_rows, &users, columns);
        Ok(LedgerSnapshot { balances, report })
    }

    /// Derived transactions, in row order
    pub fn list_transactions(&self) -> LedgerResult<Vec<Transaction>> {
        Ok(self.reconcile()?.report.transactions)
    }

    /// A single derived transaction by position
    pub fn transaction(&self, index: usize) -> LedgerResult<Transaction> {
        self.list_transactions()?
            .into_iter()
            .nth(index)
            .ok_or_else(|| LedgerError::transaction_not_found(index.to_string()))
    }
}
