//! Transaction derivation
//!
//! Turns one raw ledger row into a [`Transaction`] with a single sender and
//! a proportional split of the value among the users whose count column is
//! positive.
//!
//! The participant count columns are positional: the i-th count column
//! belongs to the i-th user of the balance table fetched alongside.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Cell, Transaction, User, UserTransaction};

/// Column layout of a transaction row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Index of the total value column
    pub total_value_column: usize,
    /// Index of the sender name column
    pub sender_column: usize,
    /// Index of the description column
    pub description_column: usize,
    /// Index of the first per-user count column
    pub participant_start_column: usize,
    /// Index of the total participant count column
    pub total_count_column: usize,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            total_value_column: 1,
            sender_column: 2,
            description_column: 3,
            participant_start_column: 4,
            total_count_column: 17,
        }
    }
}

impl ColumnMapping {
    /// Create the default column mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-user count columns for `user_count` users
    ///
    /// `None` when the window would run past `usize::MAX`.
    pub fn participant_columns(&self, user_count: usize) -> Option<Range<usize>> {
        let end = self.participant_start_column.checked_add(user_count)?;
        Some(self.participant_start_column..end)
    }

    /// Check that the scalar columns are pairwise distinct
    pub fn validate(&self) -> LedgerResult<()> {
        let named = [
            ("total value", self.total_value_column),
            ("sender", self.sender_column),
            ("description", self.description_column),
            ("total count", self.total_count_column),
        ];

        for (i, (a_name, a)) in named.iter().enumerate() {
            for (b_name, b) in &named[i + 1..] {
                if a == b {
                    return Err(LedgerError::Config(format!(
                        "{} and {} columns are both {}",
                        a_name, b_name, a
                    )));
                }
            }
        }

        Ok(())
    }

    /// Check the mapping against the number of users in the balance table
    ///
    /// The participant window may include the total count column: with a
    /// wide enough balance table the last user's count column and the total
    /// count column are the same cell.
    pub fn validate_for(&self, user_count: usize) -> LedgerResult<()> {
        self.validate()?;

        let window = self.participant_columns(user_count).ok_or_else(|| {
            LedgerError::Config(format!(
                "participant columns starting at {} cannot hold {} users",
                self.participant_start_column, user_count
            ))
        })?;
        for (name, column) in [
            ("total value", self.total_value_column),
            ("sender", self.sender_column),
            ("description", self.description_column),
        ] {
            if window.contains(&column) {
                return Err(LedgerError::Config(format!(
                    "{} column {} lies inside the participant columns {}..{}",
                    name, column, window.start, window.end
                )));
            }
        }

        Ok(())
    }

    /// Whether the participant window reaches the total count column
    pub fn window_covers_total_count(&self, user_count: usize) -> bool {
        self.participant_columns(user_count)
            .is_some_and(|window| window.contains(&self.total_count_column))
    }
}

/// Failure to derive a transaction from a single row
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    /// The row's total count is not positive: a blank or summary row
    #[error("row encodes no transaction")]
    Empty,

    /// The row is shorter than the column mapping requires
    #[error("row has {len} cells, column {column} is out of range")]
    MissingCell { column: usize, len: usize },
}

impl RowError {
    /// Check if this is the "no transaction" condition rather than a failure
    pub fn is_empty_transaction(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

fn cell_at(row: &[Cell], column: usize) -> Result<&Cell, RowError> {
    row.get(column).ok_or(RowError::MissingCell {
        column,
        len: row.len(),
    })
}

/// Derive a transaction from one row
///
/// The row's stated total count is the denominator of every share; it is
/// not recomputed from the per-user counts, so a row whose total disagrees
/// with its counts yields receivers that do not sum to the value.
pub fn derive_transaction(
    row: &[Cell],
    users: &[User],
    columns: &ColumnMapping,
) -> Result<Transaction, RowError> {
    let total_count = cell_at(row, columns.total_count_column)?.as_number();
    if total_count <= 0.0 {
        return Err(RowError::Empty);
    }

    let total_value = cell_at(row, columns.total_value_column)?.as_number();
    let senders = vec![UserTransaction::new(
        cell_at(row, columns.sender_column)?.as_string(),
        total_value,
    )];

    let mut receivers = Vec::new();
    for (i, user) in users.iter().enumerate() {
        // An overflowing column is past the end of any row
        let column = columns.participant_start_column.saturating_add(i);
        let count = cell_at(row, column)?.as_number();
        if count <= 0.0 {
            continue;
        }
        receivers.push(UserTransaction::new(
            user.name.clone(),
            total_value * count / total_count,
        ));
    }

    Ok(Transaction {
        description: cell_at(row, columns.description_column)?.as_string(),
        value: total_value,
        senders,
        receivers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;

    fn users(names: &[&str]) -> Vec<User> {
        names.iter().map(|n| User::new(*n)).collect()
    }

    /// Build an 18-cell row in the default layout
    fn row(value: f64, sender: &str, description: &str, counts: &[f64], total: f64) -> Row {
        let mut row = vec![Cell::Empty; 18];
        row[1] = Cell::from(value);
        row[2] = Cell::from(sender);
        row[3] = Cell::from(description);
        for (i, count) in counts.iter().enumerate() {
            row[4 + i] = Cell::from(*count);
        }
        row[17] = Cell::from(total);
        row
    }

    #[test]
    fn test_proportional_split() {
        let users = users(&["Bob", "Carol", "Dave"]);
        let row = row(300.0, "Alice", "Dinner", &[1.0, 2.0, 0.0], 3.0);

        let txn = derive_transaction(&row, &users, &ColumnMapping::default()).unwrap();

        assert_eq!(txn.description, "Dinner");
        assert_eq!(txn.value, 300.0);
        assert_eq!(txn.senders, vec![UserTransaction::new("Alice", 300.0)]);
        assert_eq!(
            txn.receivers,
            vec![
                UserTransaction::new("Bob", 100.0),
                UserTransaction::new("Carol", 200.0),
            ]
        );
    }

    #[test]
    fn test_zero_total_count_is_empty() {
        let users = users(&["Bob"]);
        let row = row(50.0, "Alice", "Summary", &[1.0], 0.0);

        let err = derive_transaction(&row, &users, &ColumnMapping::default()).unwrap_err();
        assert_eq!(err, RowError::Empty);
        assert!(err.is_empty_transaction());
    }

    #[test]
    fn test_negative_or_textual_total_count_is_empty() {
        let users = users(&["Bob"]);
        let mut r = row(50.0, "Alice", "x", &[1.0], -2.0);
        assert_eq!(
            derive_transaction(&r, &users, &ColumnMapping::default()),
            Err(RowError::Empty)
        );

        r[17] = Cell::from("three");
        assert_eq!(
            derive_transaction(&r, &users, &ColumnMapping::default()),
            Err(RowError::Empty)
        );
    }

    #[test]
    fn test_truncated_row_is_missing_cell() {
        let users = users(&["Bob"]);
        let mut r = row(50.0, "Alice", "x", &[1.0], 1.0);
        r.truncate(10);

        let err = derive_transaction(&r, &users, &ColumnMapping::default()).unwrap_err();
        assert_eq!(err, RowError::MissingCell { column: 17, len: 10 });
        assert!(!err.is_empty_transaction());
    }

    #[test]
    fn test_blank_row_is_missing_cell() {
        let err = derive_transaction(&[], &users(&["Bob"]), &ColumnMapping::default())
            .unwrap_err();
        assert_eq!(err, RowError::MissingCell { column: 17, len: 0 });
    }

    #[test]
    fn test_participant_column_past_row_end() {
        // 20 users need count columns up to 23 but the row stops at 18 cells
        let names: Vec<String> = (0..20).map(|i| format!("u{}", i)).collect();
        let users: Vec<User> = names.iter().map(|n| User::new(n.as_str())).collect();
        let r = row(10.0, "Alice", "x", &[1.0], 1.0);

        let err = derive_transaction(&r, &users, &ColumnMapping::default()).unwrap_err();
        assert_eq!(err, RowError::MissingCell { column: 18, len: 18 });
    }

    #[test]
    fn test_stated_total_is_trusted() {
        let users = users(&["Bob", "Carol"]);
        // Per-user counts sum to 2 but the row states 4
        let r = row(100.0, "Alice", "Taxi", &[1.0, 1.0], 4.0);

        let txn = derive_transaction(&r, &users, &ColumnMapping::default()).unwrap();

        assert_eq!(txn.share_of("Bob"), Some(25.0));
        assert_eq!(txn.share_of("Carol"), Some(25.0));
        assert_eq!(txn.allocation_gap(), 50.0);
    }

    #[test]
    fn test_wrongly_typed_cells_read_as_zero_values() {
        let users = users(&["Bob", "Carol"]);
        let mut r = row(0.0, "", "", &[1.0, 0.0], 1.0);
        r[1] = Cell::from("lots");
        r[2] = Cell::from(12.0);
        r[5] = Cell::from("x");

        let txn = derive_transaction(&r, &users, &ColumnMapping::default()).unwrap();

        assert_eq!(txn.value, 0.0);
        assert_eq!(txn.senders[0].name, "");
        assert_eq!(txn.receivers, vec![UserTransaction::new("Bob", 0.0)]);
    }

    #[test]
    fn test_derivation_is_repeatable() {
        let users = users(&["Bob", "Carol", "Dave"]);
        let r = row(99.99, "Alice", "Groceries", &[1.0, 1.0, 1.0], 3.0);
        let columns = ColumnMapping::default();

        let first = derive_transaction(&r, &users, &columns).unwrap();
        let second = derive_transaction(&r, &users, &columns).unwrap();

        assert_eq!(first, second);
        for (a, b) in first.receivers.iter().zip(&second.receivers) {
            assert_eq!(a.amount.to_bits(), b.amount.to_bits());
        }
    }

    #[test]
    fn test_custom_mapping() {
        let columns = ColumnMapping {
            total_value_column: 0,
            sender_column: 1,
            description_column: 2,
            participant_start_column: 3,
            total_count_column: 5,
        };
        let users = users(&["Bob", "Carol"]);
        let r: Row = vec![
            Cell::from(60.0),
            Cell::from("Alice"),
            Cell::from("Movie"),
            Cell::from(1.0),
            Cell::from(2.0),
            Cell::from(3.0),
        ];

        let txn = derive_transaction(&r, &users, &columns).unwrap();
        assert_eq!(txn.share_of("Bob"), Some(20.0));
        assert_eq!(txn.share_of("Carol"), Some(40.0));
    }

    #[test]
    fn test_default_mapping_validates() {
        let columns = ColumnMapping::default();
        assert!(columns.validate().is_ok());
        assert!(columns.validate_for(14).is_ok());
        assert!(columns.window_covers_total_count(14));
        assert!(!columns.window_covers_total_count(13));
    }

    #[test]
    fn test_participant_window_overflow_rejected() {
        let columns = ColumnMapping {
            participant_start_column: usize::MAX,
            ..ColumnMapping::default()
        };

        assert!(columns.validate().is_ok());
        assert_eq!(columns.participant_columns(2), None);
        assert!(matches!(columns.validate_for(2), Err(LedgerError::Config(_))));
        assert!(!columns.window_covers_total_count(2));

        let users = users(&["Bob", "Carol"]);
        let r = row(300.0, "Alice", "Dinner", &[1.0, 2.0], 3.0);
        assert!(matches!(
            derive_transaction(&r, &users, &columns),
            Err(RowError::MissingCell { len: 18, .. })
        ));
    }

    #[test]
    fn test_duplicate_scalar_columns_rejected() {
        let columns = ColumnMapping {
            sender_column: 3,
            ..ColumnMapping::default()
        };
        assert!(matches!(columns.validate(), Err(LedgerError::Config(_))));
    }

    #[test]
    fn test_window_over_description_rejected() {
        let columns = ColumnMapping {
            description_column: 10,
            ..ColumnMapping::default()
        };
        assert!(columns.validate().is_ok());
        // Six users occupy columns 4..10, seven reach the description at 10
        assert!(columns.validate_for(6).is_ok());
        assert!(columns.validate_for(7).is_err());
    }

    #[test]
    fn test_mapping_deserializes_with_defaults() {
        let columns: ColumnMapping =
            serde_json::from_str(r#"{"total_count_column": 20}"#).unwrap();
        assert_eq!(columns.total_count_column, 20);
        assert_eq!(columns.participant_start_column, 4);
    }
}
