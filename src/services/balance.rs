//! Balance extraction
//!
//! The balance range is two rows wide-by-user: row 0 holds the balances and
//! row 1 the names, one column per user. The order of the returned list is
//! the index space the transaction columns refer to.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Row, UserBalance};

/// Row holding the numeric balances
const BALANCE_ROW: usize = 0;
/// Row holding the user names
const NAME_ROW: usize = 1;

/// Build the ordered list of user balances from the balance table
///
/// Fails with [`LedgerError::MalformedTable`] when the table does not have
/// exactly two rows or when the two rows differ in width. Names are not
/// deduplicated and values are not checked for plausibility.
pub fn extract_balances(table: &[Row]) -> LedgerResult<Vec<UserBalance>> {
    if table.len() != 2 {
        return Err(LedgerError::MalformedTable(format!(
            "balance table must have 2 rows, got {}",
            table.len()
        )));
    }

    let values = &table[BALANCE_ROW];
    let names = &table[NAME_ROW];
    if values.len() != names.len() {
        return Err(LedgerError::MalformedTable(format!(
            "balance row has {} columns but name row has {}",
            values.len(),
            names.len()
        )));
    }

    Ok(values
        .iter()
        .zip(names)
        .map(|(value, name)| UserBalance::new(name.as_string(), value.as_number()))
        .collect())
}
