//! CSV export
//!
//! Transactions are flattened to one line per party so the file can be
//! summed per name in any spreadsheet.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, UserBalance};

fn csv_err(e: csv::Error) -> LedgerError {
    LedgerError::Export(e.to_string())
}

/// Export transactions, one line per sender or receiver
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
) -> LedgerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Transaction", "Description", "Value", "Role", "Name", "Amount"])
        .map_err(csv_err)?;

    for (index, txn) in transactions.iter().enumerate() {
        let parties = txn
            .senders
            .iter()
            .map(|p| ("sender", p))
            .chain(txn.receivers.iter().map(|p| ("receiver", p)));

        for (role, party) in parties {
            wtr.write_record([
                index.to_string(),
                txn.description.clone(),
                txn.value.to_string(),
                role.to_string(),
                party.name.clone(),
                party.amount.to_string(),
            ])
            .map_err(csv_err)?;
        }
    }

    wtr.flush().map_err(|e| LedgerError::Export(e.to_string()))
}

/// Export balances in sheet column order
pub fn export_balances_csv<W: Write>(balances: &[UserBalance], writer: &mut W) -> LedgerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Name", "Balance"]).map_err(csv_err)?;

    for balance in balances {
        wtr.write_record([balance.user.name.clone(), balance.balance.value.to_string()])
            .map_err(csv_err)?;
    }

    wtr.flush().map_err(|e| LedgerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_snapshot;

    #[test]
    fn test_transactions_csv() {
        let snapshot = sample_snapshot();
        let mut output = Vec::new();
        export_transactions_csv(&snapshot.report.transactions, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Transaction,Description,Value,Role,Name,Amount");
        assert_eq!(lines[1], "0,\"Dinner, with dessert\",300,sender,Alice,300");
        assert_eq!(lines[2], "0,\"Dinner, with dessert\",300,receiver,Bob,100");
        assert_eq!(lines[4], "1,Taxi,40,sender,Bob,40");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_balances_csv() {
        let snapshot = sample_snapshot();
        let mut output = Vec::new();
        export_balances_csv(&snapshot.balances, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(text, "Name,Balance\nBob,-100\nCarol,100\n");
    }
}
