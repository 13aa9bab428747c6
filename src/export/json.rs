//! JSON export
//!
//! Serializes one reconciled ledger snapshot with a schema version and row
//! accounting, so a consumer can tell a partial result from a complete one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Row, Transaction, UserBalance};
use crate::services::LedgerSnapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A row left out of the transaction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedRow {
    pub row_index: usize,
    pub error: String,
    pub row: Row,
}

/// Row accounting for an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub user_count: usize,
    pub transaction_count: usize,
    /// Rows read from the transaction range
    pub row_count: usize,
    /// Rows that encoded no transaction
    pub empty_row_count: usize,
    /// Transactions whose receivers do not add up to the value
    pub unbalanced_count: usize,
    pub dropped_rows: Vec<DroppedRow>,
}

/// Ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub balances: Vec<UserBalance>,

    pub transactions: Vec<Transaction>,

    pub metadata: ExportMetadata,
}

impl LedgerExport {
    /// Build an export from a reconciled snapshot
    pub fn from_snapshot(snapshot: &LedgerSnapshot, balance_tolerance: f64) -> Self {
        let report = &snapshot.report;
        let dropped_rows = report
            .diagnostics
            .iter()
            .map(|d| DroppedRow {
                row_index: d.row_index,
                error: d.error.to_string(),
                row: d.row.clone(),
            })
            .collect();

        let metadata = ExportMetadata {
            user_count: snapshot.balances.len(),
            transaction_count: report.transactions.len(),
            row_count: report.total_rows(),
            empty_row_count: report.empty_rows,
            unbalanced_count: report.unbalanced(balance_tolerance).len(),
            dropped_rows,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            balances: snapshot.balances.clone(),
            transactions: report.transactions.clone(),
            metadata,
        }
    }
}

/// Write an export as JSON
pub fn export_json<W: Write>(
    export: &LedgerExport,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

/// Read a JSON export back, checking its schema version
pub fn read_export_json(json_str: &str) -> LedgerResult<LedgerExport> {
    let export: LedgerExport =
        serde_json::from_str(json_str).map_err(|e| LedgerError::Export(e.to_string()))?;

    if export.schema_version != EXPORT_SCHEMA_VERSION {
        return Err(LedgerError::Export(format!(
            "Schema version mismatch: expected {}, got {}",
            EXPORT_SCHEMA_VERSION, export.schema_version
        )));
    }

    Ok(export)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Cell, UserTransaction};
    use crate::services::{ReconcileReport, RowDiagnostic, RowError};

    pub(crate) fn sample_snapshot() -> LedgerSnapshot {
        LedgerSnapshot {
            balances: vec![UserBalance::new("Bob", -100.0), UserBalance::new("Carol", 100.0)],
            report: ReconcileReport {
                transactions: vec![
                    Transaction {
                        description: "Dinner, with dessert".into(),
                        value: 300.0,
                        senders: vec![UserTransaction::new("Alice", 300.0)],
                        receivers: vec![
                            UserTransaction::new("Bob", 100.0),
                            UserTransaction::new("Carol", 200.0),
                        ],
                    },
                    Transaction {
                        description: "Taxi".into(),
                        value: 40.0,
                        senders: vec![UserTransaction::new("Bob", 40.0)],
                        receivers: vec![UserTransaction::new("Carol", 10.0)],
                    },
                ],
                empty_rows: 3,
                diagnostics: vec![RowDiagnostic {
                    row_index: 4,
                    row: vec![Cell::from(5.0)],
                    error: RowError::MissingCell { column: 17, len: 1 },
                }],
            },
        }
    }

    #[test]
    fn test_metadata() {
        let export = LedgerExport::from_snapshot(&sample_snapshot(), 0.005);

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.user_count, 2);
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.row_count, 6);
        assert_eq!(export.metadata.empty_row_count, 3);
        assert_eq!(export.metadata.unbalanced_count, 1);
        assert_eq!(export.metadata.dropped_rows[0].row_index, 4);
        assert!(export.metadata.dropped_rows[0].error.contains("column 17"));
    }

    #[test]
    fn test_json_output_readable_back() {
        let export = LedgerExport::from_snapshot(&sample_snapshot(), 0.005);

        let mut output = Vec::new();
        export_json(&export, &mut output, false).unwrap();
        let text = String::from_utf8(output).unwrap();

        let read = read_export_json(&text).unwrap();
        assert_eq!(read.transactions, export.transactions);
        assert_eq!(read.balances, export.balances);
        assert_eq!(read.metadata, export.metadata);
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let mut export = LedgerExport::from_snapshot(&sample_snapshot(), 0.005);
        export.schema_version = "0.1.0".into();
        let text = serde_json::to_string(&export).unwrap();

        assert!(matches!(read_export_json(&text), Err(LedgerError::Export(_))));
    }
}
