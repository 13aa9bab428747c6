//! YAML export

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::LedgerExport;

/// Write an export as YAML with a short comment header
pub fn export_yaml<W: Write>(export: &LedgerExport, writer: &mut W) -> LedgerResult<()> {
    let to_err = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# sheet-ledger export").map_err(to_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(to_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(to_err)?;
    writeln!(writer).map_err(to_err)?;

    serde_yaml::to_writer(writer, export).map_err(|e| LedgerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_snapshot;

    #[test]
    fn test_yaml_export() {
        let export = LedgerExport::from_snapshot(&sample_snapshot(), 0.005);

        let mut output = Vec::new();
        export_yaml(&export, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# sheet-ledger export"));
        assert!(text.contains("description: Taxi"));

        let parsed: LedgerExport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.transactions.len(), 2);
    }
}
