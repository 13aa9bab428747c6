//! CLI command for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{
    export_balances_csv, export_json, export_transactions_csv, export_yaml, LedgerExport,
};
use crate::services::{LedgerService, LedgerSnapshot};
use crate::source::TableSource;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (transactions or balances)
    Csv,
    /// JSON format (balances, transactions and row accounting)
    Json,
    /// YAML format (same as JSON, human-readable)
    Yaml,
}

/// Export options collected from the command line
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub balances: bool,
}

/// Handle the export command
pub fn handle_export(
    source: &dyn TableSource,
    settings: &Settings,
    options: ExportOptions,
) -> LedgerResult<()> {
    let snapshot = LedgerService::new(source, settings).reconcile()?;

    match &options.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(&snapshot, settings, &options, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;
            println!("Exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(&snapshot, settings, &options, &mut writer)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    snapshot: &LedgerSnapshot,
    settings: &Settings,
    options: &ExportOptions,
    writer: &mut W,
) -> LedgerResult<()> {
    match options.format {
        ExportFormat::Csv if options.balances => export_balances_csv(&snapshot.balances, writer),
        ExportFormat::Csv => export_transactions_csv(&snapshot.report.transactions, writer),
        ExportFormat::Json => {
            let export = LedgerExport::from_snapshot(snapshot, settings.balance_tolerance);
            export_json(&export, writer, !options.compact)
        }
        ExportFormat::Yaml => {
            let export = LedgerExport::from_snapshot(snapshot, settings.balance_tolerance);
            export_yaml(&export, writer)
        }
    }
}
