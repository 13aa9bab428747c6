//! User settings for sheet-ledger
//!
//! Names the table source, the range ids inside it and the column layout of
//! the transaction range.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::services::derive::ColumnMapping;

/// Where the raw tables come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceSettings {
    /// A saved values snapshot (JSON); defaults to `snapshot.json` in the base dir
    Snapshot {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
    },
    /// One CSV export per range
    Csv {
        balance_file: PathBuf,
        transaction_file: PathBuf,
    },
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self::Snapshot { path: None }
    }
}

/// Range ids of the two tables the ledger is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetRanges {
    /// Two-row balance table (balances, then names)
    pub balance: String,
    /// Transaction log
    pub transactions: String,
}

impl Default for SheetRanges {
    fn default() -> Self {
        Self {
            balance: "201911!U1:AH2".to_string(),
            transactions: "201911!A5:S".to_string(),
        }
    }
}

/// User settings for sheet-ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub source: SourceSettings,

    #[serde(default)]
    pub ranges: SheetRanges,

    #[serde(default)]
    pub columns: ColumnMapping,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Largest allocation gap still reported as balanced
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: f64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_balance_tolerance() -> f64 {
    0.005
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            source: SourceSettings::default(),
            ranges: SheetRanges::default(),
            columns: ColumnMapping::default(),
            currency_symbol: default_currency(),
            balance_tolerance: default_balance_tolerance(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until `init`
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Validate settings once at startup
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.ranges.balance.trim().is_empty() || self.ranges.transactions.trim().is_empty() {
            return Err(LedgerError::Config("range ids must not be empty".into()));
        }
        if self.ranges.balance == self.ranges.transactions {
            return Err(LedgerError::Config(format!(
                "balance and transaction ranges are both '{}'",
                self.ranges.balance
            )));
        }
        if self.balance_tolerance.is_nan() || self.balance_tolerance < 0.0 {
            return Err(LedgerError::Config(format!(
                "balance_tolerance must be non-negative, got {}",
                self.balance_tolerance
            )));
        }
        self.columns.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.source, SourceSettings::Snapshot { path: None });
        assert_eq!(settings.ranges.balance, "201911!U1:AH2");
        assert_eq!(settings.ranges.transactions, "201911!A5:S");
        assert_eq!(settings.columns, ColumnMapping::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_missing_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.source = SourceSettings::Csv {
            balance_file: "balance.csv".into(),
            transaction_file: "transactions.csv".into(),
        };
        settings.columns.total_count_column = 18;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.source, settings.source);
        assert_eq!(loaded.columns.total_count_column, 18);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{
                "source": {"kind": "snapshot", "path": "/tmp/ledger.json"},
                "currency_symbol": "€"
            }"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(
            loaded.source,
            SourceSettings::Snapshot {
                path: Some("/tmp/ledger.json".into())
            }
        );
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.ranges, SheetRanges::default());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ nope").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(LedgerError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut settings = Settings::default();
        settings.ranges.transactions = settings.ranges.balance.clone();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.balance_tolerance = -1.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.columns.sender_column = settings.columns.total_value_column;
        assert!(settings.validate().is_err());
    }
}
