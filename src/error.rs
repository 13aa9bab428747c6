//! Custom error types for sheet-ledger
//!
//! This module defines the error hierarchy for whole-pipeline failures using
//! thiserror. Failures that concern a single transaction row live in
//! [`crate::services::derive::RowError`] and never reach this type.

use thiserror::Error;

/// The main error type for sheet-ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The balance table does not have the contracted shape
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// The table source could not return a range
    #[error("Failed to fetch range '{range}': {reason}")]
    UpstreamFetch { range: String, reason: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl LedgerError {
    /// Create an upstream fetch error for a range
    pub fn fetch_failed(range: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UpstreamFetch {
            range: range.into(),
            reason: reason.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the balance table had the wrong shape
    pub fn is_malformed_table(&self) -> bool {
        matches!(self, Self::MalformedTable(_))
    }

    /// Check if the table source failed
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamFetch { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for sheet-ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
