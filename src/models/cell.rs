//! Untyped spreadsheet cells
//!
//! A fetched range is a list of rows, each row a list of cells whose type is
//! only known at runtime. Coercion never fails: a cell of the wrong type reads
//! as the zero value of the requested type, which downstream logic relies on
//! (a blank or textual count column reads as `0` and is skipped).

use serde::{Deserialize, Serialize};

/// A single untyped value from the tabular source
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Blank cell (`null` in the values document)
    #[default]
    Empty,
    /// Boolean cell
    Bool(bool),
    /// Numeric cell
    Number(f64),
    /// Textual cell
    Text(String),
}

/// One ordered sequence of cells within a fetched range
pub type Row = Vec<Cell>;

impl Cell {
    /// Parse a raw text field (e.g. from a CSV export) into a cell
    ///
    /// Empty fields become [`Cell::Empty`], numeric fields become
    /// [`Cell::Number`], `TRUE`/`FALSE` become [`Cell::Bool`] and everything
    /// else is kept as text.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return Self::Number(n);
            }
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        Self::Text(field.to_string())
    }

    /// The cell's text, or the empty string if the cell is not textual
    pub fn as_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            _ => String::new(),
        }
    }

    /// The cell's number, or `0.0` if the cell is not numeric
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            _ => 0.0,
        }
    }

    /// Check if the cell is blank
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
