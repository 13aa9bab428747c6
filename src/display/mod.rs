//! Display formatting for terminal output

pub mod balance;
pub mod transaction;

pub use balance::{format_balance_list, format_user_list};
pub use transaction::{
    format_reconcile_summary, format_transaction_details, format_transaction_register,
    format_transaction_row,
};

/// Format an amount with two decimals and a currency symbol, e.g. `-$12.50`
///
/// Only the display is rounded; stored amounts keep full precision.
pub fn format_amount(value: f64, symbol: &str) -> String {
    let rounded = format!("{:.2}", value.abs());
    if value < 0.0 && rounded != "0.00" {
        format!("-{}{}", symbol, rounded)
    } else {
        format!("{}{}", symbol, rounded)
    }
}

/// Truncate a string to `max` characters, marking the cut with `…`
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
