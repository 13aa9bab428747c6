//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod ledger;
pub mod users;

pub use export::{handle_export, ExportFormat, ExportOptions};
pub use ledger::{handle_balances, handle_transaction, handle_transactions};
pub use users::{handle_user_command, UserCommands};
