//! Core data models for sheet-ledger
//!
//! Untyped cells as fetched from the sheet, and the normalized domain they
//! are reconciled into: users, balances and split transactions.

pub mod cell;
pub mod ids;
pub mod transaction;
pub mod user;

pub use cell::{Cell, Row};
pub use ids::UserId;
pub use transaction::{Transaction, UserTransaction};
pub use user::{Balance, User, UserBalance};
