//! Storage layer for sheet-ledger
//!
//! JSON file storage with atomic writes. The sheet itself is never written;
//! only the local user registry is persisted.

pub mod file_io;
pub mod users;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use users::UserRepository;

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub users: UserRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LedgerError> {
        self.users.load()
    }
}
