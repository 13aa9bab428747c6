//! User service
//!
//! Keeps a local registry of the users seen in balance tables and assigns
//! them durable ids. Derivation never consults the registry; it only matters
//! for lookups by id.

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{User, UserBalance, UserId};
use crate::storage::Storage;

/// Result of syncing a balance table into the registry
#[derive(Debug, Clone)]
pub struct SyncResult {
    /// Users in balance table order, with ids
    pub users: Vec<User>,
    /// Number of users registered by this sync
    pub created: usize,
}

/// Service for the user registry
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register every name in `balances` that is not known yet
    ///
    /// Blank names are skipped. Names are matched case-insensitively, so a
    /// name appearing twice registers one user.
    pub fn sync(&self, balances: &[UserBalance]) -> LedgerResult<SyncResult> {
        let mut users = Vec::with_capacity(balances.len());
        let mut created = 0;

        for balance in balances {
            let name = balance.user.name.trim();
            if name.is_empty() {
                continue;
            }

            let user = match self.storage.users.get_by_name(name)? {
                Some(existing) => existing,
                None => {
                    let user = User::registered(UserId::new(), name);
                    self.storage.users.upsert(user.clone())?;
                    created += 1;
                    user
                }
            };
            users.push(user);
        }

        if created > 0 {
            self.storage.users.save()?;
            info!(created, "Registered new users");
        }

        Ok(SyncResult { users, created })
    }

    /// All registered users, sorted by name
    pub fn list(&self) -> LedgerResult<Vec<User>> {
        self.storage.users.get_all()
    }

    /// Find a user by name or id
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<User>> {
        if let Some(user) = self.storage.users.get_by_name(identifier)? {
            return Ok(Some(user));
        }

        if let Ok(id) = identifier.parse::<UserId>() {
            return self.storage.users.get(id);
        }

        Ok(None)
    }

    /// Get a user by name or id, failing if unknown
    pub fn get(&self, identifier: &str) -> LedgerResult<User> {
        self.find(identifier)?
            .ok_or_else(|| LedgerError::user_not_found(identifier))
    }
}
