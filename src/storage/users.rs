//! User repository for JSON storage
//!
//! Manages loading and saving registered users to users.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable user data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
    /// Index: normalized name -> user_id
    by_name: RwLock<HashMap<String, UserId>>,
}

fn lock_err(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Storage(format!("Failed to acquire lock: {}", e))
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    ///
    /// Records without an id cannot be addressed and are ignored.
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_name = self.by_name.write().map_err(lock_err)?;
        data.clear();
        by_name.clear();

        for user in file_data.users {
            if let Some(id) = user.id {
                by_name.insert(User::normalize_name(&user.name), id);
                data.insert(id, user);
            }
        }

        Ok(())
    }

    /// Save users to disk, sorted by name
    pub fn save(&self) -> Result<(), LedgerError> {
        let users = self.get_all()?;
        write_json_atomic(&self.path, &UserData { users })
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> Result<Option<User>, LedgerError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// Get a user by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<User>, LedgerError> {
        let id = {
            let by_name = self.by_name.read().map_err(lock_err)?;
            by_name.get(&User::normalize_name(name)).copied()
        };

        match id {
            Some(id) => self.get(id),
            None => Ok(None),
        }
    }

    /// Get all users, sorted by name
    pub fn get_all(&self) -> Result<Vec<User>, LedgerError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by_key(|u| u.name.to_lowercase());
        Ok(users)
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> Result<(), LedgerError> {
        let id = user.id.ok_or_else(|| {
            LedgerError::Validation(format!("User '{}' has no id", user.name))
        })?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_name = self.by_name.write().map_err(lock_err)?;

        if let Some(old) = data.get(&id) {
            by_name.remove(&User::normalize_name(&old.name));
        }
        by_name.insert(User::normalize_name(&user.name), id);
        data.insert(id, user);

        Ok(())
    }

    /// Number of registered users
    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, UserRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        let repo = UserRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let user = User::registered(UserId::new(), "Alice");
        let id = user.id.unwrap();

        repo.upsert(user).unwrap();

        assert_eq!(repo.get(id).unwrap().unwrap().name, "Alice");
        assert_eq!(repo.get_by_name("ALICE").unwrap().unwrap().id, Some(id));
    }

    #[test]
    fn test_upsert_requires_id() {
        let (_temp_dir, repo) = create_test_repo();
        let result = repo.upsert(User::new("Nobody"));
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[test]
    fn test_rename_updates_name_index() {
        let (_temp_dir, repo) = create_test_repo();
        let id = UserId::new();
        repo.upsert(User::registered(id, "Bob")).unwrap();
        repo.upsert(User::registered(id, "Robert")).unwrap();

        assert!(repo.get_by_name("Bob").unwrap().is_none());
        assert!(repo.get_by_name("robert").unwrap().is_some());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(User::registered(UserId::new(), "Carol")).unwrap();
        repo.upsert(User::registered(UserId::new(), "alice")).unwrap();
        repo.save().unwrap();

        let repo2 = UserRepository::new(temp_dir.path().join("users.json"));
        repo2.load().unwrap();
        let names: Vec<_> = repo2.get_all().unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["alice", "Carol"]);
    }
}
