//! Users and balance snapshots

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// A ledger participant
///
/// Within one balance fetch a user is identified by its column position; the
/// id is only present for users that came out of the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Registry id, if the user has been registered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,

    /// Display name as written in the sheet
    pub name: String,
}

impl User {
    /// Create an unregistered user
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Create a user with a registry id
    pub fn registered(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Normalize a name for case-insensitive matching
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

/// A balance snapshot value
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Balance {
    pub value: f64,
}

/// A user paired with their balance, in sheet column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBalance {
    pub user: User,
    pub balance: Balance,
}

impl UserBalance {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            user: User::new(name),
            balance: Balance { value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_user_serialization_omits_id() {
        let ub = UserBalance::new("Bob", 12.5);
        let json = serde_json::to_value(&ub).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"user": {"name": "Bob"}, "balance": {"value": 12.5}})
        );
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(User::normalize_name("  Carol "), "carol");
    }
}
