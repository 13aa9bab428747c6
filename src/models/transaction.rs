//! Transaction model
//!
//! A transaction moves a total value from its senders to its receivers.
//! Receiver amounts come from a proportional split of the value, so they sum
//! to the value only when the row's stated total weight matches the sum of
//! its per-user weights.

use serde::{Deserialize, Serialize};

/// One party's share of a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTransaction {
    /// Party name
    pub name: String,

    /// Amount sent or received
    pub amount: f64,
}

impl UserTransaction {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// A transaction derived from one ledger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub description: String,

    /// Total value of the transaction
    pub value: f64,

    /// Parties whose balance decreases (at least one)
    pub senders: Vec<UserTransaction>,

    /// Parties whose balance increases (possibly none)
    #[serde(default)]
    pub receivers: Vec<UserTransaction>,
}

impl Transaction {
    /// Sum of all sender amounts
    pub fn sender_total(&self) -> f64 {
        self.senders.iter().map(|s| s.amount).sum()
    }

    /// Sum of all receiver amounts
    pub fn receiver_total(&self) -> f64 {
        self.receivers.iter().map(|r| r.amount).sum()
    }

    /// Value not attributed to any receiver
    ///
    /// Non-zero when the stated total weight disagrees with the per-user
    /// weights, or when nobody received a share.
    pub fn allocation_gap(&self) -> f64 {
        self.value - self.receiver_total()
    }

    /// Check whether receivers account for the whole value within `tolerance`
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.allocation_gap().abs() <= tolerance
    }

    /// Find a receiver's share by name
    pub fn share_of(&self, name: &str) -> Option<f64> {
        self.receivers
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.amount)
    }
}
