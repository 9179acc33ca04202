//! Wallet model
//!
//! A wallet is a named money container; every expense and income belongs to
//! exactly one wallet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::WalletId;

/// A named money container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique identifier
    pub id: WalletId,

    /// Wallet name
    pub name: String,

    /// When the wallet was created
    pub created_at: DateTime<Utc>,

    /// When the wallet was last modified
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a new wallet
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: WalletId::new(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the wallet
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Validate the wallet
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Wallet name cannot be empty".to_string());
        }
        if self.name.len() > 50 {
            return Err(format!("Wallet name too long: {} characters", self.name.len()));
        }
        Ok(())
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
