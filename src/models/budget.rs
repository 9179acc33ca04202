//! Budget model
//!
//! A budget caps spending for one category during one period, optionally
//! scoped to a single wallet.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId, WalletId};
use super::money::Money;
use super::period::BudgetPeriod;

/// A spending limit for a category in a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The category this budget limits
    pub category_id: CategoryId,

    /// Wallet scope; None means the budget counts every wallet
    pub wallet_id: Option<WalletId>,

    /// The spending limit
    pub amount: Money,

    /// The period this budget applies to
    pub period: BudgetPeriod,
}

impl Budget {
    /// Create a new budget covering all wallets
    pub fn new(category_id: CategoryId, amount: Money, period: BudgetPeriod) -> Self {
        Self {
            id: BudgetId::new(),
            category_id,
            wallet_id: None,
            amount,
            period,
        }
    }

    /// Scope the budget to a single wallet
    pub fn for_wallet(mut self, wallet_id: WalletId) -> Self {
        self.wallet_id = Some(wallet_id);
        self
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_positive() {
            return Err("Budget amount must be positive".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} limit {}", self.period, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_budget() {
        let budget = Budget::new(
            CategoryId::new(),
            Money::from_cents(50000),
            BudgetPeriod::new(2025, 1),
        );
        assert!(budget.wallet_id.is_none());
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_wallet_scoped() {
        let wallet = WalletId::new();
        let budget = Budget::new(
            CategoryId::new(),
            Money::from_cents(50000),
            BudgetPeriod::new(2025, 1),
        )
        .for_wallet(wallet);
        assert_eq!(budget.wallet_id, Some(wallet));
    }

    #[test]
    fn test_validate_amount() {
        let mut budget = Budget::new(
            CategoryId::new(),
            Money::from_cents(50000),
            BudgetPeriod::new(2025, 1),
        );
        budget.amount = Money::zero();
        assert!(budget.validate().is_err());
    }
}
