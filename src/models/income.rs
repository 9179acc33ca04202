//! Income model
//!
//! An income either adds fresh money (salary, gifts) or repays one or more
//! reimbursable expenses, in which case it lists the expenses it covers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, IncomeId, WalletId};
use super::money::Money;

/// A single income row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    /// Unique identifier
    pub id: IncomeId,

    /// The wallet this income was received into
    pub wallet_id: WalletId,

    /// Amount received (always positive)
    pub amount: Money,

    /// Date of the income
    pub date: NaiveDate,

    /// Where the money came from
    pub source: String,

    /// Free-form note
    #[serde(default)]
    pub note: String,

    /// Whether this income repays reimbursable expenses
    #[serde(default)]
    pub is_reimbursement: bool,

    /// The expenses this income repays (empty unless it is a reimbursement)
    #[serde(default)]
    pub linked_expense_ids: Vec<ExpenseId>,

    /// When the income was created
    pub created_at: DateTime<Utc>,

    /// When the income was last modified
    pub updated_at: DateTime<Utc>,
}

impl Income {
    /// Create a new income
    pub fn new(
        wallet_id: WalletId,
        amount: Money,
        date: NaiveDate,
        source: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeId::new(),
            wallet_id,
            amount,
            date,
            source: source.into(),
            note: String::new(),
            is_reimbursement: false,
            linked_expense_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this income is linked to any expense
    pub fn has_links(&self) -> bool {
        !self.linked_expense_ids.is_empty()
    }

    /// Validate the income
    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_positive() {
            return Err("Income amount must be positive".to_string());
        }
        if self.source.trim().is_empty() {
            return Err("Income source cannot be empty".to_string());
        }
        if !self.is_reimbursement && self.has_links() {
            return Err("Non-reimbursement income cannot link expenses".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for Income {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.source,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Income {
        Income::new(
            WalletId::new(),
            Money::from_cents(150000),
            NaiveDate::from_ymd_opt(2025, 1, 26).unwrap(),
            "Salary",
        )
    }

    #[test]
    fn test_new_income() {
        let inc = sample();
        assert!(!inc.is_reimbursement);
        assert!(!inc.has_links());
        assert!(inc.validate().is_ok());
    }

    #[test]
    fn test_validate_links_require_reimbursement_flag() {
        let mut inc = sample();
        inc.linked_expense_ids.push(ExpenseId::new());
        assert!(inc.validate().is_err());

        inc.is_reimbursement = true;
        assert!(inc.validate().is_ok());
    }

    #[test]
    fn test_validate_amount() {
        let mut inc = sample();
        inc.amount = Money::from_cents(-100);
        assert!(inc.validate().is_err());
    }
}
