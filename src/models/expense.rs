//! Expense model
//!
//! Expenses carry the category/subcategory names the hosted backend stores on
//! each row, plus reimbursement tracking: a reimbursable expense is Pending
//! until an income is linked to it, at which point it becomes Reimbursed and
//! references that income.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, IncomeId, WalletId};
use super::money::Money;

/// Reimbursement state of a reimbursable expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReimbursementStatus {
    /// Waiting for the repayment to arrive
    #[default]
    Pending,
    /// A linked income repaid this expense
    Reimbursed,
}

impl ReimbursementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reimbursed => "reimbursed",
        }
    }
}

impl fmt::Display for ReimbursementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single expense row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// The wallet this expense was paid from
    pub wallet_id: WalletId,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Date of the expense
    pub date: NaiveDate,

    /// Main category name
    pub category: String,

    /// Subcategory name (optional)
    pub subcategory: Option<String>,

    /// Free-form note
    #[serde(default)]
    pub note: String,

    /// Whether this expense is expected to be repaid
    #[serde(default)]
    pub is_reimbursable: bool,

    /// Reimbursement state (None for non-reimbursable expenses)
    pub reimbursement_status: Option<ReimbursementStatus>,

    /// The income that repaid this expense, once linked
    pub linked_income_id: Option<IncomeId>,

    /// When the expense was created
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        wallet_id: WalletId,
        amount: Money,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            wallet_id,
            amount,
            date,
            category: category.into(),
            subcategory: None,
            note: String::new(),
            is_reimbursable: false,
            reimbursement_status: None,
            linked_income_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the expense as reimbursable (starts out Pending)
    pub fn reimbursable(mut self) -> Self {
        self.is_reimbursable = true;
        self.reimbursement_status = Some(ReimbursementStatus::Pending);
        self
    }

    /// Set the subcategory name
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Whether this expense has been repaid by a linked income
    pub fn is_reimbursed(&self) -> bool {
        self.reimbursement_status == Some(ReimbursementStatus::Reimbursed)
    }

    /// Whether this expense is still waiting on a repayment
    pub fn is_pending_reimbursement(&self) -> bool {
        self.is_reimbursable && self.reimbursement_status == Some(ReimbursementStatus::Pending)
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_positive() {
            return Err("Expense amount must be positive".to_string());
        }
        if self.category.trim().is_empty() {
            return Err("Expense category cannot be empty".to_string());
        }
        if !self.is_reimbursable
            && (self.reimbursement_status.is_some() || self.linked_income_id.is_some())
        {
            return Err("Non-reimbursable expense cannot carry reimbursement state".to_string());
        }
        if self.is_reimbursed() && self.linked_income_id.is_none() {
            return Err("Reimbursed expense must reference the repaying income".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount
        )
    }
}
