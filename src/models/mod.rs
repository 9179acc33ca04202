//! Core data models for FinTrack
//!
//! Entities mirror the rows the hosted backend stores; derived values live in
//! the analytics module, not here.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod income;
pub mod money;
pub mod period;
pub mod wallet;

pub use budget::Budget;
pub use category::{Category, CategoryKind};
pub use expense::{Expense, ReimbursementStatus};
pub use ids::{BudgetId, CategoryId, ExpenseId, IncomeId, WalletId};
pub use income::Income;
pub use money::Money;
pub use period::BudgetPeriod;
pub use wallet::Wallet;

use serde::{Deserialize, Serialize};

/// The signed-in user, as reported by the hosted backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}
