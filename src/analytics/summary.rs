//! Spending summary
//!
//! Headline totals for a filtered slice of the data: spent, earned, net, and
//! what is still awaiting reimbursement.

use crate::models::Money;
use crate::state::AppState;

use super::{countable_expenses, countable_incomes, ReportFilter};

/// Headline totals for one filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingSummary {
    pub filter: ReportFilter,
    /// Total of countable expenses
    pub total_spent: Money,
    /// Total of countable incomes
    pub total_earned: Money,
    /// Earned minus spent
    pub net: Money,
    /// Reimbursable expenses still pending payback
    pub pending_reimbursement: Money,
    /// Expenses already paid back (excluded from total_spent)
    pub reimbursed_total: Money,
    pub expense_count: usize,
    pub income_count: usize,
}

impl SpendingSummary {
    pub fn generate(state: &AppState, filter: ReportFilter) -> Self {
        let mut total_spent = Money::zero();
        let mut expense_count = 0;
        for expense in countable_expenses(state, &filter) {
            total_spent += expense.amount;
            expense_count += 1;
        }

        let mut total_earned = Money::zero();
        let mut income_count = 0;
        for income in countable_incomes(state, &filter) {
            total_earned += income.amount;
            income_count += 1;
        }

        // Pending amounts are money already out the door, tracked separately
        // so the user can see what should come back
        let mut pending_reimbursement = Money::zero();
        let mut reimbursed_total = Money::zero();
        for expense in state.expenses.iter().filter(|e| {
            filter.range.contains(e.date) && filter.wallet.map_or(true, |w| w == e.wallet_id)
        }) {
            if expense.is_pending_reimbursement() {
                pending_reimbursement += expense.amount;
            } else if expense.is_reimbursed() {
                reimbursed_total += expense.amount;
            }
        }

        Self {
            filter,
            total_spent,
            total_earned,
            net: total_earned - total_spent,
            pending_reimbursement,
            reimbursed_total,
            expense_count,
            income_count,
        }
    }

    /// True when the filter matched nothing at all
    pub fn is_empty(&self) -> bool {
        self.expense_count == 0 && self.income_count == 0
    }
}
