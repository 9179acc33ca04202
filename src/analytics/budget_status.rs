//! Budget status report
//!
//! Sets each budget of a period against the spending it covers. A budget
//! scoped to a wallet only counts that wallet's expenses; a budget with no
//! wallet counts every wallet.

use crate::models::{Budget, BudgetId, BudgetPeriod, CategoryKind, Money, WalletId};
use crate::state::AppState;

use super::{countable_expenses, percentage_of, ReportFilter};

/// How a budget is doing against its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetHealth {
    Ok,
    Warning,
    Exceeded,
}

impl BudgetHealth {
    /// At or over the limit is exceeded; 80% of the limit is the warning
    /// threshold; anything below is fine.
    pub fn classify(percent_used: f64) -> Self {
        if percent_used >= 100.0 {
            Self::Exceeded
        } else if percent_used >= 80.0 {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
        }
    }
}

/// One budget's standing for the period
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatusLine {
    pub budget_id: BudgetId,
    pub category_name: String,
    pub wallet_id: Option<WalletId>,
    pub limit: Money,
    pub spent: Money,
    /// Limit minus spent; negative when over budget
    pub remaining: Money,
    pub percent_used: f64,
    pub health: BudgetHealth,
}

/// All budgets of one period, most stressed first
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatusReport {
    pub period: BudgetPeriod,
    pub lines: Vec<BudgetStatusLine>,
}

impl BudgetStatusReport {
    pub fn generate(state: &AppState, period: BudgetPeriod) -> Self {
        let mut lines: Vec<BudgetStatusLine> = state
            .budgets
            .iter()
            .filter(|b| b.period == period)
            .map(|b| Self::line_for(state, b))
            .collect();
        lines.sort_by(|a, b| {
            b.percent_used
                .partial_cmp(&a.percent_used)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category_name.cmp(&b.category_name))
        });
        Self { period, lines }
    }

    fn line_for(state: &AppState, budget: &Budget) -> BudgetStatusLine {
        let category = state.category(budget.category_id);
        let category_name = category
            .map(|c| c.name.clone())
            .unwrap_or_else(|| budget.category_id.to_string());

        // Budgets on a subcategory match the expense's subcategory field;
        // budgets on a main category match the category field
        let matches_category = |e: &crate::models::Expense| match category.map(|c| c.kind) {
            Some(CategoryKind::Sub) => e.subcategory.as_deref() == Some(category_name.as_str()),
            _ => e.category == category_name,
        };

        let filter = ReportFilter::for_period(budget.period).for_wallet(budget.wallet_id);
        let spent: Money = countable_expenses(state, &filter)
            .filter(|e| matches_category(e))
            .map(|e| e.amount)
            .sum();

        let percent_used = percentage_of(spent.cents(), budget.amount.cents());
        BudgetStatusLine {
            budget_id: budget.id,
            category_name,
            wallet_id: budget.wallet_id,
            limit: budget.amount,
            spent,
            remaining: budget.amount - spent,
            percent_used,
            health: BudgetHealth::classify(percent_used),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines that are at the warning threshold or over the limit
    pub fn stressed(&self) -> impl Iterator<Item = &BudgetStatusLine> {
        self.lines.iter().filter(|l| l.health != BudgetHealth::Ok)
    }
}
