//! Trend and period comparison reports
//!
//! A trend is a fixed-length series of per-period totals ending at a chosen
//! period; the comparison sets one period against the one before it.

use std::collections::HashMap;

use crate::models::{BudgetPeriod, Money, WalletId};
use crate::state::AppState;

use super::{countable_expenses, countable_incomes, ReportFilter};

/// Totals for one budget period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub period: BudgetPeriod,
    pub spent: Money,
    pub earned: Money,
    pub net: Money,
}

impl TrendPoint {
    fn generate(state: &AppState, period: BudgetPeriod, wallet: Option<WalletId>) -> Self {
        let filter = ReportFilter::for_period(period).for_wallet(wallet);
        let spent = countable_expenses(state, &filter).map(|e| e.amount).sum();
        let earned = countable_incomes(state, &filter).map(|i| i.amount).sum();
        Self {
            period,
            spent,
            earned,
            net: earned - spent,
        }
    }
}

/// Per-period totals over a trailing window, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendReport {
    pub wallet: Option<WalletId>,
    pub points: Vec<TrendPoint>,
}

impl TrendReport {
    /// Series of `count` periods ending at `end` inclusive
    pub fn generate(
        state: &AppState,
        end: BudgetPeriod,
        count: u32,
        wallet: Option<WalletId>,
    ) -> Self {
        let count = count.max(1);
        let points = (0..count)
            .rev()
            .map(|back| TrendPoint::generate(state, end.back(back), wallet))
            .collect();
        Self { wallet, points }
    }

    /// True when no period in the window has any activity
    pub fn is_empty(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.spent.is_zero() && p.earned.is_zero())
    }

    /// Largest spending value in the series, for scaling charts
    pub fn max_spent(&self) -> Money {
        self.points
            .iter()
            .map(|p| p.spent)
            .max()
            .unwrap_or_else(Money::zero)
    }
}

/// How one category's spending moved between the two periods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDelta {
    pub name: String,
    pub current: Money,
    pub previous: Money,
    /// Current minus previous
    pub delta: Money,
}

/// One period set against the one before it
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodComparison {
    pub current: TrendPoint,
    pub previous: TrendPoint,
    /// Current spending minus previous spending
    pub spent_delta: Money,
    pub earned_delta: Money,
    /// Per-category movement, biggest absolute change first
    pub categories: Vec<CategoryDelta>,
}

impl PeriodComparison {
    pub fn generate(state: &AppState, period: BudgetPeriod, wallet: Option<WalletId>) -> Self {
        let current = TrendPoint::generate(state, period, wallet);
        let previous = TrendPoint::generate(state, period.prev(), wallet);

        let mut by_category: HashMap<String, (Money, Money)> = HashMap::new();
        let current_filter = ReportFilter::for_period(period).for_wallet(wallet);
        for expense in countable_expenses(state, &current_filter) {
            by_category
                .entry(expense.category.clone())
                .or_insert((Money::zero(), Money::zero()))
                .0 += expense.amount;
        }
        let previous_filter = ReportFilter::for_period(period.prev()).for_wallet(wallet);
        for expense in countable_expenses(state, &previous_filter) {
            by_category
                .entry(expense.category.clone())
                .or_insert((Money::zero(), Money::zero()))
                .1 += expense.amount;
        }

        let mut categories: Vec<CategoryDelta> = by_category
            .into_iter()
            .map(|(name, (cur, prev))| CategoryDelta {
                name,
                current: cur,
                previous: prev,
                delta: cur - prev,
            })
            .collect();
        categories.sort_by(|a, b| {
            b.delta
                .abs()
                .cmp(&a.delta.abs())
                .then_with(|| a.name.cmp(&b.name))
        });

        Self {
            current,
            previous,
            spent_delta: current.spent - previous.spent,
            earned_delta: current.earned - previous.earned,
            categories,
        }
    }

    /// Spending change relative to the previous period, as a percentage.
    /// None when the previous period had no spending to compare against.
    pub fn spent_change_pct(&self) -> Option<f64> {
        if self.previous.spent.is_zero() {
            None
        } else {
            Some(
                (self.spent_delta.cents() as f64 / self.previous.spent.cents() as f64) * 100.0,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testutil::{date, expense, income, store_with_wallet};

    #[test]
    fn test_trend_window_oldest_first() {
        let (mut store, wallet) = store_with_wallet();
        // Period 2025-01 runs 2024-12-26 through 2025-01-25
        store
            .add_expense(expense(wallet, 1000, date(2025, 1, 10), "Groceries"))
            .unwrap();
        // Period 2025-02
        store
            .add_expense(expense(wallet, 3000, date(2025, 2, 10), "Groceries"))
            .unwrap();
        // Period 2025-03
        store
            .add_expense(expense(wallet, 2000, date(2025, 3, 10), "Groceries"))
            .unwrap();

        let trend = TrendReport::generate(store.state(), BudgetPeriod::new(2025, 3), 3, None);

        assert_eq!(trend.points.len(), 3);
        assert_eq!(trend.points[0].period, BudgetPeriod::new(2025, 1));
        assert_eq!(trend.points[0].spent.cents(), 1000);
        assert_eq!(trend.points[1].spent.cents(), 3000);
        assert_eq!(trend.points[2].spent.cents(), 2000);
        assert_eq!(trend.max_spent().cents(), 3000);
    }

    #[test]
    fn test_trend_cutoff_day_boundary() {
        let (mut store, wallet) = store_with_wallet();
        // The 26th belongs to the next period
        store
            .add_expense(expense(wallet, 1000, date(2025, 1, 25), "Groceries"))
            .unwrap();
        store
            .add_expense(expense(wallet, 5000, date(2025, 1, 26), "Groceries"))
            .unwrap();

        let trend = TrendReport::generate(store.state(), BudgetPeriod::new(2025, 2), 2, None);

        assert_eq!(trend.points[0].spent.cents(), 1000);
        assert_eq!(trend.points[1].spent.cents(), 5000);
    }

    #[test]
    fn test_comparison_delta() {
        let (mut store, wallet) = store_with_wallet();
        store
            .add_expense(expense(wallet, 4000, date(2025, 1, 10), "Groceries"))
            .unwrap();
        store
            .add_expense(expense(wallet, 6000, date(2025, 2, 10), "Groceries"))
            .unwrap();
        store
            .add_income(income(wallet, 100_000, date(2025, 2, 10), "Salary"))
            .unwrap();

        let cmp = PeriodComparison::generate(store.state(), BudgetPeriod::new(2025, 2), None);

        assert_eq!(cmp.spent_delta.cents(), 2000);
        assert_eq!(cmp.earned_delta.cents(), 100_000);
        assert!((cmp.spent_change_pct().unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_comparison_category_deltas() {
        let (mut store, wallet) = store_with_wallet();
        store
            .add_expense(expense(wallet, 4000, date(2025, 1, 10), "Groceries"))
            .unwrap();
        store
            .add_expense(expense(wallet, 1000, date(2025, 1, 11), "Transport"))
            .unwrap();
        store
            .add_expense(expense(wallet, 1500, date(2025, 2, 10), "Transport"))
            .unwrap();

        let cmp = PeriodComparison::generate(store.state(), BudgetPeriod::new(2025, 2), None);

        // Groceries dropped by more than Transport rose
        assert_eq!(cmp.categories.len(), 2);
        assert_eq!(cmp.categories[0].name, "Groceries");
        assert_eq!(cmp.categories[0].delta.cents(), -4000);
        assert_eq!(cmp.categories[1].name, "Transport");
        assert_eq!(cmp.categories[1].delta.cents(), 500);
    }

    #[test]
    fn test_comparison_no_previous_spending() {
        let (mut store, wallet) = store_with_wallet();
        store
            .add_expense(expense(wallet, 6000, date(2025, 2, 10), "Groceries"))
            .unwrap();

        let cmp = PeriodComparison::generate(store.state(), BudgetPeriod::new(2025, 2), None);

        assert_eq!(cmp.spent_change_pct(), None);
    }

    #[test]
    fn test_empty_trend() {
        let (store, _wallet) = store_with_wallet();
        let trend = TrendReport::generate(store.state(), BudgetPeriod::new(2025, 3), 6, None);
        assert!(trend.is_empty());
        assert_eq!(trend.points.len(), 6);
    }
}
