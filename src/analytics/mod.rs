//! Read-only reports computed over the application state
//!
//! Every report is a plain struct with a `generate` constructor that takes a
//! state reference and a filter. Reports never mutate state; recomputing on
//! the same state yields the same report.
//!
//! Two exclusion rules apply across all spending totals: expenses already
//! reimbursed do not count as spending, and incomes flagged as reimbursements
//! do not count as earnings.

mod breakdown;
mod budget_status;
mod summary;
mod trend;

pub use breakdown::{CategoryBreakdown, CategorySlice, SubcategorySlice};
pub use budget_status::{BudgetHealth, BudgetStatusLine, BudgetStatusReport};
pub use summary::SpendingSummary;
pub use trend::{CategoryDelta, PeriodComparison, TrendPoint, TrendReport};

use chrono::NaiveDate;

use crate::models::{BudgetPeriod, Expense, Income, WalletId};
use crate::state::AppState;

/// Inclusive date interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl From<BudgetPeriod> for DateRange {
    fn from(period: BudgetPeriod) -> Self {
        Self {
            start: period.start_date(),
            end: period.end_date(),
        }
    }
}

/// What a report covers: a date range, optionally narrowed to one wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFilter {
    pub range: DateRange,
    pub wallet: Option<WalletId>,
}

impl ReportFilter {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            wallet: None,
        }
    }

    pub fn for_period(period: BudgetPeriod) -> Self {
        Self::new(period.into())
    }

    pub fn for_wallet(mut self, wallet: Option<WalletId>) -> Self {
        self.wallet = wallet;
        self
    }

    fn matches_wallet(&self, wallet_id: WalletId) -> bool {
        self.wallet.map_or(true, |w| w == wallet_id)
    }
}

/// Expenses in scope for spending totals: in range, in the wallet, and not
/// already paid back
fn countable_expenses<'a>(
    state: &'a AppState,
    filter: &'a ReportFilter,
) -> impl Iterator<Item = &'a Expense> {
    state.expenses.iter().filter(move |e| {
        filter.range.contains(e.date) && filter.matches_wallet(e.wallet_id) && !e.is_reimbursed()
    })
}

/// Incomes in scope for earning totals: in range, in the wallet, and not
/// reimbursements
fn countable_incomes<'a>(
    state: &'a AppState,
    filter: &'a ReportFilter,
) -> impl Iterator<Item = &'a Income> {
    state.incomes.iter().filter(move |i| {
        filter.range.contains(i.date) && filter.matches_wallet(i.wallet_id) && !i.is_reimbursement
    })
}

fn percentage_of(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::models::{Money, Wallet};
    use crate::state::StateStore;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn store_with_wallet() -> (StateStore, WalletId) {
        let mut store = StateStore::new();
        let wallet = Wallet::new("Cash");
        let id = wallet.id;
        store.add_wallet(wallet).unwrap();
        (store, id)
    }

    pub fn expense(
        wallet: WalletId,
        cents: i64,
        day: NaiveDate,
        category: &str,
    ) -> crate::models::Expense {
        crate::models::Expense::new(wallet, Money::from_cents(cents), day, category)
    }

    pub fn income(
        wallet: WalletId,
        cents: i64,
        day: NaiveDate,
        source: &str,
    ) -> crate::models::Income {
        crate::models::Income::new(wallet, Money::from_cents(cents), day, source)
    }
}
