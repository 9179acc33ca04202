//! Category breakdown
//!
//! Groups countable spending by category name, with a nested split by
//! subcategory inside each one. Expenses carry their category as free text,
//! so grouping is by name rather than by category id.

use std::collections::HashMap;

use crate::models::Money;
use crate::state::AppState;

use super::{countable_expenses, percentage_of, ReportFilter};

/// One subcategory's share within a category
#[derive(Debug, Clone, PartialEq)]
pub struct SubcategorySlice {
    pub name: String,
    pub total: Money,
    pub expense_count: usize,
    /// Share of the parent category's total
    pub percentage: f64,
}

/// One category's share of total spending
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub name: String,
    pub total: Money,
    pub expense_count: usize,
    /// Share of the overall total
    pub percentage: f64,
    /// Subcategory split, largest first. Expenses without a subcategory are
    /// collected under [`CategoryBreakdown::UNSPECIFIED`].
    pub subcategories: Vec<SubcategorySlice>,
}

/// Spending grouped by category, largest first
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub filter: ReportFilter,
    pub categories: Vec<CategorySlice>,
    pub total: Money,
}

impl CategoryBreakdown {
    /// Bucket name for expenses without a subcategory
    pub const UNSPECIFIED: &'static str = "(unspecified)";

    pub fn generate(state: &AppState, filter: ReportFilter) -> Self {
        // category name -> (total, count, subcategory name -> (total, count))
        let mut buckets: HashMap<String, (Money, usize, HashMap<String, (Money, usize)>)> =
            HashMap::new();
        let mut total = Money::zero();

        for expense in countable_expenses(state, &filter) {
            total += expense.amount;
            let bucket = buckets
                .entry(expense.category.clone())
                .or_insert_with(|| (Money::zero(), 0, HashMap::new()));
            bucket.0 += expense.amount;
            bucket.1 += 1;
            let sub_name = expense
                .subcategory
                .clone()
                .unwrap_or_else(|| Self::UNSPECIFIED.to_string());
            let sub = bucket.2.entry(sub_name).or_insert((Money::zero(), 0));
            sub.0 += expense.amount;
            sub.1 += 1;
        }

        let mut categories: Vec<CategorySlice> = buckets
            .into_iter()
            .map(|(name, (cat_total, count, subs))| {
                let mut subcategories: Vec<SubcategorySlice> = subs
                    .into_iter()
                    .map(|(sub_name, (sub_total, sub_count))| SubcategorySlice {
                        name: sub_name,
                        total: sub_total,
                        expense_count: sub_count,
                        percentage: percentage_of(sub_total.cents(), cat_total.cents()),
                    })
                    .collect();
                subcategories.sort_by(|a, b| b.total.cmp(&a.total).then(a.name.cmp(&b.name)));

                CategorySlice {
                    name,
                    total: cat_total,
                    expense_count: count,
                    percentage: percentage_of(cat_total.cents(), total.cents()),
                    subcategories,
                }
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total).then(a.name.cmp(&b.name)));

        Self {
            filter,
            categories,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// The biggest categories, largest spending first
    pub fn top_categories(&self, limit: usize) -> &[CategorySlice] {
        &self.categories[..self.categories.len().min(limit)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testutil::{date, expense, store_with_wallet};
    use crate::analytics::DateRange;

    fn january() -> ReportFilter {
        ReportFilter::new(DateRange::new(date(2025, 1, 1), date(2025, 1, 31)))
    }

    #[test]
    fn test_breakdown_sorted_largest_first() {
        let (mut store, wallet) = store_with_wallet();
        store
            .add_expense(expense(wallet, 2000, date(2025, 1, 5), "Transport"))
            .unwrap();
        store
            .add_expense(expense(wallet, 5000, date(2025, 1, 6), "Groceries"))
            .unwrap();
        store
            .add_expense(expense(wallet, 3000, date(2025, 1, 7), "Groceries"))
            .unwrap();

        let breakdown = CategoryBreakdown::generate(store.state(), january());

        assert_eq!(breakdown.total.cents(), 10_000);
        assert_eq!(breakdown.categories.len(), 2);
        assert_eq!(breakdown.categories[0].name, "Groceries");
        assert_eq!(breakdown.categories[0].total.cents(), 8000);
        assert_eq!(breakdown.categories[0].expense_count, 2);
        assert!((breakdown.categories[0].percentage - 80.0).abs() < 1e-9);
        assert_eq!(breakdown.categories[1].name, "Transport");
    }

    #[test]
    fn test_subcategory_split() {
        let (mut store, wallet) = store_with_wallet();
        store
            .add_expense(
                expense(wallet, 6000, date(2025, 1, 5), "Groceries")
                    .with_subcategory("Produce"),
            )
            .unwrap();
        store
            .add_expense(
                expense(wallet, 2000, date(2025, 1, 6), "Groceries").with_subcategory("Snacks"),
            )
            .unwrap();
        store
            .add_expense(expense(wallet, 2000, date(2025, 1, 7), "Groceries"))
            .unwrap();

        let breakdown = CategoryBreakdown::generate(store.state(), january());
        let groceries = &breakdown.categories[0];

        assert_eq!(groceries.subcategories.len(), 3);
        assert_eq!(groceries.subcategories[0].name, "Produce");
        assert!((groceries.subcategories[0].percentage - 60.0).abs() < 1e-9);
        assert!(groceries
            .subcategories
            .iter()
            .any(|s| s.name == CategoryBreakdown::UNSPECIFIED));
    }

    #[test]
    fn test_empty_breakdown() {
        let (store, _wallet) = store_with_wallet();
        let breakdown = CategoryBreakdown::generate(store.state(), january());
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.total.cents(), 0);
    }

    #[test]
    fn test_top_categories_limit() {
        let (mut store, wallet) = store_with_wallet();
        for (i, name) in ["A", "B", "C", "D"].iter().enumerate() {
            store
                .add_expense(expense(
                    wallet,
                    (i as i64 + 1) * 1000,
                    date(2025, 1, 5),
                    name,
                ))
                .unwrap();
        }

        let breakdown = CategoryBreakdown::generate(store.state(), january());
        let top = breakdown.top_categories(2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "D");
        assert_eq!(top[1].name, "C");
    }
}
