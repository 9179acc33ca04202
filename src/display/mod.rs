//! Terminal formatting for reports
//!
//! Reports come in as plain structs; everything here turns them into text.
//! Empty reports render a "no data" line instead of an empty table.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analytics::{
    BudgetStatusReport, CategoryBreakdown, PeriodComparison, SpendingSummary, TrendReport,
};
use crate::models::Money;

const BAR_WIDTH: usize = 20;

/// A proportion as a fixed-width percentage, e.g. ` 42.3%`
pub fn format_percentage(pct: f64) -> String {
    format!("{:>5.1}%", pct)
}

/// A horizontal bar scaled to `pct` of 100, clamped at full width
pub fn format_bar(pct: f64) -> String {
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Cut a name down to `max` chars with an ellipsis
pub fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let cut: String = name.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

pub fn format_summary(summary: &SpendingSummary, wallet_name: Option<&str>) -> String {
    let mut output = String::new();
    let scope = wallet_name.unwrap_or("all wallets");
    output.push_str(&format!(
        "Summary for {} ({} to {})\n",
        scope, summary.filter.range.start, summary.filter.range.end
    ));
    output.push_str(&"=".repeat(50));
    output.push('\n');

    if summary.is_empty() {
        output.push_str("No data for this period.\n");
        return output;
    }

    output.push_str(&format!(
        "  Spent:    {:>12}  ({} expenses)\n",
        summary.total_spent.to_string(),
        summary.expense_count
    ));
    output.push_str(&format!(
        "  Earned:   {:>12}  ({} incomes)\n",
        summary.total_earned.to_string(),
        summary.income_count
    ));
    output.push_str(&format!("  Net:      {:>12}\n", summary.net.to_string()));
    if !summary.pending_reimbursement.is_zero() {
        output.push_str(&format!(
            "  Awaiting reimbursement: {}\n",
            summary.pending_reimbursement
        ));
    }
    if !summary.reimbursed_total.is_zero() {
        output.push_str(&format!(
            "  Reimbursed (not counted): {}\n",
            summary.reimbursed_total
        ));
    }
    output
}

pub fn format_breakdown(breakdown: &CategoryBreakdown) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Spending by category ({} to {})\n",
        breakdown.filter.range.start, breakdown.filter.range.end
    ));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    if breakdown.is_empty() {
        output.push_str("No spending in this period.\n");
        return output;
    }

    for category in &breakdown.categories {
        output.push_str(&format!(
            "{:<25} {:>12}  {} {}\n",
            truncate(&category.name, 25),
            category.total.to_string(),
            format_bar(category.percentage),
            format_percentage(category.percentage)
        ));
        for sub in &category.subcategories {
            // Skip the sub split when there is only the unspecified bucket
            if category.subcategories.len() == 1
                && sub.name == CategoryBreakdown::UNSPECIFIED
            {
                continue;
            }
            output.push_str(&format!(
                "  {:<23} {:>12}  {}\n",
                truncate(&sub.name, 23),
                sub.total.to_string(),
                format_percentage(sub.percentage)
            ));
        }
    }

    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!("{:<25} {:>12}\n", "TOTAL", breakdown.total.to_string()));
    output
}

pub fn format_trend(trend: &TrendReport) -> String {
    let mut output = String::new();
    output.push_str("Spending trend\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');

    if trend.is_empty() {
        output.push_str("No activity in this window.\n");
        return output;
    }

    let max = trend.max_spent().cents().max(1);
    for point in &trend.points {
        let pct = (point.spent.cents() as f64 / max as f64) * 100.0;
        output.push_str(&format!(
            "{}  {:>12}  {}  net {}\n",
            point.period,
            point.spent.to_string(),
            format_bar(pct),
            point.net
        ));
    }
    output
}

pub fn format_comparison(cmp: &PeriodComparison) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} vs {}\n",
        cmp.current.period, cmp.previous.period
    ));
    output.push_str(&"=".repeat(50));
    output.push('\n');
    output.push_str(&format!(
        "  Spent:   {:>12}  (was {})\n",
        cmp.current.spent.to_string(),
        cmp.previous.spent
    ));
    output.push_str(&format!(
        "  Earned:  {:>12}  (was {})\n",
        cmp.current.earned.to_string(),
        cmp.previous.earned
    ));
    match cmp.spent_change_pct() {
        Some(pct) if pct >= 0.0 => {
            output.push_str(&format!("  Spending up {:.1}%\n", pct));
        }
        Some(pct) => {
            output.push_str(&format!("  Spending down {:.1}%\n", -pct));
        }
        None => output.push_str("  No spending in the previous period to compare.\n"),
    }

    if !cmp.categories.is_empty() {
        output.push_str("\nBiggest movers:\n");
        for delta in cmp.categories.iter().take(5) {
            let sign = if delta.delta.is_negative() { "" } else { "+" };
            output.push_str(&format!(
                "  {:<25} {}{}  ({} from {})\n",
                truncate(&delta.name, 25),
                sign,
                delta.delta,
                delta.current,
                delta.previous
            ));
        }
    }
    output
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: Money,
    #[tabled(rename = "Spent")]
    spent: Money,
    #[tabled(rename = "Remaining")]
    remaining: Money,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

pub fn format_budget_table(report: &BudgetStatusReport) -> String {
    if report.is_empty() {
        return format!("No budgets set for {}.\n", report.period);
    }

    let rows: Vec<BudgetRow> = report
        .lines
        .iter()
        .map(|line| BudgetRow {
            category: truncate(&line.category_name, 25),
            limit: line.limit,
            spent: line.spent,
            remaining: line.remaining,
            used: format_percentage(line.percent_used),
            status: line.health.label(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("Budgets for {}\n{}\n", report.period, table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(0.0), ".".repeat(20));
        assert_eq!(format_bar(100.0), "#".repeat(20));
        assert_eq!(format_bar(50.0), format!("{}{}", "#".repeat(10), ".".repeat(10)));
        // Over 100 clamps
        assert_eq!(format_bar(250.0), "#".repeat(20));
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(42.25), " 42.2%");
        assert_eq!(format_percentage(5.0), "  5.0%");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long category name", 10), "a very ...");
    }

    #[test]
    fn test_empty_reports_say_no_data() {
        use crate::analytics::{DateRange, ReportFilter};
        use crate::models::BudgetPeriod;
        use crate::state::StateStore;
        use chrono::NaiveDate;

        let store = StateStore::new();
        let filter = ReportFilter::new(DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        ));

        let summary = SpendingSummary::generate(store.state(), filter);
        assert!(format_summary(&summary, None).contains("No data"));

        let breakdown = CategoryBreakdown::generate(store.state(), filter);
        assert!(format_breakdown(&breakdown).contains("No spending"));

        let budgets = BudgetStatusReport::generate(store.state(), BudgetPeriod::new(2025, 1));
        assert!(format_budget_table(&budgets).contains("No budgets"));
    }
}
