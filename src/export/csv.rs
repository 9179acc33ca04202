//! CSV export of expenses and incomes
//!
//! Exports are raw data dumps for the filtered slice: reimbursed expenses and
//! reimbursement incomes are included, with their status in a column, so the
//! file reflects what actually happened rather than the report totals.

use std::io::Write;

use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;

use crate::analytics::ReportFilter;
use crate::error::FinTrackResult;
use crate::state::AppState;

/// Which table an export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Expenses,
    Incomes,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expenses => "expenses",
            Self::Incomes => "incomes",
        }
    }
}

#[derive(Debug, Serialize)]
struct ExpenseRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Wallet")]
    wallet: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Subcategory")]
    subcategory: &'a str,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Note")]
    note: &'a str,
    #[serde(rename = "Reimbursement")]
    reimbursement: &'a str,
}

#[derive(Debug, Serialize)]
struct IncomeRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Wallet")]
    wallet: String,
    #[serde(rename = "Source")]
    source: &'a str,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Note")]
    note: &'a str,
    #[serde(rename = "Is Reimbursement")]
    is_reimbursement: bool,
}

/// Write the filtered expenses as CSV, oldest first
pub fn export_expenses_csv<W: Write>(
    state: &AppState,
    filter: &ReportFilter,
    writer: W,
) -> FinTrackResult<()> {
    let mut expenses: Vec<_> = state
        .expenses
        .iter()
        .filter(|e| {
            filter.range.contains(e.date) && filter.wallet.map_or(true, |w| w == e.wallet_id)
        })
        .collect();
    expenses.sort_by_key(|e| e.date);

    let mut csv = Writer::from_writer(writer);
    for expense in expenses {
        let reimbursement = match expense.reimbursement_status {
            Some(status) => status.as_str(),
            None => "",
        };
        csv.serialize(ExpenseRow {
            id: expense.id.to_string(),
            date: expense.date,
            wallet: state.wallet_name(expense.wallet_id),
            category: &expense.category,
            subcategory: expense.subcategory.as_deref().unwrap_or(""),
            amount: expense.amount.to_f64(),
            note: &expense.note,
            reimbursement,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the filtered incomes as CSV, oldest first
pub fn export_incomes_csv<W: Write>(
    state: &AppState,
    filter: &ReportFilter,
    writer: W,
) -> FinTrackResult<()> {
    let mut incomes: Vec<_> = state
        .incomes
        .iter()
        .filter(|i| {
            filter.range.contains(i.date) && filter.wallet.map_or(true, |w| w == i.wallet_id)
        })
        .collect();
    incomes.sort_by_key(|i| i.date);

    let mut csv = Writer::from_writer(writer);
    for income in incomes {
        csv.serialize(IncomeRow {
            id: income.id.to_string(),
            date: income.date,
            wallet: state.wallet_name(income.wallet_id),
            source: &income.source,
            amount: income.amount.to_f64(),
            note: &income.note,
            is_reimbursement: income.is_reimbursement,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Build the download filename for an export
///
/// `fintrack-<type>-<wallet>-<YYYYMMDD-YYYYMMDD>-<yyyy-mm-dd>.csv`, where
/// the wallet part is a slug of the wallet name or "all".
pub fn export_filename(
    kind: ExportKind,
    wallet_name: Option<&str>,
    filter: &ReportFilter,
    today: NaiveDate,
) -> String {
    let wallet_part = match wallet_name {
        Some(name) => slugify(name),
        None => "all".to_string(),
    };
    format!(
        "fintrack-{}-{}-{}-{}-{}.csv",
        kind.as_str(),
        wallet_part,
        filter.range.start.format("%Y%m%d"),
        filter.range.end.format("%Y%m%d"),
        today.format("%Y-%m-%d"),
    )
}

/// Lowercase, with runs of anything non-alphanumeric collapsed to one dash
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "wallet".to_string()
    } else {
        slug
    }
}
