//! Expense CLI commands

use std::str::FromStr;

use clap::Subcommand;

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{Expense, ExpenseId, Money};

use super::{parse_date_or_today, AppContext, FilterArgs};

#[derive(Debug, Subcommand)]
pub enum ExpenseCommands {
    /// Add an expense
    Add {
        /// Wallet name or id
        wallet: String,
        /// Amount, e.g. "12.50"
        amount: String,
        /// Category name
        category: String,
        /// Subcategory name
        #[arg(short, long)]
        sub: Option<String>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
        /// Expect this expense to be paid back
        #[arg(short, long)]
        reimbursable: bool,
    },
    /// List expenses in a period or date range
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Delete an expense
    Delete {
        /// Expense id
        id: String,
    },
}

pub fn handle_expense_command(ctx: &mut AppContext, cmd: ExpenseCommands) -> FinTrackResult<()> {
    match cmd {
        ExpenseCommands::Add {
            wallet,
            amount,
            category,
            sub,
            date,
            note,
            reimbursable,
        } => {
            let wallet_id = ctx.resolve_wallet(&wallet)?;
            let amount = Money::parse(&amount).map_err(FinTrackError::Validation)?;
            let date = parse_date_or_today(date.as_deref())?;

            let mut expense = Expense::new(wallet_id, amount, date, category);
            if let Some(sub) = sub {
                expense = expense.with_subcategory(sub);
            }
            if reimbursable {
                expense = expense.reimbursable();
            }
            expense.note = note.unwrap_or_default();

            let id = expense.id;
            ctx.store.add_expense(expense)?;
            ctx.save()?;
            println!("Added expense {}", id);
        }
        ExpenseCommands::List { filter, limit } => {
            let (filter, wallet_name) = filter.resolve(ctx)?;
            let state = ctx.store.state();
            let mut expenses: Vec<&Expense> = state
                .expenses
                .iter()
                .filter(|e| {
                    filter.range.contains(e.date)
                        && filter.wallet.map_or(true, |w| w == e.wallet_id)
                })
                .collect();
            expenses.sort_by_key(|e| std::cmp::Reverse(e.date));

            if expenses.is_empty() {
                println!("No expenses in this range.");
                return Ok(());
            }
            println!(
                "Expenses, {} to {} ({})",
                filter.range.start,
                filter.range.end,
                wallet_name.as_deref().unwrap_or("all wallets")
            );
            for expense in expenses.iter().take(limit) {
                let status = match &expense.reimbursement_status {
                    Some(s) => format!("  [{}]", s),
                    None => String::new(),
                };
                let sub = expense
                    .subcategory
                    .as_deref()
                    .map(|s| format!(" / {}", s))
                    .unwrap_or_default();
                println!(
                    "{}  {}  {:>10}  {}{}{}",
                    expense.id,
                    expense.date,
                    expense.amount.to_string(),
                    expense.category,
                    sub,
                    status
                );
            }
        }
        ExpenseCommands::Delete { id } => {
            let id = ExpenseId::from_str(&id)
                .map_err(|_| FinTrackError::expense_not_found(&id))?;
            if ctx.store.delete_expense(id)? {
                ctx.save()?;
                println!("Deleted expense {}", id);
            } else {
                println!("Expense {} was already gone.", id);
            }
        }
    }
    Ok(())
}
