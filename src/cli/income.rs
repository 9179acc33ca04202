//! Income CLI commands, including reimbursement linking

use std::str::FromStr;

use clap::Subcommand;

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{ExpenseId, Income, IncomeId, Money};

use super::{parse_date_or_today, AppContext, FilterArgs};

#[derive(Debug, Subcommand)]
pub enum IncomeCommands {
    /// Add an income
    Add {
        /// Wallet name or id
        wallet: String,
        /// Amount, e.g. "2000"
        amount: String,
        /// Where the money came from
        source: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List incomes in a period or date range
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Delete an income (linked expenses go back to pending)
    Delete {
        /// Income id
        id: String,
    },
    /// Link an income to the reimbursable expenses it repays
    Link {
        /// Income id
        income: String,
        /// Expense ids
        #[arg(required = true)]
        expenses: Vec<String>,
    },
    /// Remove an income's reimbursement links
    Unlink {
        /// Income id
        income: String,
    },
}

fn parse_income_id(s: &str) -> FinTrackResult<IncomeId> {
    IncomeId::from_str(s).map_err(|_| FinTrackError::income_not_found(s))
}

pub fn handle_income_command(ctx: &mut AppContext, cmd: IncomeCommands) -> FinTrackResult<()> {
    match cmd {
        IncomeCommands::Add {
            wallet,
            amount,
            source,
            date,
            note,
        } => {
            let wallet_id = ctx.resolve_wallet(&wallet)?;
            let amount = Money::parse(&amount).map_err(FinTrackError::Validation)?;
            let date = parse_date_or_today(date.as_deref())?;

            let mut income = Income::new(wallet_id, amount, date, source);
            income.note = note.unwrap_or_default();

            let id = income.id;
            ctx.store.add_income(income)?;
            ctx.save()?;
            println!("Added income {}", id);
        }
        IncomeCommands::List { filter, limit } => {
            let (filter, wallet_name) = filter.resolve(ctx)?;
            let state = ctx.store.state();
            let mut incomes: Vec<&Income> = state
                .incomes
                .iter()
                .filter(|i| {
                    filter.range.contains(i.date)
                        && filter.wallet.map_or(true, |w| w == i.wallet_id)
                })
                .collect();
            incomes.sort_by_key(|i| std::cmp::Reverse(i.date));

            if incomes.is_empty() {
                println!("No incomes in this range.");
                return Ok(());
            }
            println!(
                "Incomes, {} to {} ({})",
                filter.range.start,
                filter.range.end,
                wallet_name.as_deref().unwrap_or("all wallets")
            );
            for income in incomes.iter().take(limit) {
                let tag = if income.is_reimbursement {
                    format!("  [reimburses {} expenses]", income.linked_expense_ids.len())
                } else {
                    String::new()
                };
                println!(
                    "{}  {}  {:>10}  {}{}",
                    income.id,
                    income.date,
                    income.amount.to_string(),
                    income.source,
                    tag
                );
            }
        }
        IncomeCommands::Delete { id } => {
            let id = parse_income_id(&id)?;
            if ctx.store.delete_income(id)? {
                ctx.save()?;
                println!("Deleted income {}", id);
            } else {
                println!("Income {} was already gone.", id);
            }
        }
        IncomeCommands::Link { income, expenses } => {
            let income_id = parse_income_id(&income)?;
            let expense_ids = expenses
                .iter()
                .map(|s| {
                    ExpenseId::from_str(s).map_err(|_| FinTrackError::expense_not_found(s))
                })
                .collect::<FinTrackResult<Vec<_>>>()?;
            ctx.store.link_reimbursement(income_id, &expense_ids)?;
            ctx.save()?;
            println!(
                "Linked income {} to {} expense(s).",
                income_id,
                expense_ids.len()
            );
        }
        IncomeCommands::Unlink { income } => {
            let income_id = parse_income_id(&income)?;
            ctx.store.unlink_reimbursement(income_id)?;
            ctx.save()?;
            println!("Unlinked income {}.", income_id);
        }
    }
    Ok(())
}
