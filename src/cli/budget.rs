//! Budget CLI commands

use std::str::FromStr;

use clap::Subcommand;

use crate::analytics::BudgetStatusReport;
use crate::display::format_budget_table;
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{Budget, BudgetId, Money};

use super::AppContext;

#[derive(Debug, Subcommand)]
pub enum BudgetCommands {
    /// Set a budget for a category and period
    Set {
        /// Category name or id
        category: String,
        /// Limit, e.g. "400"
        amount: String,
        /// Budget period as YYYY-MM (defaults to the current period)
        #[arg(short, long)]
        period: Option<String>,
        /// Scope to one wallet (defaults to all wallets)
        #[arg(short, long)]
        wallet: Option<String>,
    },
    /// Show budget status for a period
    Status {
        /// Budget period as YYYY-MM (defaults to the current period)
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Delete a budget
    Delete {
        /// Budget id
        id: String,
    },
}

pub fn handle_budget_command(ctx: &mut AppContext, cmd: BudgetCommands) -> FinTrackResult<()> {
    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            period,
            wallet,
        } => {
            let category_id = ctx.resolve_category(&category)?;
            let amount = Money::parse(&amount).map_err(FinTrackError::Validation)?;
            let period = match period.as_deref() {
                Some(s) => crate::models::BudgetPeriod::parse(s)
                    .map_err(|e| FinTrackError::Validation(e.to_string()))?,
                None => crate::models::BudgetPeriod::current(),
            };

            let mut budget = Budget::new(category_id, amount, period);
            if let Some(wallet) = wallet {
                budget = budget.for_wallet(ctx.resolve_wallet(&wallet)?);
            }

            // One budget per category/wallet/period; setting again replaces it
            let existing = ctx.store.state().budgets.iter().find(|b| {
                b.category_id == budget.category_id
                    && b.period == budget.period
                    && b.wallet_id == budget.wallet_id
            });
            if let Some(existing) = existing {
                let mut replacement = budget;
                replacement.id = existing.id;
                ctx.store.mutate(|m| m.update_budget(replacement))?;
                println!("Updated budget for {} ({}).", category, period);
            } else {
                let id = budget.id;
                ctx.store.add_budget(budget)?;
                println!("Set budget {} for {} ({}).", id, category, period);
            }
            ctx.save()?;
        }
        BudgetCommands::Status { period } => {
            let period = match period.as_deref() {
                Some(s) => crate::models::BudgetPeriod::parse(s)
                    .map_err(|e| FinTrackError::Validation(e.to_string()))?,
                None => crate::models::BudgetPeriod::current(),
            };
            let report = BudgetStatusReport::generate(ctx.store.state(), period);
            print!("{}", format_budget_table(&report));
        }
        BudgetCommands::Delete { id } => {
            let id =
                BudgetId::from_str(&id).map_err(|_| FinTrackError::budget_not_found(&id))?;
            if ctx.store.delete_budget(id)? {
                ctx.save()?;
                println!("Deleted budget {}", id);
            } else {
                println!("Budget {} was already gone.", id);
            }
        }
    }
    Ok(())
}
