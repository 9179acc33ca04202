//! CLI command handlers
//!
//! Bridges clap argument parsing with the state store and the report layer.
//! Handlers that change data save the snapshot before returning; read-only
//! handlers never write.

pub mod budget;
pub mod category;
pub mod expense;
pub mod income;
pub mod report;
pub mod wallet;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use report::{handle_export_command, handle_report_command, ExportCommands, ReportCommands};
pub use wallet::{handle_wallet_command, WalletCommands};

use std::str::FromStr;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::Args;
use log::info;

use crate::analytics::{DateRange, ReportFilter};
use crate::config::{FinTrackPaths, UiPrefs};
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{BudgetPeriod, CategoryId, WalletId};
use crate::state::{Snapshot, StateStore};
use crate::util::retry_with_backoff;

const SAVE_ATTEMPTS: u32 = 3;
const SAVE_BACKOFF: Duration = Duration::from_millis(100);

/// Everything a command handler works with
pub struct AppContext {
    pub store: StateStore,
    pub paths: FinTrackPaths,
    pub prefs: UiPrefs,
}

impl AppContext {
    /// Load the snapshot and preferences from disk
    pub fn load(paths: FinTrackPaths) -> FinTrackResult<Self> {
        let snapshot = retry_with_backoff(SAVE_ATTEMPTS, SAVE_BACKOFF, || {
            Snapshot::load(paths.snapshot_file())
        })?;
        let prefs = UiPrefs::load(paths.prefs_file())?;

        let mut store = StateStore::new();
        store.load_snapshot(snapshot);

        // Restore the remembered wallet if it still exists
        if let Some(wallet) = prefs.selected_wallet {
            if store.state().wallet(wallet).is_some() {
                store.select_wallet(Some(wallet))?;
            }
        }

        Ok(Self {
            store,
            paths,
            prefs,
        })
    }

    /// Persist the snapshot and preferences
    pub fn save(&mut self) -> FinTrackResult<()> {
        self.paths.ensure_directories()?;
        let snapshot = Snapshot::capture(&self.store);
        retry_with_backoff(SAVE_ATTEMPTS, SAVE_BACKOFF, || {
            snapshot.save(self.paths.snapshot_file())
        })?;
        self.prefs.selected_wallet = self.store.state().selected_wallet;
        self.prefs.save(self.paths.prefs_file())?;
        info!("state saved to {}", self.paths.snapshot_file().display());
        Ok(())
    }

    /// Resolve a wallet from a name or an id string
    pub fn resolve_wallet(&self, name_or_id: &str) -> FinTrackResult<WalletId> {
        if let Some(wallet) = self.store.state().wallet_by_name(name_or_id) {
            return Ok(wallet.id);
        }
        if let Ok(id) = WalletId::from_str(name_or_id) {
            if self.store.state().wallet(id).is_some() {
                return Ok(id);
            }
        }
        Err(FinTrackError::wallet_not_found(name_or_id))
    }

    /// Resolve a category from a name or an id string
    pub fn resolve_category(&self, name_or_id: &str) -> FinTrackResult<CategoryId> {
        let state = self.store.state();
        if let Some(category) = state
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name_or_id))
        {
            return Ok(category.id);
        }
        if let Ok(id) = CategoryId::from_str(name_or_id) {
            if state.category(id).is_some() {
                return Ok(id);
            }
        }
        Err(FinTrackError::category_not_found(name_or_id))
    }
}

/// Shared report scope flags
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Wallet name or id (defaults to the selected wallet; "all" for every wallet)
    #[arg(short, long)]
    pub wallet: Option<String>,

    /// Budget period as YYYY-MM (defaults to the current period)
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    pub period: Option<String>,

    /// Range start date (YYYY-MM-DD); overrides --period together with --to
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Range end date (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

impl FilterArgs {
    /// Turn the flags into a concrete filter plus the wallet's display name
    pub fn resolve(&self, ctx: &AppContext) -> FinTrackResult<(ReportFilter, Option<String>)> {
        let range = match (&self.from, &self.to) {
            (Some(from), Some(to)) => DateRange::new(parse_date(from)?, parse_date(to)?),
            _ => self.resolve_period()?.into(),
        };

        let wallet = match self.wallet.as_deref() {
            Some("all") => None,
            Some(name_or_id) => Some(ctx.resolve_wallet(name_or_id)?),
            None => ctx.store.state().selected_wallet,
        };
        let wallet_name = wallet.map(|id| ctx.store.state().wallet_name(id));

        Ok((ReportFilter::new(range).for_wallet(wallet), wallet_name))
    }

    /// The budget period the flags name, ignoring any explicit date range
    pub fn resolve_period(&self) -> FinTrackResult<BudgetPeriod> {
        match self.period.as_deref() {
            Some(s) => {
                BudgetPeriod::parse(s).map_err(|e| FinTrackError::Validation(e.to_string()))
            }
            None => Ok(BudgetPeriod::current()),
        }
    }
}

pub(crate) fn parse_date(s: &str) -> FinTrackResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| FinTrackError::Validation(format!("Invalid date: '{}' (expected YYYY-MM-DD)", s)))
}

pub(crate) fn parse_date_or_today(s: Option<&str>) -> FinTrackResult<NaiveDate> {
    match s {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}
