//! Report and export CLI commands

use std::fs::File;
use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use crate::analytics::{
    CategoryBreakdown, PeriodComparison, SpendingSummary, TrendReport,
};
use crate::display::{format_breakdown, format_comparison, format_summary, format_trend};
use crate::error::FinTrackResult;
use crate::export::{export_expenses_csv, export_filename, export_incomes_csv, ExportKind};

use super::{AppContext, FilterArgs};

#[derive(Debug, Subcommand)]
pub enum ReportCommands {
    /// Headline totals: spent, earned, net
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Spending split by category and subcategory
    Breakdown {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Per-period spending over a trailing window
    Trend {
        #[command(flatten)]
        filter: FilterArgs,
        /// How many periods to include
        #[arg(short = 'n', long, default_value = "6")]
        periods: u32,
    },
    /// One period against the one before it
    Compare {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Cross-check reimbursement links and entity references
    Verify,
}

pub fn handle_report_command(ctx: &AppContext, cmd: ReportCommands) -> FinTrackResult<()> {
    let state = ctx.store.state();
    match cmd {
        ReportCommands::Summary { filter } => {
            let (filter, wallet_name) = filter.resolve(ctx)?;
            let summary = SpendingSummary::generate(state, filter);
            print!("{}", format_summary(&summary, wallet_name.as_deref()));
        }
        ReportCommands::Breakdown { filter } => {
            let (filter, _) = filter.resolve(ctx)?;
            let breakdown = CategoryBreakdown::generate(state, filter);
            print!("{}", format_breakdown(&breakdown));
        }
        ReportCommands::Trend { filter, periods } => {
            let period = filter.resolve_period()?;
            let (resolved, _) = filter.resolve(ctx)?;
            let trend = TrendReport::generate(state, period, periods, resolved.wallet);
            print!("{}", format_trend(&trend));
        }
        ReportCommands::Compare { filter } => {
            let period = filter.resolve_period()?;
            let (resolved, _) = filter.resolve(ctx)?;
            let cmp = PeriodComparison::generate(state, period, resolved.wallet);
            print!("{}", format_comparison(&cmp));
        }
        ReportCommands::Verify => {
            let issues = state.verify_links();
            if issues.is_empty() {
                println!("All links check out.");
            } else {
                println!("Found {} issue(s):", issues.len());
                for issue in issues {
                    println!("  - {}", issue);
                }
            }
        }
    }
    Ok(())
}

#[derive(Debug, Subcommand)]
pub enum ExportCommands {
    /// Export expenses as CSV
    Expenses {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output directory (defaults to the data export directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Export incomes as CSV
    Incomes {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output directory (defaults to the data export directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

pub fn handle_export_command(ctx: &AppContext, cmd: ExportCommands) -> FinTrackResult<()> {
    let (kind, filter, out) = match cmd {
        ExportCommands::Expenses { filter, out } => (ExportKind::Expenses, filter, out),
        ExportCommands::Incomes { filter, out } => (ExportKind::Incomes, filter, out),
    };

    let (filter, wallet_name) = filter.resolve(ctx)?;
    let dir = match out {
        Some(dir) => dir,
        None => {
            ctx.paths.ensure_directories()?;
            ctx.paths.export_dir()
        }
    };
    let filename = export_filename(
        kind,
        wallet_name.as_deref(),
        &filter,
        Local::now().date_naive(),
    );
    let path = dir.join(&filename);

    let file = File::create(&path)?;
    let state = ctx.store.state();
    match kind {
        ExportKind::Expenses => export_expenses_csv(state, &filter, file)?,
        ExportKind::Incomes => export_incomes_csv(state, &filter, file)?,
    }

    println!("Wrote {}", path.display());
    Ok(())
}
