use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_budget_command, handle_category_command, handle_expense_command,
    handle_export_command, handle_income_command, handle_report_command, handle_wallet_command,
    AppContext, BudgetCommands, CategoryCommands, ExpenseCommands, ExportCommands,
    IncomeCommands, ReportCommands, WalletCommands,
};
use fintrack::config::FinTrackPaths;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker for the command line",
    long_about = "FinTrack tracks expenses, incomes, and budgets across wallets, \
                  with reports by category, period trends, and reimbursement \
                  tracking. Budget periods run from the 26th to the 25th."
)]
struct Cli {
    /// Data directory to use instead of the platform default
    #[arg(long, global = true, env = "FINTRACK_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Wallet management commands
    #[command(subcommand)]
    Wallet(WalletCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Income commands, including reimbursement linking
    #[command(subcommand, alias = "inc")]
    Income(IncomeCommands),

    /// Budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Reports over the tracked data
    #[command(subcommand)]
    Report(ReportCommands),

    /// CSV exports
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => FinTrackPaths::with_base_dir(dir),
        None => FinTrackPaths::new()?,
    };

    match cli.command {
        Some(Commands::Wallet(cmd)) => {
            let mut ctx = AppContext::load(paths)?;
            handle_wallet_command(&mut ctx, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let mut ctx = AppContext::load(paths)?;
            handle_category_command(&mut ctx, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let mut ctx = AppContext::load(paths)?;
            handle_expense_command(&mut ctx, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            let mut ctx = AppContext::load(paths)?;
            handle_income_command(&mut ctx, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            let mut ctx = AppContext::load(paths)?;
            handle_budget_command(&mut ctx, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let ctx = AppContext::load(paths)?;
            handle_report_command(&ctx, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            let ctx = AppContext::load(paths)?;
            handle_export_command(&ctx, cmd)?;
        }
        Some(Commands::Config) => {
            println!("FinTrack configuration");
            println!("======================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Snapshot file:  {}", paths.snapshot_file().display());
            println!("Prefs file:     {}", paths.prefs_file().display());
            println!("Export dir:     {}", paths.export_dir().display());
        }
        None => {
            println!("FinTrack - personal finance tracking");
            println!();
            println!("Run 'fintrack --help' for usage information.");

            // One-time quick-add hint
            let prefs_path = paths.prefs_file();
            let mut prefs = fintrack::config::UiPrefs::load(&prefs_path)?;
            if prefs.mark_fab_hint_seen() {
                println!();
                println!("Tip: add an expense fast with 'fintrack exp add <wallet> <amount> <category>'.");
                paths.ensure_directories()?;
                prefs.save(&prefs_path)?;
            }
        }
    }

    Ok(())
}
