//! Wallet CLI commands

use clap::Subcommand;

use crate::error::FinTrackResult;
use crate::models::Wallet;

use super::AppContext;

#[derive(Debug, Subcommand)]
pub enum WalletCommands {
    /// Create a new wallet
    Create {
        /// Wallet name
        name: String,
    },
    /// List wallets
    List,
    /// Rename a wallet
    Rename {
        /// Wallet name or id
        wallet: String,
        /// New name
        name: String,
    },
    /// Delete a wallet (must have no expenses, incomes, or budgets)
    Delete {
        /// Wallet name or id
        wallet: String,
    },
    /// Select the default wallet for reports
    Select {
        /// Wallet name or id, or "none" to clear
        wallet: String,
    },
}

pub fn handle_wallet_command(ctx: &mut AppContext, cmd: WalletCommands) -> FinTrackResult<()> {
    match cmd {
        WalletCommands::Create { name } => {
            let wallet = Wallet::new(name);
            let id = wallet.id;
            ctx.store.add_wallet(wallet)?;
            ctx.save()?;
            println!("Created wallet {}", id);
        }
        WalletCommands::List => {
            let state = ctx.store.state();
            if state.wallets.is_empty() {
                println!("No wallets yet. Create one with 'fintrack wallet create <name>'.");
                return Ok(());
            }
            for wallet in &state.wallets {
                let marker = if state.selected_wallet == Some(wallet.id) {
                    "*"
                } else {
                    " "
                };
                println!("{} {}  {}", marker, wallet.id, wallet.name);
            }
        }
        WalletCommands::Rename { wallet, name } => {
            let id = ctx.resolve_wallet(&wallet)?;
            let mut updated = ctx
                .store
                .state()
                .wallet(id)
                .cloned()
                .ok_or_else(|| crate::error::FinTrackError::wallet_not_found(&wallet))?;
            updated.rename(name);
            ctx.store.mutate(|m| m.update_wallet(updated))?;
            ctx.save()?;
            println!("Renamed wallet {}", id);
        }
        WalletCommands::Delete { wallet } => {
            let id = ctx.resolve_wallet(&wallet)?;
            ctx.store.delete_wallet(id)?;
            ctx.save()?;
            println!("Deleted wallet {}", id);
        }
        WalletCommands::Select { wallet } => {
            if wallet.eq_ignore_ascii_case("none") {
                ctx.store.select_wallet(None)?;
                ctx.save()?;
                println!("Cleared the selected wallet.");
            } else {
                let id = ctx.resolve_wallet(&wallet)?;
                ctx.store.select_wallet(Some(id))?;
                ctx.save()?;
                println!("Selected wallet {}", ctx.store.state().wallet_name(id));
            }
        }
    }
    Ok(())
}
