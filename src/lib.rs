//! FinTrack - personal finance tracking from the command line
//!
//! FinTrack keeps expenses, incomes, and budgets across multiple wallets in
//! a single JSON snapshot, and computes spending reports over them. Budgets
//! run on a fixed monthly window from the 26th to the 25th.
//!
//! # Architecture
//!
//! - `models`: Core data types (wallets, expenses, incomes, categories, budgets)
//! - `state`: The observable state store and snapshot persistence
//! - `analytics`: Read-only reports computed over the state
//! - `export`: CSV exports
//! - `display`: Terminal formatting for reports
//! - `config`: Path resolution and persisted preferences
//! - `cli`: Command handlers
//! - `util`: Retry and debounce helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::FinTrackPaths;
//! use fintrack::cli::AppContext;
//!
//! let paths = FinTrackPaths::new()?;
//! let ctx = AppContext::load(paths)?;
//! ```

pub mod analytics;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod state;
pub mod util;

pub use error::{FinTrackError, FinTrackResult};
