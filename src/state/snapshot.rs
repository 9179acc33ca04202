//! Snapshot persistence for the state store
//!
//! The whole application state serializes to a single JSON document. Writes
//! go through a temp file plus rename so a crash mid-write never leaves a
//! half-written snapshot behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{Budget, Category, Expense, Income, User, Wallet};
use crate::state::{Mutation, StateStore};

/// Serializable image of the full application data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub wallets: Vec<Wallet>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl Snapshot {
    /// Capture the data currently held by a store
    pub fn capture(store: &StateStore) -> Self {
        let state = store.state();
        Self {
            user: state.user.clone(),
            wallets: state.wallets.clone(),
            expenses: state.expenses.clone(),
            incomes: state.incomes.clone(),
            categories: state.categories.clone(),
            budgets: state.budgets.clone(),
        }
    }

    /// Load a snapshot from disk, or an empty one if the file doesn't exist
    pub fn load<P: AsRef<Path>>(path: P) -> FinTrackResult<Self> {
        read_json(path)
    }

    /// Write this snapshot to disk atomically
    pub fn save<P: AsRef<Path>>(&self, path: P) -> FinTrackResult<()> {
        write_json_atomic(path, self)
    }
}

impl StateStore {
    /// Replace all store data with a snapshot as one batch
    ///
    /// Subscribers to each key fire once after the whole snapshot is in,
    /// never against a half-loaded state.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) {
        self.mutate(|m: &mut Mutation<'_>| {
            m.set_user(snapshot.user);
            m.set_wallets(snapshot.wallets);
            m.set_categories(snapshot.categories);
            m.set_expenses(snapshot.expenses);
            m.set_incomes(snapshot.incomes);
            m.set_budgets(snapshot.budgets);
        });
        info!("snapshot loaded");
    }
}

/// Read JSON from a file, returning the default value if it doesn't exist
pub fn read_json<T, P>(path: P) -> FinTrackResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        FinTrackError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        FinTrackError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> FinTrackResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FinTrackError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FinTrackError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| FinTrackError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| FinTrackError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FinTrackError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinTrackError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
