//! Persisted UI preferences
//!
//! Small bits of state that outlive a session but aren't financial data:
//! whether the quick-add hint has been shown, and which wallet was last
//! selected. Loading falls back to defaults when the file is missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FinTrackResult;
use crate::models::WalletId;
use crate::state::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiPrefs {
    /// The one-time quick-add hint has been shown
    #[serde(default)]
    pub fab_hint_seen: bool,
    /// Wallet selected when the app last ran
    #[serde(default)]
    pub selected_wallet: Option<WalletId>,
}

impl UiPrefs {
    /// Load preferences, or defaults if the file doesn't exist yet
    pub fn load<P: AsRef<Path>>(path: P) -> FinTrackResult<Self> {
        read_json(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> FinTrackResult<()> {
        write_json_atomic(path, self)
    }

    /// Mark the hint as shown; returns true the first time
    pub fn mark_fab_hint_seen(&mut self) -> bool {
        let first = !self.fab_hint_seen;
        self.fab_hint_seen = true;
        first
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let prefs = UiPrefs::load(temp_dir.path().join("prefs.json")).unwrap();
        assert_eq!(prefs, UiPrefs::default());
        assert!(!prefs.fab_hint_seen);
    }

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");

        let mut prefs = UiPrefs::default();
        prefs.mark_fab_hint_seen();
        prefs.selected_wallet = Some(WalletId::new());
        prefs.save(&path).unwrap();

        let loaded = UiPrefs::load(&path).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_hint_seen_only_first_time() {
        let mut prefs = UiPrefs::default();
        assert!(prefs.mark_fab_hint_seen());
        assert!(!prefs.mark_fab_hint_seen());
    }
}
