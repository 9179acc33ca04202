//! Path resolution for FinTrack data
//!
//! ## Resolution order
//!
//! 1. `FINTRACK_DATA_DIR` environment variable (explicit override)
//! 2. The platform data directory (`~/.local/share/fintrack` on Linux,
//!    the equivalent on macOS and Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{FinTrackError, FinTrackResult};

/// Locations of everything FinTrack keeps on disk
#[derive(Debug, Clone)]
pub struct FinTrackPaths {
    base_dir: PathBuf,
}

impl FinTrackPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> FinTrackResult<Self> {
        let base_dir = if let Ok(custom) = std::env::var("FINTRACK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "fintrack")
                .ok_or_else(|| {
                    FinTrackError::Config("Could not determine a data directory".to_string())
                })?
                .data_dir()
                .to_path_buf()
        };
        Ok(Self { base_dir })
    }

    /// Use a fixed base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// The state snapshot file
    pub fn snapshot_file(&self) -> PathBuf {
        self.base_dir.join("snapshot.json")
    }

    /// The UI preferences file
    pub fn prefs_file(&self) -> PathBuf {
        self.base_dir.join("prefs.json")
    }

    /// Default directory for CSV exports
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Create the directories FinTrack writes into
    pub fn ensure_directories(&self) -> FinTrackResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.export_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.snapshot_file(), temp_dir.path().join("snapshot.json"));
        assert_eq!(paths.prefs_file(), temp_dir.path().join("prefs.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.export_dir().exists());
    }
}
