//! Paths and persisted preferences

mod paths;
mod prefs;

pub use paths::FinTrackPaths;
pub use prefs::UiPrefs;
