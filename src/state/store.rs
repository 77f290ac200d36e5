//! Whole-document persistence of [`ProjectState`].
//!
//! One JSON file per project, read wholesale at startup and written wholesale
//! after every mutating operation. Load failures are absorbed: a missing or
//! unreadable document yields defaults so the host never sees a hard error
//! from persistence.

use crate::error::{AppError, Result};
use crate::project::ProjectPaths;
use crate::state::ProjectState;
use log::{info, warn};
use std::fs;

/// Load/save port for the persisted project state.
pub struct StateStore {
    paths: ProjectPaths,
}

impl StateStore {
    pub fn new(paths: ProjectPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Loads the state document, falling back to defaults.
    ///
    /// Defaults are returned when the project has no fixed location, the file
    /// does not exist, or the document cannot be read or parsed. Parse and
    /// read failures are logged, never propagated.
    pub fn load(&self) -> ProjectState {
        let Some(path) = self.paths.state_file() else {
            info!("project has no fixed location, starting from default state");
            return ProjectState::default();
        };

        if !path.exists() {
            return ProjectState::default();
        }

        let mut state = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<ProjectState>(&text) {
                Ok(state) => state,
                Err(e) => {
                    warn!("failed to parse {}: {}, using defaults", path.display(), e);
                    ProjectState::default()
                }
            },
            Err(e) => {
                warn!("failed to read {}: {}, using defaults", path.display(), e);
                ProjectState::default()
            }
        };

        state.normalize();
        state
    }

    /// Serializes the full state to the project's state file.
    ///
    /// A plain overwrite, not an atomic replace; partial writes on crash are
    /// an accepted risk. No-op when the project has no fixed location.
    pub fn save(&self, state: &ProjectState) -> Result<()> {
        let Some(path) = self.paths.state_file() else {
            return Ok(());
        };

        let text = serde_json::to_string(state)?;
        fs::write(&path, text)
            .map_err(|e| AppError::StatePersistence(format!("write {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn store_in(dir: &Path) -> StateStore {
        StateStore::new(ProjectPaths::new(dir))
    }

    #[test]
    fn test_load_without_project_location_gives_defaults() {
        let store = StateStore::new(ProjectPaths::unsaved());
        assert_eq!(store.load(), ProjectState::default());
    }

    #[test]
    fn test_save_without_project_location_is_noop() {
        let store = StateStore::new(ProjectPaths::unsaved());
        assert!(store.save(&ProjectState::default()).is_ok());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(dir.path()).load(), ProjectState::default());
    }

    #[test]
    fn test_load_corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(dir.path());
        fs::write(store.paths().state_file().unwrap(), "{not json").unwrap();
        assert_eq!(store.load(), ProjectState::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(dir.path());

        let mut state = ProjectState::new();
        state.add_object("Cube");
        state.select_object("Cube");
        state.auto_refresh = true;
        state.set_refresh_interval(9);

        store.save(&state).unwrap();
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_load_repairs_stale_selection() {
        let dir = TempDir::new().unwrap();
        let store = store_in(dir.path());
        fs::write(
            store.paths().state_file().unwrap(),
            r#"{"objects": [], "selected_object": "Gone", "refresh_interval": 99}"#,
        )
        .unwrap();

        let state = store.load();
        assert!(state.selected_object().is_none());
        assert_eq!(state.refresh_interval, 60);
    }
}
