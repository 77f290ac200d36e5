//! Project location and the directories derived from it.

use crate::config::{REVIEW_DIR, STATE_FILE_NAME, TEXTURES_DIR};
use std::path::{Path, PathBuf};

/// Filesystem locations of a project.
///
/// A project without a fixed location (`root == None`) models a scene that
/// has never been saved: state persistence and texture storage are soft
/// disabled until the host provides a root.
#[derive(Debug, Clone, Default)]
pub struct ProjectPaths {
    root: Option<PathBuf>,
}

impl ProjectPaths {
    /// Creates paths rooted at the given project directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Creates paths for a project with no fixed location yet.
    pub fn unsaved() -> Self {
        Self { root: None }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Location of the persisted state document, if the project has a root.
    pub fn state_file(&self) -> Option<PathBuf> {
        self.root.as_ref().map(|r| r.join(STATE_FILE_NAME))
    }

    /// Permanent texture storage directory, if the project has a root.
    pub fn textures_dir(&self) -> Option<PathBuf> {
        self.root.as_ref().map(|r| r.join(TEXTURES_DIR))
    }

    /// Review staging directory, if the project has a root.
    pub fn review_dir(&self) -> Option<PathBuf> {
        self.root.as_ref().map(|r| r.join(REVIEW_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsaved_project_has_no_paths() {
        let paths = ProjectPaths::unsaved();
        assert!(paths.root().is_none());
        assert!(paths.state_file().is_none());
        assert!(paths.textures_dir().is_none());
        assert!(paths.review_dir().is_none());
    }

    #[test]
    fn test_paths_derive_from_root() {
        let paths = ProjectPaths::new("/tmp/proj");
        assert_eq!(
            paths.state_file().unwrap(),
            PathBuf::from("/tmp/proj").join(STATE_FILE_NAME)
        );
        assert_eq!(
            paths.textures_dir().unwrap(),
            PathBuf::from("/tmp/proj/textures")
        );
        assert_eq!(paths.review_dir().unwrap(), PathBuf::from("/tmp/proj/review"));
    }
}
