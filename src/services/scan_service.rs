//! Folder scanner: claims new images out of the watch folder.

use crate::error::{AppError, Result};
use crate::file_utils;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An image claimed from the watch folder, parked in staging for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Absolute path inside the review staging directory.
    pub path: PathBuf,
    /// Object selected when the file was claimed.
    pub object: String,
}

/// Scans the watch folder and claims at most one qualifying image.
///
/// The first regular file with a supported extension, in raw directory
/// listing order, is renamed into `review_dir` (created on demand) under a
/// timestamped name owned by `object`. Remaining files are left for later
/// scans. Returns `Ok(None)` when the folder does not exist or holds no
/// qualifying file.
///
/// A file that vanishes between listing and rename is logged and skipped;
/// the scan moves on to the next entry.
pub fn scan_watch_folder(
    watch_dir: &Path,
    object: &str,
    review_dir: &Path,
) -> Result<Option<StagedFile>> {
    if !watch_dir.is_dir() {
        return Ok(None);
    }

    let entries = fs::read_dir(watch_dir).map_err(|e| {
        AppError::WatchFolderScan(format!("list {}: {}", watch_dir.display(), e))
    })?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("unreadable entry in {}: {}", watch_dir.display(), e);
                continue;
            }
        };

        let source = entry.path();
        if !source.is_file() || !file_utils::is_supported_image(&source) {
            continue;
        }

        fs::create_dir_all(review_dir).map_err(|e| {
            AppError::WatchFolderScan(format!("create {}: {}", review_dir.display(), e))
        })?;

        let timestamp = file_utils::texture_timestamp();
        let staged_path = review_dir.join(file_utils::texture_file_name(
            object, &timestamp, &source,
        ));

        // Single filesystem move, so a crash cannot leave the file claimed twice.
        match fs::rename(&source, &staged_path) {
            Ok(()) => {
                debug!("claimed {} as {}", source.display(), staged_path.display());
                return Ok(Some(StagedFile {
                    path: staged_path,
                    object: object.to_string(),
                }));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("{} vanished before claim, skipping", source.display());
                continue;
            }
            Err(e) => {
                return Err(AppError::WatchFolderScan(format!(
                    "move {} to {}: {}",
                    source.display(),
                    staged_path.display(),
                    e
                )));
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"pixels").unwrap();
        path
    }

    #[test]
    fn test_nonexistent_watch_folder_is_noop() {
        let dir = TempDir::new().unwrap();
        let result = scan_watch_folder(
            &dir.path().join("missing"),
            "Cube",
            &dir.path().join("review"),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_watch_folder_is_noop() {
        let dir = TempDir::new().unwrap();
        let watch = dir.path().join("watch");
        fs::create_dir(&watch).unwrap();

        let result = scan_watch_folder(&watch, "Cube", &dir.path().join("review")).unwrap();
        assert!(result.is_none());
        assert!(!dir.path().join("review").exists());
    }

    #[test]
    fn test_unsupported_files_left_in_place() {
        let dir = TempDir::new().unwrap();
        let watch = dir.path().join("watch");
        fs::create_dir(&watch).unwrap();
        touch(&watch, "notes.txt");
        touch(&watch, "anim.gif");

        let result = scan_watch_folder(&watch, "Cube", &dir.path().join("review")).unwrap();
        assert!(result.is_none());
        assert!(watch.join("notes.txt").exists());
        assert!(watch.join("anim.gif").exists());
    }

    #[test]
    fn test_claims_exactly_one_of_many() {
        let dir = TempDir::new().unwrap();
        let watch = dir.path().join("watch");
        let review = dir.path().join("review");
        fs::create_dir(&watch).unwrap();
        touch(&watch, "a.png");
        touch(&watch, "b.jpg");

        let staged = scan_watch_folder(&watch, "Cube", &review).unwrap().unwrap();
        assert_eq!(staged.object, "Cube");
        assert!(staged.path.starts_with(&review));
        let name = staged.path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("T_Cube_"));

        let remaining: Vec<_> = fs::read_dir(&watch).unwrap().collect();
        assert_eq!(remaining.len(), 1);

        // The leftover is claimed by the next scan.
        let staged2 = scan_watch_folder(&watch, "Cube", &review).unwrap().unwrap();
        assert_ne!(staged2.path, staged.path);
        assert_eq!(fs::read_dir(&watch).unwrap().count(), 0);
    }

    #[test]
    fn test_staged_name_keeps_extension() {
        let dir = TempDir::new().unwrap();
        let watch = dir.path().join("watch");
        let review = dir.path().join("review");
        fs::create_dir(&watch).unwrap();
        touch(&watch, "drawing.TGA");

        let staged = scan_watch_folder(&watch, "Statue", &review).unwrap().unwrap();
        let name = staged.path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("T_Statue_"), "got {}", name);
        assert!(name.ends_with(".TGA"), "got {}", name);
        assert!(staged.path.exists());
    }

    #[test]
    fn test_subdirectories_ignored() {
        let dir = TempDir::new().unwrap();
        let watch = dir.path().join("watch");
        fs::create_dir_all(watch.join("nested.png")).unwrap();

        let result = scan_watch_folder(&watch, "Cube", &dir.path().join("review")).unwrap();
        assert!(result.is_none());
    }
}
