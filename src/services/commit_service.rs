//! Texture commit: promotes an accepted image into permanent storage.

use crate::error::{AppError, Result};
use crate::file_utils;
use crate::host::AppliedTexture;
use crate::services::scan_service::StagedFile;
use log::{debug, info};
use std::fs;
use std::io;
use std::path::Path;

/// Moves a staged file into permanent texture storage.
///
/// The destination gets a fresh timestamped name and the returned handle a
/// matching unique image id, so a previously applied texture of the same
/// object keeps its identity in the host's registry. Single rename, directory
/// created on demand.
pub fn commit_texture(staged: &StagedFile, textures_dir: &Path) -> Result<AppliedTexture> {
    fs::create_dir_all(textures_dir).map_err(|e| {
        AppError::TextureCommit(format!("create {}: {}", textures_dir.display(), e))
    })?;

    let timestamp = file_utils::texture_timestamp();
    let file_name = file_utils::texture_file_name(&staged.object, &timestamp, &staged.path);
    let destination = textures_dir.join(&file_name);

    fs::rename(&staged.path, &destination).map_err(|e| {
        AppError::TextureCommit(format!(
            "move {} to {}: {}",
            staged.path.display(),
            destination.display(),
            e
        ))
    })?;

    info!("committed {} for {}", destination.display(), staged.object);
    Ok(AppliedTexture {
        image_id: file_utils::texture_image_id(&staged.object, &timestamp),
        path: destination,
        object: staged.object.clone(),
    })
}

/// Deletes a discarded staged file. Already-gone files are not an error.
pub fn discard_staged(staged_path: &Path) -> Result<()> {
    match fs::remove_file(staged_path) {
        Ok(()) => {
            debug!("discarded {}", staged_path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::ReviewDiscard(format!(
            "remove {}: {}",
            staged_path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn staged_fixture(dir: &Path, name: &str, object: &str) -> StagedFile {
        let path = dir.join(name);
        fs::write(&path, b"pixels").unwrap();
        StagedFile {
            path,
            object: object.to_string(),
        }
    }

    #[test]
    fn test_commit_moves_file_with_fresh_name() {
        let dir = TempDir::new().unwrap();
        let textures = dir.path().join("textures");
        let staged = staged_fixture(dir.path(), "T_Cube_20260823_120000.png", "Cube");

        let applied = commit_texture(&staged, &textures).unwrap();

        assert!(!staged.path.exists());
        assert!(applied.path.exists());
        assert!(applied.path.starts_with(&textures));
        assert_eq!(applied.object, "Cube");
        let name = applied.path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("T_Cube_") && name.ends_with(".png"));
        assert_eq!(
            applied.image_id,
            name.trim_end_matches(".png").to_string()
        );
        assert_eq!(fs::read_dir(&textures).unwrap().count(), 1);
    }

    #[test]
    fn test_commit_missing_staged_file_fails() {
        let dir = TempDir::new().unwrap();
        let staged = StagedFile {
            path: dir.path().join("gone.png"),
            object: "Cube".to_string(),
        };
        assert!(commit_texture(&staged, &dir.path().join("textures")).is_err());
    }

    #[test]
    fn test_discard_removes_file() {
        let dir = TempDir::new().unwrap();
        let staged = staged_fixture(dir.path(), "T_Cube_20260823_120000.png", "Cube");
        discard_staged(&staged.path).unwrap();
        assert!(!staged.path.exists());
    }

    #[test]
    fn test_discard_missing_file_is_noop() {
        let missing = PathBuf::from("/nonexistent/T_Cube.png");
        assert!(discard_staged(&missing).is_ok());
    }
}
