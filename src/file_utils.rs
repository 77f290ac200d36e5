//! File name helpers shared by the scanner and the commit step.

use crate::config::{SUPPORTED_IMAGE_EXTENSIONS, TEXTURE_PREFIX, TIMESTAMP_FORMAT};
use chrono::Local;
use std::path::Path;

/// Returns true if the path has a supported image extension (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_str.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Current timestamp in the texture-naming format (second resolution).
pub fn texture_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Builds the unique image id for an object, e.g. `T_Cube_20260823_141502`.
pub fn texture_image_id(object: &str, timestamp: &str) -> String {
    format!("{}{}_{}", TEXTURE_PREFIX, object, timestamp)
}

/// Builds a texture file name from an object name, a timestamp and the
/// original file's extension, e.g. `T_Cube_20260823_141502.png`.
pub fn texture_file_name(object: &str, timestamp: &str, source: &Path) -> String {
    let id = texture_image_id(object, timestamp);
    match source.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_supported_extensions_case_insensitive() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("b.JPG")));
        assert!(is_supported_image(Path::new("c.TiFf")));
        assert!(!is_supported_image(Path::new("d.gif")));
        assert!(!is_supported_image(Path::new("e.txt")));
        assert!(!is_supported_image(Path::new("noext")));
    }

    #[test]
    fn test_texture_file_name_keeps_extension() {
        let name = texture_file_name("Cube", "20260823_141502", &PathBuf::from("art1.png"));
        assert_eq!(name, "T_Cube_20260823_141502.png");
    }

    #[test]
    fn test_texture_image_id_format() {
        assert_eq!(
            texture_image_id("Sphere", "20260823_141502"),
            "T_Sphere_20260823_141502"
        );
    }
}
