//! Shared configuration constants.

/// Image file extensions accepted from the watch folder.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tga", "bmp", "tiff"];

/// Prefix for staged and committed texture file names and image ids.
pub const TEXTURE_PREFIX: &str = "T_";

/// File name of the per-project state document.
pub const STATE_FILE_NAME: &str = "texture_inbox_state.json";

/// Permanent texture storage, relative to the project root.
pub const TEXTURES_DIR: &str = "textures";

/// Review staging area, relative to the project root.
pub const REVIEW_DIR: &str = "review";

/// Timestamp format used in texture file names and image ids (second resolution).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Bounds and default for the auto-refresh interval, in seconds.
pub const MIN_REFRESH_INTERVAL: u32 = 1;
pub const MAX_REFRESH_INTERVAL: u32 = 60;
pub const DEFAULT_REFRESH_INTERVAL: u32 = 5;
