//! Service layer for the ingestion pipeline.
//!
//! Keeps the filesystem steps (claim, commit, discard) and the scheduler
//! guard separate from the operator surface for better testability.

pub mod commit_service;
pub mod refresh_service;
pub mod scan_service;

pub use commit_service::{commit_texture, discard_staged};
pub use refresh_service::RefreshScheduler;
pub use scan_service::{StagedFile, scan_watch_folder};
