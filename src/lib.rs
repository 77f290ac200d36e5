//! Watch-folder texture ingestion with a human review gate.
//!
//! Images dropped into a watched folder are claimed one at a time, parked in
//! a review staging area, and committed into the project's texture storage
//! once accepted. Rendering and the timer are host concerns reached through
//! the traits in [`host`]; all state lives in one persisted aggregate.

pub mod app;
pub mod config;
pub mod error;
pub mod file_utils;
pub mod host;
pub mod project;
pub mod services;
pub mod state;

pub use app::{App, WatchPrefs};
pub use error::{AppError, Result};
pub use host::{AppliedTexture, ManualTimer, NullRenderHost, RenderHost, TimerPort};
pub use project::ProjectPaths;
pub use state::{ProjectState, StateStore};
