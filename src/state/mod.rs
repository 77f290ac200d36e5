//! State management for the texture inbox.
//!
//! `ProjectState` is the single mutable aggregate the whole core operates on.
//! It is persisted wholesale as one JSON document per project (see
//! [`store::StateStore`]) and mutated only from the host's cooperative thread.

use crate::config::{DEFAULT_REFRESH_INTERVAL, MAX_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub mod store;

pub use store::StateStore;

/// Per-object display state: whether the baseline look or the last imported
/// texture is shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectState {
    pub use_default_texture: bool,
}

impl Default for ObjectState {
    fn default() -> Self {
        Self {
            use_default_texture: true,
        }
    }
}

/// Per-object settings, including the externally resolved asset ids used by
/// the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectSettings {
    pub use_default_texture: bool,
    pub default_texture: Option<String>,
    pub alpha_texture: Option<String>,
}

impl Default for ObjectSettings {
    fn default() -> Self {
        Self {
            use_default_texture: true,
            default_texture: None,
            alpha_texture: None,
        }
    }
}

/// The persisted root aggregate.
///
/// Every field carries a serde default so partially formed documents load
/// cleanly; unknown keys are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectState {
    /// Registered object names, insertion order = display order, unique.
    pub objects: Vec<String>,
    /// Currently selected object; must name a registered object or be absent.
    pub selected_object: Option<String>,
    pub auto_refresh: bool,
    /// Poll interval in seconds, clamped to [1, 60].
    pub refresh_interval: u32,
    /// True while exactly one staged image awaits accept/discard.
    pub review_pending: bool,
    /// Staging path of the pending image; empty when idle.
    pub review_image_path: String,
    pub object_states: BTreeMap<String, ObjectState>,
    pub object_settings: BTreeMap<String, ObjectSettings>,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            selected_object: None,
            auto_refresh: false,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            review_pending: false,
            review_image_path: String::new(),
            object_states: BTreeMap::new(),
            object_settings: BTreeMap::new(),
        }
    }
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repairs invariants after loading a document from disk.
    ///
    /// Clamps the interval, drops a selection that no longer names a
    /// registered object, clears a pending flag without a path, and backfills
    /// a state entry for every registered object. Orphan map keys are left
    /// alone.
    pub fn normalize(&mut self) {
        self.refresh_interval = self
            .refresh_interval
            .clamp(MIN_REFRESH_INTERVAL, MAX_REFRESH_INTERVAL);

        let selection_stale = self
            .selected_object
            .as_ref()
            .is_some_and(|s| !self.objects.iter().any(|o| o == s));
        if selection_stale {
            self.selected_object = None;
        }

        if self.review_pending && self.review_image_path.is_empty() {
            self.review_pending = false;
        }

        for name in &self.objects {
            let settings = self.object_settings.entry(name.clone()).or_default();
            self.object_states
                .entry(name.clone())
                .or_insert_with(|| ObjectState {
                    use_default_texture: settings.use_default_texture,
                });
        }
    }

    pub fn contains_object(&self, name: &str) -> bool {
        self.objects.iter().any(|o| o == name)
    }

    /// Registers an object. Returns false if the name is already present.
    pub fn add_object(&mut self, name: &str) -> bool {
        if self.contains_object(name) {
            return false;
        }
        self.objects.push(name.to_string());
        self.object_states.insert(name.to_string(), ObjectState::default());
        self.object_settings
            .insert(name.to_string(), ObjectSettings::default());
        true
    }

    /// Removes an object and all its entries. Returns false if unknown.
    pub fn remove_object(&mut self, name: &str) -> bool {
        let Some(pos) = self.objects.iter().position(|o| o == name) else {
            return false;
        };
        self.objects.remove(pos);
        if self.selected_object.as_deref() == Some(name) {
            self.selected_object = None;
        }
        self.object_states.remove(name);
        self.object_settings.remove(name);
        true
    }

    /// Selects an object. Returns false if the name is not registered.
    pub fn select_object(&mut self, name: &str) -> bool {
        if !self.contains_object(name) {
            return false;
        }
        self.selected_object = Some(name.to_string());
        true
    }

    pub fn selected_object(&self) -> Option<&str> {
        self.selected_object.as_deref()
    }

    pub fn use_default_texture(&self, name: &str) -> bool {
        self.object_states
            .get(name)
            .map(|s| s.use_default_texture)
            .unwrap_or(true)
    }

    /// Flips an object between its baseline look and the imported texture.
    /// Returns false if the object is not registered.
    pub fn set_use_default_texture(&mut self, name: &str, use_default: bool) -> bool {
        if !self.contains_object(name) {
            return false;
        }
        self.object_states.entry(name.to_string()).or_default().use_default_texture =
            use_default;
        self.object_settings
            .entry(name.to_string())
            .or_default()
            .use_default_texture = use_default;
        true
    }

    pub fn set_default_texture(&mut self, name: &str, asset: Option<String>) -> bool {
        if !self.contains_object(name) {
            return false;
        }
        self.object_settings.entry(name.to_string()).or_default().default_texture = asset;
        true
    }

    pub fn set_alpha_texture(&mut self, name: &str, asset: Option<String>) -> bool {
        if !self.contains_object(name) {
            return false;
        }
        self.object_settings.entry(name.to_string()).or_default().alpha_texture = asset;
        true
    }

    /// Sets the poll interval, clamped to the documented bounds.
    pub fn set_refresh_interval(&mut self, seconds: u32) {
        self.refresh_interval = seconds.clamp(MIN_REFRESH_INTERVAL, MAX_REFRESH_INTERVAL);
    }

    /// Marks a staged file as the single outstanding review candidate.
    pub fn set_review_candidate(&mut self, path: &Path) {
        self.review_pending = true;
        self.review_image_path = path.to_string_lossy().into_owned();
    }

    /// Clears the review gate back to idle.
    pub fn clear_review_candidate(&mut self) {
        self.review_pending = false;
        self.review_image_path.clear();
    }

    /// Staging path of the pending candidate, when the gate is pending.
    pub fn review_candidate_path(&self) -> Option<PathBuf> {
        if self.review_pending && !self.review_image_path.is_empty() {
            Some(PathBuf::from(&self.review_image_path))
        } else {
            None
        }
    }
}
