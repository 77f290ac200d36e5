//! Operator surface of the texture inbox.
//!
//! One method per host operator. Every method is a single state transition
//! executed to completion on the host's cooperative thread and followed by a
//! synchronous save of the whole state document. No operator is fatal:
//! filesystem and persistence failures are logged and contained.

use crate::host::{AppliedTexture, RenderHost, TimerPort};
use crate::services::{RefreshScheduler, StagedFile, commit_texture, discard_staged, scan_watch_folder};
use crate::state::{ProjectState, StateStore};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

/// Watch-folder preferences. Host-owned configuration, not part of the
/// persisted project document.
#[derive(Debug, Clone, Default)]
pub struct WatchPrefs {
    pub folder: Option<PathBuf>,
    pub enabled: bool,
}

/// The core controller: owns the state aggregate, the persistence port and
/// the host ports.
pub struct App<R: RenderHost, T: TimerPort> {
    state: ProjectState,
    store: StateStore,
    prefs: WatchPrefs,
    scheduler: RefreshScheduler,
    render: R,
    timer: T,
    /// Object the pending candidate was staged for. Not part of the wire
    /// schema; after a restart it falls back to the persisted selection.
    review_owner: Option<String>,
}

impl<R: RenderHost, T: TimerPort> App<R, T> {
    /// Loads persisted state and arms the refresh timer if it was enabled.
    pub fn new(store: StateStore, prefs: WatchPrefs, render: R, timer: T) -> Self {
        let state = store.load();
        let review_owner = if state.review_pending {
            state.selected_object().map(str::to_string)
        } else {
            None
        };

        let mut app = Self {
            state,
            store,
            prefs,
            scheduler: RefreshScheduler::new(),
            render,
            timer,
            review_owner,
        };
        app.sync_timer();
        app
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn prefs(&self) -> &WatchPrefs {
        &self.prefs
    }

    pub fn render_host(&mut self) -> &mut R {
        &mut self.render
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn is_review_pending(&self) -> bool {
        self.state.review_pending
    }

    /// Pending candidate as (staging path, owning object), if any.
    pub fn review_candidate(&self) -> Option<(PathBuf, Option<&str>)> {
        self.state
            .review_candidate_path()
            .map(|path| (path, self.review_owner.as_deref()))
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state) {
            warn!("failed to persist state: {}", e);
        }
    }

    /// Registers an object and sets up its material. Returns false when the
    /// name is already in the list.
    pub fn add_object(&mut self, name: &str) -> bool {
        if !self.state.add_object(name) {
            return false;
        }
        self.render.init_material(name);
        self.persist();
        true
    }

    /// Unregisters an object, clearing the selection if it pointed at it.
    pub fn remove_object(&mut self, name: &str) -> bool {
        if !self.state.remove_object(name) {
            return false;
        }
        self.render.reset_material(name);
        self.persist();
        true
    }

    pub fn select_object(&mut self, name: &str) -> bool {
        if !self.state.select_object(name) {
            return false;
        }
        self.persist();
        true
    }

    /// Switches an object between its baseline look and the imported texture.
    pub fn toggle_object_texture(&mut self, name: &str, use_default: bool) -> bool {
        if !self.state.set_use_default_texture(name, use_default) {
            return false;
        }
        self.render.set_material_mode(name, use_default);
        self.persist();
        true
    }

    pub fn set_default_texture(&mut self, name: &str, asset: Option<String>) -> bool {
        if !self.state.set_default_texture(name, asset) {
            return false;
        }
        self.render.init_material(name);
        self.persist();
        true
    }

    pub fn set_alpha_texture(&mut self, name: &str, asset: Option<String>) -> bool {
        if !self.state.set_alpha_texture(name, asset) {
            return false;
        }
        self.render.init_material(name);
        self.persist();
        true
    }

    pub fn set_watch_folder(&mut self, folder: Option<PathBuf>) {
        self.prefs.folder = folder;
    }

    pub fn set_watch_folder_enabled(&mut self, enabled: bool) {
        self.prefs.enabled = enabled;
        self.sync_timer();
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.state.auto_refresh = enabled;
        self.persist();
        self.sync_timer();
    }

    /// Sets the poll interval (clamped to 1..=60). An armed timer picks the
    /// new value up on its next fire, never mid-cycle.
    pub fn set_refresh_interval(&mut self, seconds: u32) {
        self.state.set_refresh_interval(seconds);
        self.persist();
    }

    /// Arms or disarms the host timer to match the enable flags. The armed
    /// guard makes a second arm while a poller is outstanding a no-op.
    fn sync_timer(&mut self) {
        if self.state.auto_refresh && self.prefs.enabled {
            if self.scheduler.try_arm() {
                self.timer.arm(self.refresh_interval());
            }
        } else if self.scheduler.disarm() {
            self.timer.disarm();
        }
    }

    fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.state.refresh_interval))
    }

    /// Timer callback. Scans once, reloads imported images while the gate is
    /// idle, and returns the interval for the next fire. Returns `None` and
    /// drops the armed flag when either enable flag went off, after which an
    /// enable transition must re-arm explicitly.
    pub fn on_refresh_tick(&mut self) -> Option<Duration> {
        if !(self.state.auto_refresh && self.prefs.enabled) {
            self.scheduler.disarm();
            return None;
        }

        self.poll_watch_folder();
        if !self.state.review_pending {
            self.render.reload_images();
        }
        Some(self.refresh_interval())
    }

    /// Manual refresh operator: one scan, then a bulk reload unless a review
    /// is (or just became) pending.
    pub fn refresh(&mut self) {
        self.poll_watch_folder();
        if !self.state.review_pending {
            self.render.reload_images();
        }
    }

    /// Runs one scan of the watch folder, staging at most one candidate.
    ///
    /// Skipped entirely while a review is pending, when no watch folder or
    /// object selection exists, or when the project has no fixed location.
    /// In all skip cases the watch folder is left untouched.
    fn poll_watch_folder(&mut self) {
        if self.state.review_pending {
            return;
        }
        let Some(folder) = self.prefs.folder.clone() else {
            return;
        };
        let Some(selected) = self.state.selected_object().map(str::to_string) else {
            return;
        };
        let Some(review_dir) = self.store.paths().review_dir() else {
            return;
        };

        match scan_watch_folder(&folder, &selected, &review_dir) {
            Ok(Some(staged)) => {
                info!("staged {} for review", staged.path.display());
                self.state.set_review_candidate(&staged.path);
                self.review_owner = Some(staged.object);
                self.persist();
            }
            Ok(None) => {}
            Err(e) => warn!("watch folder scan failed: {}", e),
        }
    }

    /// Accepts the pending candidate: commits it into permanent storage and
    /// binds it to its owning object.
    ///
    /// A safe no-op returning `None` when the gate is idle, when the owning
    /// object is no longer registered (the candidate stays pending so it can
    /// still be discarded), or when the commit move fails.
    pub fn accept(&mut self) -> Option<AppliedTexture> {
        let staged_path = self.state.review_candidate_path()?;
        let Some(owner) = self.review_owner.clone() else {
            warn!("pending candidate has no owning object, leaving for discard");
            return None;
        };
        if !self.state.contains_object(&owner) {
            warn!("object {} no longer registered, leaving candidate pending", owner);
            return None;
        }
        let Some(textures_dir) = self.store.paths().textures_dir() else {
            warn!("project has no fixed location, cannot commit");
            return None;
        };

        let staged = StagedFile {
            path: staged_path,
            object: owner.clone(),
        };
        let applied = match commit_texture(&staged, &textures_dir) {
            Ok(applied) => applied,
            Err(e) => {
                warn!("commit failed: {}", e);
                return None;
            }
        };

        self.state.set_use_default_texture(&owner, false);
        self.render.apply_texture(&owner, &applied);
        self.state.clear_review_candidate();
        self.review_owner = None;
        self.persist();
        Some(applied)
    }

    /// Discards the pending candidate, deleting its staged file. A safe
    /// no-op returning false when the gate is idle.
    pub fn discard(&mut self) -> bool {
        let Some(staged_path) = self.state.review_candidate_path() else {
            return false;
        };
        if let Err(e) = discard_staged(&staged_path) {
            warn!("failed to delete staged file: {}", e);
        }
        self.state.clear_review_candidate();
        self.review_owner = None;
        self.persist();
        true
    }

    /// Restores an object's baseline look.
    pub fn reset_texture(&mut self, name: &str) -> bool {
        if !self.state.set_use_default_texture(name, true) {
            return false;
        }
        self.render.reset_material(name);
        self.persist();
        true
    }

    /// Restores the baseline look of every registered object.
    pub fn reset_all_textures(&mut self) {
        let names: Vec<String> = self.state.objects.clone();
        for name in &names {
            self.state.set_use_default_texture(name, true);
            self.render.reset_material(name);
        }
        self.persist();
    }

    /// Re-reads the state document from disk, replacing in-memory state.
    pub fn reload_state(&mut self) {
        self.state = self.store.load();
        self.review_owner = if self.state.review_pending {
            self.state.selected_object().map(str::to_string)
        } else {
            None
        };
        self.sync_timer();
    }

    /// Writes the current state document explicitly.
    pub fn save_state(&mut self) {
        self.persist();
    }
}
