//! Ports to the host application.
//!
//! The rendering layer and the timer are external collaborators: the core
//! drives them through these traits and never inspects what sits behind them.

use std::path::PathBuf;
use std::time::Duration;

/// Handle for a texture committed into permanent storage.
///
/// `image_id` is unique per commit, so a host holding a reference to a
/// previously applied image never has it mutated underfoot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTexture {
    pub image_id: String,
    pub path: PathBuf,
    pub object: String,
}

/// Rendering collaborator: material wiring and the image-asset registry.
pub trait RenderHost {
    /// Sets up the material for a newly registered object.
    fn init_material(&mut self, object: &str);

    /// Binds a freshly committed texture to the object's material.
    fn apply_texture(&mut self, object: &str, texture: &AppliedTexture);

    /// Switches the object between its baseline look and the imported texture.
    fn set_material_mode(&mut self, object: &str, use_default: bool);

    /// Drops the imported texture and restores the baseline look.
    fn reset_material(&mut self, object: &str);

    /// Reloads every imported image from disk.
    fn reload_images(&mut self);
}

/// Host rendering stub for headless operation.
pub struct NullRenderHost;

impl RenderHost for NullRenderHost {
    fn init_material(&mut self, object: &str) {
        log::debug!("init material for {}", object);
    }

    fn apply_texture(&mut self, object: &str, texture: &AppliedTexture) {
        log::debug!("apply {} to {}", texture.image_id, object);
    }

    fn set_material_mode(&mut self, object: &str, use_default: bool) {
        log::debug!("set {} use_default={}", object, use_default);
    }

    fn reset_material(&mut self, object: &str) {
        log::debug!("reset material for {}", object);
    }

    fn reload_images(&mut self) {
        log::debug!("reload all images");
    }
}

/// The host's cooperative timer primitive.
///
/// `arm` schedules a single future invocation of the refresh tick; the core
/// re-arms by returning the next interval from the tick itself. Double-arm
/// protection is the core's job, not the timer's.
pub trait TimerPort {
    fn arm(&mut self, interval: Duration);
    fn disarm(&mut self);
}

/// Timer stub for hosts that drive ticks themselves (tests, the CLI loop).
#[derive(Debug, Default)]
pub struct ManualTimer {
    pub armed_with: Option<Duration>,
}

impl TimerPort for ManualTimer {
    fn arm(&mut self, interval: Duration) {
        self.armed_with = Some(interval);
    }

    fn disarm(&mut self) {
        self.armed_with = None;
    }
}
