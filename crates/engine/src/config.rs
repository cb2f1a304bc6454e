use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::EngineError;

/// Engine tunables. Every field has a default, so a config file only needs the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on a frame's delta time in seconds. Keeps a long stall
    /// (backgrounded window, debugger) from turning into one huge step.
    pub max_frame_dt: f32,
    pub load_timeout_secs: f64,
    pub camera: CameraConfig,
    /// Initial viewport size; the host reports changes through `Engine::resize`.
    pub viewport: Viewport,
    /// Base volume applied to every sound cue.
    pub sound_volume: f32,
    /// Number of frames averaged for the FPS readout.
    pub fps_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: 1.0 / 20.0,
            load_timeout_secs: 30.0,
            camera: CameraConfig::default(),
            viewport: Viewport::default(),
            sound_volume: 0.3,
            fps_window: 60,
        }
    }
}

impl EngineConfig {
    /// Loading deadline. Negative or NaN values mean no wait at all; values
    /// too large for a `Duration` mean wait indefinitely.
    pub fn load_timeout(&self) -> Duration {
        let secs = self.load_timeout_secs;
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        Ok(config)
    }
}

/// Perspective camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Size of the render surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * 0.5
    }
}
