use bevy::prelude::Event;
use houtu_scene::{MorphComplete, MorphStart, SceneMode};

/// Asks the scene to morph to `mode`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MorphRequest {
    pub mode: SceneMode,
    /// Seconds. Falls back to the configured default duration.
    pub duration: Option<f64>,
}

impl MorphRequest {
    pub fn new(mode: SceneMode) -> Self {
        Self {
            mode,
            duration: None,
        }
    }
    pub fn to_2d() -> Self {
        Self::new(SceneMode::Scene2D)
    }
    pub fn to_columbus_view() -> Self {
        Self::new(SceneMode::ColumbusView)
    }
    pub fn to_3d() -> Self {
        Self::new(SceneMode::Scene3D)
    }
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphStarted(pub MorphStart);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphCompleted(pub MorphComplete);
