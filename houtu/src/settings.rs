use std::{fs, path::Path};

use bevy::{math::DVec3, prelude::Resource};
use houtu_scene::{
    Ellipsoid, GeographicProjection, MapProjection, SceneMode, SceneOptions,
    WebMercatorProjection,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read transitioner settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid transitioner settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("default morph duration must be a non-negative number of seconds, got {0}")]
    InvalidDuration(f64),
    #[error("drawing buffer must be at least 1x1, got {width}x{height}")]
    EmptyDrawingBuffer { width: u32, height: u32 },
    #[error("ellipsoid radii must be positive, got {0:?}")]
    InvalidEllipsoid([f64; 3]),
    #[error("a scene cannot start in the morphing mode")]
    MorphingInitialMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapProjectionKind {
    #[default]
    Geographic,
    WebMercator,
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionerSettings {
    pub initial_mode: SceneMode,
    /// Seconds, used by requests that do not carry their own duration.
    pub default_duration: f64,
    pub complete_morph_on_user_input: bool,
    pub map_projection: MapProjectionKind,
    pub ellipsoid_radii: [f64; 3],
    pub drawing_buffer_width: u32,
    pub drawing_buffer_height: u32,
}

impl Default for TransitionerSettings {
    fn default() -> Self {
        let radii = Ellipsoid::WGS84.radii;
        Self {
            initial_mode: SceneMode::Scene3D,
            default_duration: 2.0,
            complete_morph_on_user_input: true,
            map_projection: MapProjectionKind::Geographic,
            ellipsoid_radii: [radii.x, radii.y, radii.z],
            drawing_buffer_width: 1024,
            drawing_buffer_height: 768,
        }
    }
}

impl TransitionerSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.default_duration >= 0.0 && self.default_duration.is_finite()) {
            return Err(SettingsError::InvalidDuration(self.default_duration));
        }
        if self.drawing_buffer_width == 0 || self.drawing_buffer_height == 0 {
            return Err(SettingsError::EmptyDrawingBuffer {
                width: self.drawing_buffer_width,
                height: self.drawing_buffer_height,
            });
        }
        if self.ellipsoid_radii.iter().any(|radius| !(*radius > 0.0)) {
            return Err(SettingsError::InvalidEllipsoid(self.ellipsoid_radii));
        }
        if self.initial_mode == SceneMode::Morphing {
            return Err(SettingsError::MorphingInitialMode);
        }
        Ok(())
    }

    pub fn ellipsoid(&self) -> Ellipsoid {
        Ellipsoid::from_radii(DVec3::from_array(self.ellipsoid_radii))
    }

    pub fn scene_options(&self) -> SceneOptions {
        let ellipsoid = self.ellipsoid();
        let map_projection = match self.map_projection {
            MapProjectionKind::Geographic => {
                MapProjection::from(GeographicProjection::from_ellipsoid(&ellipsoid))
            }
            MapProjectionKind::WebMercator => {
                MapProjection::from(WebMercatorProjection::from_ellipsoid(&ellipsoid))
            }
        };
        SceneOptions {
            mode: self.initial_mode,
            map_projection,
            drawing_buffer_width: self.drawing_buffer_width,
            drawing_buffer_height: self.drawing_buffer_height,
            complete_morph_on_user_input: self.complete_morph_on_user_input,
        }
    }
}
