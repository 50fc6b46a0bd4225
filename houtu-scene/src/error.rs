use bevy::math::DVec3;
use thiserror::Error;

use crate::{frustum::FrustumKind, scene_mode::SceneMode};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    /// The camera sits too close to the ellipsoid's center to be projected
    /// onto its surface.
    #[error("no geodetic surface point for camera position {0}")]
    NoGeodeticSurface(DVec3),
    #[error("camera in {mode} needs a {expected} frustum, found {found}")]
    FrustumMismatch {
        mode: SceneMode,
        expected: FrustumKind,
        found: FrustumKind,
    },
}
