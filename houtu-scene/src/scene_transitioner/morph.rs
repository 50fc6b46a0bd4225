//! Tween payloads of a morph and how each one moves the camera.
use bevy::math::DVec3;

use super::adapters::coupled_height;
use crate::{camera::CameraPose, math::lerp, scene::Scene};

/// Which camera coordinate carries the height during a projection-shape
/// phase. The 3D to 2D route runs its final phase in world space, where the
/// map's height axis is `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightAxis {
    X,
    Z,
}

/// Direction and up interpolated alongside a projection-shape phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reorientation {
    pub start_direction: DVec3,
    pub start_up: DVec3,
    pub end_direction: DVec3,
    pub end_up: DVec3,
}

/// A field of view animation coupled to the camera height so that the
/// visible extent stays constant: `height = distance / tan(fov / 2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeMorph {
    pub start_fov: f64,
    pub end_fov: f64,
    pub distance: f64,
    pub height_axis: HeightAxis,
    pub reorientation: Option<Reorientation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MorphAnimation {
    /// Camera position, direction and up between two poses.
    Pose { start: CameraPose, end: CameraPose },
    PerspectiveToOrthographic(ShapeMorph),
    OrthographicToPerspective(ShapeMorph),
    /// The tween value is written to the scene's morph time.
    MorphTime,
}

/// What happens when a phase's driving tween completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MorphContinuation {
    Finish,
    /// Start the perspective to orthographic phase of a 3D to 2D morph.
    PerspectiveToOrthographic {
        duration: f64,
        height_axis: HeightAxis,
    },
    /// Start the pose phase of a 2D to 3D morph.
    ColumbusViewTo3D { duration: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MorphTween {
    pub animation: MorphAnimation,
    pub on_complete: Option<MorphContinuation>,
}

impl MorphTween {
    pub fn new(animation: MorphAnimation) -> Self {
        Self {
            animation,
            on_complete: None,
        }
    }
    pub fn then(mut self, continuation: MorphContinuation) -> Self {
        self.on_complete = Some(continuation);
        self
    }
}

/// Orthonormal `(direction, up, right)` closest to the given direction and
/// up, or `None` when they are degenerate.
pub fn orthonormalize(direction: DVec3, up: DVec3) -> Option<(DVec3, DVec3, DVec3)> {
    let direction = direction.try_normalize()?;
    let right = direction.cross(up).try_normalize()?;
    let up = right.cross(direction);
    Some((direction, up, right))
}

/// Linear interpolation of every pose component, with direction and up
/// re-orthonormalized. Degenerate intermediate orientations keep the
/// start orientation.
pub fn interpolate_pose(start: &CameraPose, end: &CameraPose, time: f64) -> CameraPose {
    let position = start.position.lerp(end.position, time);
    match orthonormalize(
        start.direction.lerp(end.direction, time),
        start.up.lerp(end.up, time),
    ) {
        Some((direction, up, _)) => CameraPose::new(position, direction, up),
        None => CameraPose::new(position, start.direction, start.up),
    }
}

/// Field of view and camera height of a shape phase at `time`.
pub fn interpolate_shape(shape: &ShapeMorph, time: f64) -> (f64, f64) {
    let fov = lerp(shape.start_fov, shape.end_fov, time);
    (fov, coupled_height(shape.distance, fov))
}

pub(crate) fn apply(animation: &MorphAnimation, scene: &mut Scene, value: f64) {
    match animation {
        MorphAnimation::Pose { start, end } => {
            let pose = interpolate_pose(start, end, value);
            scene.camera.set_pose(&pose);
        }
        MorphAnimation::PerspectiveToOrthographic(shape)
        | MorphAnimation::OrthographicToPerspective(shape) => {
            let camera = &mut scene.camera;
            let (fov, height) = interpolate_shape(shape, value);
            if let Some(frustum) = camera.frustum.as_perspective_mut() {
                frustum.fov = fov;
            }
            match shape.height_axis {
                HeightAxis::X => camera.position.x = height,
                HeightAxis::Z => camera.position.z = height,
            }
            if let Some(r) = &shape.reorientation {
                if let Some((direction, up, right)) = orthonormalize(
                    r.start_direction.lerp(r.end_direction, value),
                    r.start_up.lerp(r.end_up, value),
                ) {
                    camera.direction = direction;
                    camera.up = up;
                    camera.right = right;
                }
            }
        }
        MorphAnimation::MorphTime => scene.morph_time = value,
    }
}
