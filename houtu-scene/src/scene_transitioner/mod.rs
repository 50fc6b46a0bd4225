//! Animated transitions of a [`Scene`] between 3D, Columbus View and 2D.
//!
//! A morph is split into phases, each driven by tweens in the scene's
//! [`TweenCollection`](crate::tween::TweenCollection). The transitioner owns
//! the bookkeeping of the morph in flight: which tweens belong to it, the end
//! state to commit and whether user input may cut it short. The scene is
//! borrowed for every operation rather than held.
use std::sync::atomic::{AtomicU32, Ordering};

use bevy::{log::debug, math::DMat4, prelude::Resource};

use crate::{
    camera::{Camera, CameraPose},
    ellipsoid::Ellipsoid,
    error::TransitionError,
    frustum::{Frustum, FrustumKind},
    math::RADIANS_PER_DEGREE,
    orthographic_frustum::OrthographicFrustum,
    perspective_frustum::PerspectiveFrustum,
    scene::{Scene, DEFAULT_FOV},
    scene_mode::SceneMode,
    tween::{EaseFunction, TweenId, TweenOptions},
};

pub mod adapters;
mod morph;

pub use morph::{
    interpolate_pose, interpolate_shape, orthonormalize, HeightAxis, MorphAnimation,
    MorphContinuation, MorphTween, Reorientation, ShapeMorph,
};

/// Field of view standing in for an orthographic projection at the
/// perspective end of a projection-shape phase.
pub const ORTHOGRAPHIC_FOV: f64 = 0.5 * RADIANS_PER_DEGREE;
/// Added to the far plane while a tiny field of view pushes the camera out.
pub const FAR_PLANE_PADDING: f64 = 10_000_000.0;

static NEXT_TRANSITIONER_ID: AtomicU32 = AtomicU32::new(0);

/// Identifies the transitioner that raised a morph event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionerId(u32);

/// User input that ends a morph early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphInput {
    LeftDown,
    MiddleDown,
    RightDown,
    Wheel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphStart {
    pub transitioner: TransitionerId,
    pub previous_mode: SceneMode,
    pub target_mode: SceneMode,
    /// User input will complete this morph early.
    pub cancellable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphComplete {
    pub transitioner: TransitionerId,
    pub previous_mode: SceneMode,
    pub target_mode: SceneMode,
    /// The morph was registered for completion on user input, whether it
    /// ran to its end or was cut short.
    pub was_morphing: bool,
}

/// The end state committed when a morph completes.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphTarget {
    pub mode: SceneMode,
    /// In the world frame for 3D, in the map frame otherwise.
    pub pose: CameraPose,
    pub frustum: Frustum,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MorphRoute {
    Scene3DTo2D,
    ColumbusViewTo2D,
    Scene2DToColumbusView { width: f64 },
    Scene3DToColumbusView,
    Scene2DTo3D { width: f64 },
    ColumbusViewTo3D,
}

#[derive(Debug)]
struct ActiveMorph {
    /// Scene state before the morph, restored if it is abandoned.
    origin: MorphTarget,
    target: MorphTarget,
    tweens: Vec<TweenId>,
    cancelled: bool,
    complete_on_input: bool,
}

#[derive(Resource, Debug)]
pub struct SceneTransitioner {
    id: TransitionerId,
    previous_mode: SceneMode,
    active: Option<ActiveMorph>,
}

impl SceneTransitioner {
    pub fn new(scene: &Scene) -> Self {
        Self {
            id: TransitionerId(NEXT_TRANSITIONER_ID.fetch_add(1, Ordering::Relaxed)),
            previous_mode: scene.mode(),
            active: None,
        }
    }

    pub fn id(&self) -> TransitionerId {
        self.id
    }

    /// Mode the scene was in when the latest morph was requested.
    pub fn previous_mode(&self) -> SceneMode {
        self.previous_mode
    }

    pub fn is_morphing(&self) -> bool {
        self.active.is_some()
    }

    pub fn target(&self) -> Option<&MorphTarget> {
        self.active.as_ref().map(|morph| &morph.target)
    }

    /// Tweens of the morph in flight that have not completed yet.
    pub fn active_tweens(&self) -> &[TweenId] {
        self.active
            .as_ref()
            .map(|morph| morph.tweens.as_slice())
            .unwrap_or_default()
    }

    pub fn morph_to_2d(
        &mut self,
        scene: &mut Scene,
        duration: f64,
        ellipsoid: &Ellipsoid,
    ) -> Result<(), TransitionError> {
        self.morph_to(scene, SceneMode::Scene2D, duration, ellipsoid)
    }

    pub fn morph_to_columbus_view(
        &mut self,
        scene: &mut Scene,
        duration: f64,
        ellipsoid: &Ellipsoid,
    ) -> Result<(), TransitionError> {
        self.morph_to(scene, SceneMode::ColumbusView, duration, ellipsoid)
    }

    pub fn morph_to_3d(
        &mut self,
        scene: &mut Scene,
        duration: f64,
        ellipsoid: &Ellipsoid,
    ) -> Result<(), TransitionError> {
        self.morph_to(scene, SceneMode::Scene3D, duration, ellipsoid)
    }

    /// Starts a morph of `scene` to `mode` over `duration` seconds. A morph
    /// already in flight is completed first. Requests for the current mode
    /// are ignored. A zero duration completes before returning.
    pub fn morph_to(
        &mut self,
        scene: &mut Scene,
        mode: SceneMode,
        duration: f64,
        ellipsoid: &Ellipsoid,
    ) -> Result<(), TransitionError> {
        self.complete_morph(scene);

        let previous_mode = scene.mode();
        self.previous_mode = previous_mode;
        let Some((route, target)) = self.plan(scene, mode, ellipsoid)? else {
            debug!("ignoring morph from {} to {}", previous_mode, mode);
            return Ok(());
        };

        debug!(
            "morphing from {} to {} over {}s",
            previous_mode, mode, duration
        );
        scene.camera.set_transform(DMat4::IDENTITY);
        let origin = MorphTarget {
            mode: previous_mode,
            pose: scene.camera.pose(),
            frustum: scene.camera.frustum.clone(),
        };
        scene.set_mode(SceneMode::Morphing);
        let complete_on_input = scene.complete_morph_on_user_input;
        scene.morph_start.raise_event(&MorphStart {
            transitioner: self.id,
            previous_mode,
            target_mode: mode,
            cancellable: complete_on_input,
        });
        self.active = Some(ActiveMorph {
            origin,
            target,
            tweens: Vec::new(),
            cancelled: false,
            complete_on_input,
        });

        let duration = duration.max(0.0);
        match route {
            MorphRoute::Scene3DTo2D => self.morph_from_3d_to_2d(scene, duration),
            MorphRoute::ColumbusViewTo2D => self.morph_from_columbus_view_to_2d(scene, duration),
            MorphRoute::Scene2DToColumbusView { width } => {
                self.morph_orthographic_to_perspective(
                    scene,
                    duration,
                    width,
                    MorphContinuation::Finish,
                );
            }
            MorphRoute::Scene3DToColumbusView => {
                self.morph_pose(scene, duration, Camera::TRANSFORM_2D, 1.0, 0.0);
            }
            MorphRoute::Scene2DTo3D { width } => {
                let duration = duration * 0.5;
                self.morph_orthographic_to_perspective(
                    scene,
                    duration,
                    width,
                    MorphContinuation::ColumbusViewTo3D { duration },
                );
            }
            MorphRoute::ColumbusViewTo3D => {
                self.morph_pose(scene, duration, Camera::TRANSFORM_2D_INVERSE, 0.0, 1.0);
            }
        }

        if duration == 0.0 {
            self.complete_morph(scene);
        }
        Ok(())
    }

    /// Computes the end state of a morph from the scene's current mode to
    /// `mode` without touching the scene. `None` when there is nothing to
    /// morph: the scene is already in `mode` or in the middle of a morph.
    fn plan(
        &self,
        scene: &Scene,
        mode: SceneMode,
        ellipsoid: &Ellipsoid,
    ) -> Result<Option<(MorphRoute, MorphTarget)>, TransitionError> {
        let camera = &scene.camera;
        let pose = camera.pose_wc();
        let projection = &scene.map_projection;
        let (buffer_width, buffer_height) =
            (scene.drawing_buffer_width, scene.drawing_buffer_height.max(1));
        let current = scene.mode();

        let orthographic_width = || {
            camera
                .frustum
                .as_orthographic()
                .map(OrthographicFrustum::width)
                .ok_or(TransitionError::FrustumMismatch {
                    mode: current,
                    expected: FrustumKind::Orthographic,
                    found: camera.frustum.kind(),
                })
        };
        let perspective = || {
            camera
                .frustum
                .as_perspective()
                .ok_or(TransitionError::FrustumMismatch {
                    mode: current,
                    expected: FrustumKind::Perspective,
                    found: camera.frustum.kind(),
                })
        };

        let planned = match (current, mode) {
            (SceneMode::Scene3D, SceneMode::Scene2D)
            | (SceneMode::ColumbusView, SceneMode::Scene2D) => {
                perspective()?;
                let pose = if current == SceneMode::Scene3D {
                    adapters::scene_2d_from_3d(&pose.position, projection, ellipsoid)?
                } else {
                    CameraPose::looking_down(pose.position)
                };
                let frustum = OrthographicFrustum::from_half_width(
                    pose.position.z * 0.5,
                    buffer_width,
                    buffer_height,
                );
                let route = if current == SceneMode::Scene3D {
                    MorphRoute::Scene3DTo2D
                } else {
                    MorphRoute::ColumbusViewTo2D
                };
                (route, pose, Frustum::Orthographic(frustum))
            }
            (SceneMode::Scene2D, SceneMode::ColumbusView) => {
                let width = orthographic_width()?;
                let pose = CameraPose::looking_down(pose.position.truncate().extend(width));
                (
                    MorphRoute::Scene2DToColumbusView { width },
                    pose,
                    Frustum::Perspective(scene.default_perspective_frustum()),
                )
            }
            (SceneMode::Scene3D, SceneMode::ColumbusView) => (
                MorphRoute::Scene3DToColumbusView,
                adapters::columbus_view_from_3d(&pose, projection, ellipsoid)?,
                Frustum::Perspective(scene.default_perspective_frustum()),
            ),
            (SceneMode::Scene2D, SceneMode::Scene3D) => {
                let width = orthographic_width()?;
                let columbus_view = CameraPose::looking_down(pose.position.truncate().extend(width));
                (
                    MorphRoute::Scene2DTo3D { width },
                    adapters::columbus_view_to_3d(&columbus_view, projection, ellipsoid)?,
                    Frustum::Perspective(scene.default_perspective_frustum()),
                )
            }
            (SceneMode::ColumbusView, SceneMode::Scene3D) => {
                let frustum: PerspectiveFrustum = perspective()?.clone();
                (
                    MorphRoute::ColumbusViewTo3D,
                    adapters::columbus_view_to_3d(&pose, projection, ellipsoid)?,
                    Frustum::Perspective(frustum),
                )
            }
            _ => return Ok(None),
        };

        let (route, pose, frustum) = planned;
        Ok(Some((
            route,
            MorphTarget {
                mode,
                pose,
                frustum,
            },
        )))
    }

    fn track(&mut self, id: TweenId) {
        if let Some(morph) = self.active.as_mut() {
            morph.tweens.push(id);
        }
    }

    fn add_tween(&mut self, scene: &mut Scene, duration: f64, tween: MorphTween) {
        let id = scene.tweens.add(
            TweenOptions::new(duration, tween).with_easing(EaseFunction::QuarticOut),
        );
        self.track(id);
    }

    fn add_morph_time(
        &mut self,
        scene: &mut Scene,
        duration: f64,
        start: f64,
        stop: f64,
        then: MorphContinuation,
    ) {
        let id = scene.tweens.add_property(
            start,
            stop,
            TweenOptions::new(duration, MorphTween::new(MorphAnimation::MorphTime).then(then))
                .with_easing(EaseFunction::QuarticOut),
        );
        self.track(id);
    }

    /// Moves the camera from its pose to the target pose expressed through
    /// `frame`, while morph time runs from `start_time` to `stop_time`.
    fn morph_pose(
        &mut self,
        scene: &mut Scene,
        duration: f64,
        frame: DMat4,
        start_time: f64,
        stop_time: f64,
    ) {
        let Some(target) = self.target() else {
            return;
        };
        let end = target.pose.transformed(&frame);
        let start = scene.camera.pose();
        self.add_tween(
            scene,
            duration,
            MorphTween::new(MorphAnimation::Pose { start, end }),
        );
        self.add_morph_time(
            scene,
            duration,
            start_time,
            stop_time,
            MorphContinuation::Finish,
        );
    }

    fn morph_from_3d_to_2d(&mut self, scene: &mut Scene, duration: f64) {
        let Some(target) = self.target() else {
            return;
        };
        let duration = duration * 0.5;
        let end = target.pose.transformed(&Camera::TRANSFORM_2D);
        let start = scene.camera.pose();
        self.add_tween(
            scene,
            duration,
            MorphTween::new(MorphAnimation::Pose { start, end }),
        );
        self.add_morph_time(
            scene,
            duration,
            1.0,
            0.0,
            MorphContinuation::PerspectiveToOrthographic {
                duration,
                height_axis: HeightAxis::X,
            },
        );
    }

    fn morph_from_columbus_view_to_2d(&mut self, scene: &mut Scene, duration: f64) {
        let Some(target) = self.target() else {
            return;
        };
        let reorientation = Reorientation {
            start_direction: scene.camera.direction,
            start_up: scene.camera.up,
            end_direction: target.pose.direction,
            end_up: target.pose.up,
        };
        self.morph_perspective_to_orthographic(
            scene,
            duration,
            HeightAxis::Z,
            Some(reorientation),
        );
    }

    /// Narrows the field of view while pushing the camera out along
    /// `height_axis`, ending in the orthographic target frustum.
    fn morph_perspective_to_orthographic(
        &mut self,
        scene: &mut Scene,
        duration: f64,
        height_axis: HeightAxis,
        reorientation: Option<Reorientation>,
    ) {
        let Some(target) = self.target() else {
            return;
        };
        let camera = &mut scene.camera;
        let start_fov = camera
            .frustum
            .as_perspective()
            .map_or(DEFAULT_FOV, |frustum| frustum.fov);
        let end_fov = ORTHOGRAPHIC_FOV;
        let distance = adapters::coupling_distance(target.pose.position.z, start_fov);
        if let Some(frustum) = camera.frustum.as_perspective_mut() {
            frustum.far = adapters::coupled_height(distance, end_fov) + FAR_PLANE_PADDING;
        }
        self.add_tween(
            scene,
            duration,
            MorphTween::new(MorphAnimation::PerspectiveToOrthographic(ShapeMorph {
                start_fov,
                end_fov,
                distance,
                height_axis,
                reorientation,
            }))
            .then(MorphContinuation::Finish),
        );
    }

    /// Swaps the orthographic frustum for a nearly orthographic perspective
    /// one and widens it to the target field of view, keeping the visible
    /// width.
    fn morph_orthographic_to_perspective(
        &mut self,
        scene: &mut Scene,
        duration: f64,
        width: f64,
        then: MorphContinuation,
    ) {
        let mut frustum = self
            .target()
            .and_then(|target| target.frustum.as_perspective().cloned())
            .unwrap_or_else(|| scene.default_perspective_frustum());
        let start_fov = ORTHOGRAPHIC_FOV;
        let end_fov = frustum.fov;
        let distance = adapters::coupling_distance(width, end_fov);
        frustum.far = adapters::coupled_height(distance, start_fov) + FAR_PLANE_PADDING;
        frustum.fov = start_fov;
        scene.camera.frustum = Frustum::Perspective(frustum);
        self.add_tween(
            scene,
            duration,
            MorphTween::new(MorphAnimation::OrthographicToPerspective(ShapeMorph {
                start_fov,
                end_fov,
                distance,
                height_axis: HeightAxis::Z,
                reorientation: None,
            }))
            .then(then),
        );
    }

    fn continue_with(&mut self, scene: &mut Scene, continuation: MorphContinuation) {
        debug!("morph phase complete, continuing with {:?}", continuation);
        match continuation {
            MorphContinuation::Finish => self.finish(scene),
            MorphContinuation::PerspectiveToOrthographic {
                duration,
                height_axis,
            } => self.morph_perspective_to_orthographic(scene, duration, height_axis, None),
            MorphContinuation::ColumbusViewTo3D { duration } => {
                self.morph_pose(scene, duration, Camera::TRANSFORM_2D_INVERSE, 0.0, 1.0);
            }
        }
    }

    /// Advances the scene's tweens to `time` (seconds) and applies the ones
    /// belonging to the morph in flight.
    pub fn update(&mut self, scene: &mut Scene, time: f64) {
        for frame in scene.tweens.update(time) {
            let Some(active) = self.active.as_mut() else {
                continue;
            };
            if !active.tweens.contains(&frame.id) {
                continue;
            }
            if frame.complete {
                active.tweens.retain(|id| *id != frame.id);
            }
            morph::apply(&frame.payload.animation, scene, frame.value);
            if frame.complete {
                if let Some(continuation) = frame.payload.on_complete {
                    self.continue_with(scene, continuation);
                }
            }
        }
    }

    /// Ends the morph in flight immediately, committing its end state.
    pub fn complete_morph(&mut self, scene: &mut Scene) {
        if let Some(morph) = self.active.as_mut() {
            morph.cancelled = true;
            self.finish(scene);
        }
    }

    /// Completes the morph in flight if it accepts user input. Returns
    /// whether the input ended a morph.
    pub fn handle_input(&mut self, scene: &mut Scene, input: MorphInput) -> bool {
        let accepts_input = self
            .active
            .as_ref()
            .map_or(false, |morph| morph.complete_on_input);
        if accepts_input {
            debug!("{:?} completes morph", input);
            self.complete_morph(scene);
        }
        accepts_input
    }

    fn finish(&mut self, scene: &mut Scene) {
        let Some(morph) = self.active.take() else {
            return;
        };
        let target = morph.target;

        scene.set_mode(target.mode);
        if let Some(morph_time) = SceneMode::morph_time(target.mode) {
            scene.morph_time = morph_time;
        }
        for id in &morph.tweens {
            scene.tweens.remove(*id);
        }

        let snap = match target.mode {
            // Columbus View always lands exactly on its end pose.
            SceneMode::ColumbusView => true,
            _ => self.previous_mode != SceneMode::Morphing || morph.cancelled,
        };
        if snap {
            scene.camera.set_pose(&target.pose);
        }
        scene.camera.frustum = target.frustum;

        debug!("morph to {} complete", target.mode);
        scene.morph_complete.raise_event(&MorphComplete {
            transitioner: self.id,
            previous_mode: self.previous_mode,
            target_mode: target.mode,
            was_morphing: morph.complete_on_input,
        });
    }

    /// Stops the morph in flight without committing it and detaches from
    /// user input. The scene is rolled back to the mode, camera pose and
    /// frustum it had before the morph, so another transitioner can drive it.
    pub fn destroy(mut self, scene: &mut Scene) {
        let Some(morph) = self.active.take() else {
            return;
        };
        for id in &morph.tweens {
            scene.tweens.remove(*id);
        }
        let origin = morph.origin;
        debug!("morph to {} abandoned, back to {}", morph.target.mode, origin.mode);
        scene.set_mode(origin.mode);
        if let Some(morph_time) = SceneMode::morph_time(origin.mode) {
            scene.morph_time = morph_time;
        }
        scene.camera.set_pose(&origin.pose);
        scene.camera.frustum = origin.frustum;
    }
}
