//! The mutable view state a [`SceneTransitioner`](crate::SceneTransitioner)
//! animates.
use bevy::{math::DVec3, prelude::Resource};

use crate::{
    camera::{Camera, CameraPose},
    ellipsoid::Ellipsoid,
    event::Event,
    frustum::Frustum,
    math::RADIANS_PER_DEGREE,
    orthographic_frustum::OrthographicFrustum,
    perspective_frustum::PerspectiveFrustum,
    projection::{MapProjection, Projection},
    scene_mode::SceneMode,
    scene_transitioner::{MorphComplete, MorphStart, MorphTween},
    tween::TweenCollection,
};

/// Field of view of the perspective frusta used in 3D and Columbus View.
pub const DEFAULT_FOV: f64 = 60.0 * RADIANS_PER_DEGREE;

#[derive(Debug, Clone)]
pub struct SceneOptions {
    pub mode: SceneMode,
    pub map_projection: MapProjection,
    pub drawing_buffer_width: u32,
    pub drawing_buffer_height: u32,
    pub complete_morph_on_user_input: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            mode: SceneMode::Scene3D,
            map_projection: MapProjection::default(),
            drawing_buffer_width: 1024,
            drawing_buffer_height: 768,
            complete_morph_on_user_input: true,
        }
    }
}

#[derive(Resource, Debug)]
pub struct Scene {
    mode: SceneMode,
    /// 0.0 in 2D and Columbus View, 1.0 in 3D, in between while morphing.
    pub morph_time: f64,
    pub camera: Camera,
    pub tweens: TweenCollection<MorphTween>,
    pub map_projection: MapProjection,
    pub drawing_buffer_width: u32,
    pub drawing_buffer_height: u32,
    pub complete_morph_on_user_input: bool,
    pub morph_start: Event<MorphStart>,
    pub morph_complete: Event<MorphComplete>,
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new(SceneOptions::default())
    }
}

impl Scene {
    pub fn new(options: SceneOptions) -> Self {
        let mode = match options.mode {
            SceneMode::Morphing => SceneMode::Scene3D,
            mode => mode,
        };
        let camera = Self::default_camera(
            mode,
            &options.map_projection,
            options.drawing_buffer_width,
            options.drawing_buffer_height,
        );
        Self {
            mode,
            morph_time: SceneMode::morph_time(mode).unwrap_or(1.0),
            camera,
            tweens: TweenCollection::default(),
            map_projection: options.map_projection,
            drawing_buffer_width: options.drawing_buffer_width,
            drawing_buffer_height: options.drawing_buffer_height,
            complete_morph_on_user_input: options.complete_morph_on_user_input,
            morph_start: Event::new(),
            morph_complete: Event::new(),
        }
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: SceneMode) {
        self.mode = mode;
    }

    pub fn drawing_buffer_aspect_ratio(&self) -> f64 {
        f64::from(self.drawing_buffer_width) / f64::from(self.drawing_buffer_height.max(1))
    }

    /// The perspective frustum 3D and Columbus View use at rest.
    pub fn default_perspective_frustum(&self) -> PerspectiveFrustum {
        PerspectiveFrustum {
            fov: DEFAULT_FOV,
            aspect_ratio: self.drawing_buffer_aspect_ratio(),
            ..Default::default()
        }
    }

    /// The camera a scene starts with in `mode`: looking at the globe from
    /// three radii out in 3D, or straight down over the map's center with the
    /// whole map in view otherwise.
    pub fn default_camera(
        mode: SceneMode,
        map_projection: &MapProjection,
        drawing_buffer_width: u32,
        drawing_buffer_height: u32,
    ) -> Camera {
        let ellipsoid: &Ellipsoid = map_projection.ellipsoid();
        let height = ellipsoid.maximum_radius() * 3.0;
        let aspect_ratio =
            f64::from(drawing_buffer_width) / f64::from(drawing_buffer_height.max(1));
        let perspective = PerspectiveFrustum {
            fov: DEFAULT_FOV,
            aspect_ratio,
            ..Default::default()
        };
        match mode {
            SceneMode::Scene2D => {
                let half_width = ellipsoid.maximum_radius() * std::f64::consts::PI;
                Camera::new(
                    CameraPose::looking_down(DVec3::new(0.0, 0.0, half_width * 2.0)),
                    Frustum::Orthographic(OrthographicFrustum::from_half_width(
                        half_width,
                        drawing_buffer_width,
                        drawing_buffer_height.max(1),
                    )),
                )
            }
            SceneMode::ColumbusView => Camera::new(
                CameraPose::looking_down(DVec3::new(0.0, 0.0, height)),
                Frustum::Perspective(perspective),
            ),
            SceneMode::Scene3D | SceneMode::Morphing => {
                let mut camera = Camera::default();
                camera.frustum = Frustum::Perspective(perspective);
                camera
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_rests_in_mode() {
        let scene = Scene::new(SceneOptions {
            mode: SceneMode::Scene2D,
            ..Default::default()
        });
        assert_eq!(scene.mode(), SceneMode::Scene2D);
        assert_eq!(scene.morph_time, 0.0);
        assert!(scene.camera.frustum.as_orthographic().is_some());
        assert_eq!(scene.camera.direction, DVec3::NEG_Z);

        let scene = Scene::default();
        assert_eq!(scene.mode(), SceneMode::Scene3D);
        assert_eq!(scene.morph_time, 1.0);
        let frustum = scene.camera.frustum.as_perspective().unwrap();
        assert_eq!(frustum.fov, DEFAULT_FOV);
        assert_eq!(frustum.aspect_ratio, 1024.0 / 768.0);
    }

    #[test]
    fn morphing_is_not_a_resting_mode() {
        let scene = Scene::new(SceneOptions {
            mode: SceneMode::Morphing,
            ..Default::default()
        });
        assert_eq!(scene.mode(), SceneMode::Scene3D);
    }

    #[test]
    fn columbus_view_camera_is_perspective() {
        let scene = Scene::new(SceneOptions {
            mode: SceneMode::ColumbusView,
            ..Default::default()
        });
        assert_eq!(scene.morph_time, 0.0);
        assert!(scene.camera.frustum.as_perspective().is_some());
        assert!(scene.camera.position.z > 0.0);
    }
}
