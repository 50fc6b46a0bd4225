use bevy::math::{DMat4, DVec3, DVec4};

use crate::{ellipsoid::Ellipsoid, frustum::Frustum, math::*};

/// Position, view direction and up vector of a camera, expressed in one
/// reference frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub direction: DVec3,
    pub up: DVec3,
}

impl CameraPose {
    pub fn new(position: DVec3, direction: DVec3, up: DVec3) -> Self {
        Self {
            position,
            direction,
            up,
        }
    }

    /// The fixed top-down pose used by the 2D mode.
    pub fn looking_down(position: DVec3) -> Self {
        Self::new(position, DVec3::NEG_Z, DVec3::Y)
    }

    pub fn right(&self) -> DVec3 {
        self.direction
            .cross(self.up)
            .try_normalize()
            .unwrap_or(DVec3::ZERO)
    }

    /// Re-expresses the pose through `matrix`: the position as a point,
    /// direction and up as vectors.
    pub fn transformed(&self, matrix: &DMat4) -> Self {
        Self {
            position: matrix.multiply_by_point(&self.position),
            direction: matrix.multiply_by_point_as_vector(&self.direction),
            up: matrix.multiply_by_point_as_vector(&self.up),
        }
    }

    pub fn equals_epsilon(&self, right: &CameraPose, epsilon: f64) -> bool {
        self.position
            .equals_epsilon(right.position, Some(epsilon), None)
            && self
                .direction
                .equals_epsilon(right.direction, Some(epsilon), None)
            && self.up.equals_epsilon(right.up, Some(epsilon), None)
    }
}

/// The live camera of a scene. The pose is expressed relative to
/// [`Camera::transform`].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    pub direction: DVec3,
    pub up: DVec3,
    pub right: DVec3,
    pub frustum: Frustum,
    transform: DMat4,
}

impl Default for Camera {
    fn default() -> Self {
        let position = DVec3::new(Ellipsoid::WGS84.maximum_radius() * 3.0, 0.0, 0.0);
        Camera::new(
            CameraPose::new(position, DVec3::NEG_X, DVec3::Z),
            Frustum::default(),
        )
    }
}

impl Camera {
    /// Embeds Columbus View and 2D coordinates (x east, y north, z height)
    /// into the 3D world frame: `(x, y, z) -> (z, x, y)`.
    pub const TRANSFORM_2D: DMat4 = DMat4::from_cols(
        DVec4::new(0.0, 1.0, 0.0, 0.0),
        DVec4::new(0.0, 0.0, 1.0, 0.0),
        DVec4::new(1.0, 0.0, 0.0, 0.0),
        DVec4::new(0.0, 0.0, 0.0, 1.0),
    );
    /// `(x, y, z) -> (y, z, x)`.
    pub const TRANSFORM_2D_INVERSE: DMat4 = DMat4::from_cols(
        DVec4::new(0.0, 0.0, 1.0, 0.0),
        DVec4::new(1.0, 0.0, 0.0, 0.0),
        DVec4::new(0.0, 1.0, 0.0, 0.0),
        DVec4::new(0.0, 0.0, 0.0, 1.0),
    );

    pub fn new(pose: CameraPose, frustum: Frustum) -> Self {
        let mut camera = Self {
            position: DVec3::ZERO,
            direction: DVec3::ZERO,
            up: DVec3::ZERO,
            right: DVec3::ZERO,
            frustum,
            transform: DMat4::IDENTITY,
        };
        camera.set_pose(&pose);
        camera
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.direction, self.up)
    }

    /// Copies the pose and recomputes `right` from it.
    pub fn set_pose(&mut self, pose: &CameraPose) {
        self.position = pose.position;
        self.direction = pose.direction;
        self.up = pose.up;
        self.right = pose.right();
    }

    pub fn transform(&self) -> &DMat4 {
        &self.transform
    }

    /// Changes the reference frame while keeping the camera where it is in
    /// the world.
    pub fn set_transform(&mut self, transform: DMat4) {
        let world = self.pose_wc();
        self.transform = transform;
        let inverse = transform.inverse_transformation();
        self.set_pose(&world.transformed(&inverse));
    }

    pub fn pose_wc(&self) -> CameraPose {
        self.pose().transformed(&self.transform)
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::DQuat;

    use super::*;

    // Earth-scale round trips leave ~1e-9 on components that should be zero.
    fn same_pose(left: &CameraPose, right: &CameraPose) -> bool {
        let near = |a: DVec3, b: DVec3| a.equals_epsilon(b, Some(EPSILON10), Some(EPSILON6));
        near(left.position, right.position)
            && near(left.direction, right.direction)
            && near(left.up, right.up)
    }

    #[test]
    fn transform_2d_permutes_axes() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(Camera::TRANSFORM_2D.multiply_by_point(&p), DVec3::new(3.0, 1.0, 2.0));
        assert_eq!(
            Camera::TRANSFORM_2D_INVERSE.multiply_by_point(&p),
            DVec3::new(2.0, 3.0, 1.0)
        );
        assert_eq!(
            Camera::TRANSFORM_2D * Camera::TRANSFORM_2D_INVERSE,
            DMat4::IDENTITY
        );
    }

    #[test]
    fn set_pose_recomputes_right() {
        let mut camera = Camera::default();
        camera.set_pose(&CameraPose::looking_down(DVec3::new(0.0, 0.0, 10.0)));
        assert_eq!(camera.right, DVec3::X);
    }

    #[test]
    fn set_transform_keeps_world_pose() {
        let mut camera = Camera::default();
        let frame = DMat4::from_rotation_translation(
            DQuat::from_rotation_z(0.4),
            DVec3::new(100.0, 200.0, -50.0),
        );
        camera.set_transform(frame);
        let world_before = camera.pose_wc();
        assert!(!camera.position.equals_epsilon(world_before.position, Some(EPSILON3), None));

        camera.set_transform(DMat4::IDENTITY);
        assert_eq!(*camera.transform(), DMat4::IDENTITY);
        assert!(same_pose(&camera.pose(), &world_before));
        assert!(same_pose(&camera.pose(), &Camera::default().pose()));
    }
}
