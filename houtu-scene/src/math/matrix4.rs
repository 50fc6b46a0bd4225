use bevy::math::{DMat3, DMat4, DVec3};

pub trait Matrix4 {
    /// Inverse of a rigid transformation (rotation + translation), cheaper and
    /// better conditioned than a general inverse.
    fn inverse_transformation(&self) -> DMat4;
    fn multiply_by_point(&self, cartesian: &DVec3) -> DVec3;
    /// Applies only the upper-left 3x3 part, ignoring translation.
    fn multiply_by_point_as_vector(&self, cartesian: &DVec3) -> DVec3;
    fn get_translation(&self) -> DVec3;
}

impl Matrix4 for DMat4 {
    fn inverse_transformation(&self) -> DMat4 {
        let rotation = DMat3::from_mat4(*self).transpose();
        let translation = -(rotation * self.get_translation());
        let mut result = DMat4::from_mat3(rotation);
        result.w_axis = translation.extend(1.0);
        return result;
    }
    fn multiply_by_point(&self, cartesian: &DVec3) -> DVec3 {
        self.transform_point3(*cartesian)
    }
    fn multiply_by_point_as_vector(&self, cartesian: &DVec3) -> DVec3 {
        self.transform_vector3(*cartesian)
    }
    fn get_translation(&self) -> DVec3 {
        self.w_axis.truncate()
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::DQuat;

    use super::*;
    use crate::math::{Cartesian3, EPSILON14};

    #[test]
    fn inverse_transformation_work() {
        let rotation = DQuat::from_rotation_z(0.7) * DQuat::from_rotation_x(-0.3);
        let matrix =
            DMat4::from_rotation_translation(rotation, DVec3::new(10.0, -20.0, 30.0));
        let inverse = matrix.inverse_transformation();
        let point = DVec3::new(1.0, 2.0, 3.0);
        let round_trip = inverse.multiply_by_point(&matrix.multiply_by_point(&point));
        assert!(round_trip.equals_epsilon(point, Some(EPSILON14), Some(1e-12)));
        assert!((matrix * inverse).abs_diff_eq(DMat4::IDENTITY, 1e-12));
    }

    #[test]
    fn multiply_by_point_as_vector_ignores_translation() {
        let matrix = DMat4::from_translation(DVec3::new(5.0, 6.0, 7.0));
        let vector = DVec3::new(1.0, 0.0, 0.0);
        assert_eq!(matrix.multiply_by_point_as_vector(&vector), vector);
        assert_eq!(matrix.multiply_by_point(&vector), DVec3::new(6.0, 6.0, 7.0));
    }
}
