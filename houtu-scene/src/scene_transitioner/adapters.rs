//! Conversions of camera poses between the 3D world frame and the planar
//! frame shared by Columbus View and 2D (x east, y north, z height).
use bevy::math::DVec3;

use crate::{
    camera::CameraPose,
    ellipsoid::Ellipsoid,
    error::TransitionError,
    math::{Matrix4, Transforms},
    projection::{MapProjection, Projection},
};

/// Re-expresses a world-frame pose in Columbus View: the position is
/// projected onto the map and the orientation is carried over relative to the
/// local east-north-up frame below the camera.
pub fn columbus_view_from_3d(
    pose: &CameraPose,
    projection: &MapProjection,
    ellipsoid: &Ellipsoid,
) -> Result<CameraPose, TransitionError> {
    let surface = ellipsoid
        .scale_to_geodetic_surface(&pose.position)
        .ok_or(TransitionError::NoGeodeticSurface(pose.position))?;
    let cartographic = ellipsoid
        .cartesian_to_cartographic(&pose.position)
        .ok_or(TransitionError::NoGeodeticSurface(pose.position))?;
    let to_enu = Transforms::east_north_up_to_fixed_frame(&surface, ellipsoid)
        .inverse_transformation();

    Ok(CameraPose::new(
        projection.project(&cartographic),
        to_enu.multiply_by_point_as_vector(&pose.direction),
        to_enu.multiply_by_point_as_vector(&pose.up),
    ))
}

/// Inverse of [`columbus_view_from_3d`].
pub fn columbus_view_to_3d(
    pose: &CameraPose,
    projection: &MapProjection,
    ellipsoid: &Ellipsoid,
) -> Result<CameraPose, TransitionError> {
    let cartographic = projection.un_project(&pose.position);
    let position = ellipsoid.cartographic_to_cartesian(&cartographic);
    let surface = ellipsoid
        .scale_to_geodetic_surface(&position)
        .ok_or(TransitionError::NoGeodeticSurface(position))?;
    let from_enu = Transforms::east_north_up_to_fixed_frame(&surface, ellipsoid);

    Ok(CameraPose::new(
        position,
        from_enu.multiply_by_point_as_vector(&pose.direction),
        from_enu.multiply_by_point_as_vector(&pose.up),
    ))
}

/// The top-down 2D pose over the point a 3D camera sits above. The height
/// above the ellipsoid becomes the map-frame `z`.
pub fn scene_2d_from_3d(
    position: &DVec3,
    projection: &MapProjection,
    ellipsoid: &Ellipsoid,
) -> Result<CameraPose, TransitionError> {
    let cartographic = ellipsoid
        .cartesian_to_cartographic(position)
        .ok_or(TransitionError::NoGeodeticSurface(*position))?;
    Ok(CameraPose::looking_down(projection.project(&cartographic)))
}

/// Distance of the fov/height coupling `height = distance / tan(fov / 2)`
/// that yields `height` at `fov`.
pub fn coupling_distance(height: f64, fov: f64) -> f64 {
    height * (fov * 0.5).tan()
}

/// Camera height keeping the visible extent `distance` constant at `fov`.
pub fn coupled_height(distance: f64, fov: f64) -> f64 {
    distance / (fov * 0.5).tan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geographic_projection::GeographicProjection,
        math::{Cartesian3, Cartographic, EPSILON10, EPSILON6, EPSILON9, RADIANS_PER_DEGREE},
        web_mercator_projection::WebMercatorProjection,
    };

    fn pose_above(longitude: f64, latitude: f64, height: f64) -> CameraPose {
        let ellipsoid = Ellipsoid::WGS84;
        let position = ellipsoid
            .cartographic_to_cartesian(&Cartographic::from_degrees(longitude, latitude, height));
        let footprint = ellipsoid.scale_to_geodetic_surface(&position).unwrap();
        let direction = -ellipsoid.geodetic_surface_normal(&footprint).unwrap();
        let up = (DVec3::Z - direction * DVec3::Z.dot(direction)).normalize();
        CameraPose::new(position, direction, up)
    }

    #[test]
    fn looking_straight_down_maps_to_neg_z() {
        let pose = pose_above(25.0, 45.0, 1000000.0);
        let result =
            columbus_view_from_3d(&pose, &MapProjection::default(), &Ellipsoid::WGS84).unwrap();
        assert!(result
            .direction
            .equals_epsilon(DVec3::NEG_Z, Some(EPSILON9), Some(EPSILON9)));
        assert!(equals_height(result.position.z, 1000000.0));
        let expected = GeographicProjection::default()
            .project(&Cartographic::from_degrees(25.0, 45.0, 1000000.0));
        assert!(result.position.equals_epsilon(expected, Some(EPSILON6), None));
    }

    fn equals_height(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-3
    }

    #[test]
    fn columbus_view_round_trip() {
        let projection = MapProjection::from(WebMercatorProjection::default());
        let pose = pose_above(-75.0, 40.0, 25000.0);
        let cv = columbus_view_from_3d(&pose, &projection, &Ellipsoid::WGS84).unwrap();
        let back = columbus_view_to_3d(&cv, &projection, &Ellipsoid::WGS84).unwrap();
        assert!(back
            .position
            .equals_epsilon(pose.position, Some(EPSILON9), None));
        assert!(back
            .direction
            .equals_epsilon(pose.direction, Some(EPSILON9), Some(EPSILON9)));
        assert!(back.up.equals_epsilon(pose.up, Some(EPSILON9), Some(EPSILON9)));
    }

    #[test]
    fn center_of_ellipsoid_has_no_surface() {
        let pose = CameraPose::new(DVec3::ZERO, DVec3::X, DVec3::Z);
        let result = columbus_view_from_3d(&pose, &MapProjection::default(), &Ellipsoid::WGS84);
        assert_eq!(result, Err(TransitionError::NoGeodeticSurface(DVec3::ZERO)));
        assert!(scene_2d_from_3d(&DVec3::ZERO, &MapProjection::default(), &Ellipsoid::WGS84)
            .is_err());
    }

    #[test]
    fn scene_2d_pose_is_top_down() {
        let pose = pose_above(10.0, -20.0, 5000.0);
        let result =
            scene_2d_from_3d(&pose.position, &MapProjection::default(), &Ellipsoid::WGS84)
                .unwrap();
        assert_eq!(result.direction, DVec3::NEG_Z);
        assert_eq!(result.up, DVec3::Y);
        assert!(equals_height(result.position.z, 5000.0));
    }

    #[test]
    fn coupling_round_trip() {
        let fov = 60.0 * RADIANS_PER_DEGREE;
        let distance = coupling_distance(1000.0, fov);
        assert!((coupled_height(distance, fov) - 1000.0).abs() < EPSILON10);
    }
}
