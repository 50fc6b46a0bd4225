use bevy::math::{DMat4, DVec3};

use super::*;
use crate::ellipsoid::Ellipsoid;

pub struct Transforms;

impl Transforms {
    /// Computes a 4x4 transformation matrix from a reference frame with an
    /// east-north-up axes centered at the provided origin to the ellipsoid's
    /// fixed reference frame.
    pub fn east_north_up_to_fixed_frame(origin: &DVec3, ellipsoid: &Ellipsoid) -> DMat4 {
        let (east, north, up) = if origin.equals_epsilon(DVec3::ZERO, Some(EPSILON14), None) {
            // degenerate local frame
            (
                DVec3::new(0., 1., 0.),
                DVec3::new(-1., 0., 0.),
                DVec3::new(0., 0., 1.),
            )
        } else if equals_epsilon(origin.x, 0.0, Some(EPSILON14), None)
            && equals_epsilon(origin.y, 0.0, Some(EPSILON14), None)
        {
            // origin is at a pole, flip north and up on the southern one
            let sign = sign(origin.z);
            (
                DVec3::new(0., 1., 0.),
                DVec3::new(-1., 0., 0.) * sign,
                DVec3::new(0., 0., 1.) * sign,
            )
        } else {
            let up = ellipsoid.geodetic_surface_normal(origin).unwrap_or(DVec3::Z);
            let east = DVec3::new(-origin.y, origin.x, 0.0).normalize();
            let north = up.cross(east);
            (east, north, up)
        };
        DMat4::from_cols(
            east.extend(0.0),
            north.extend(0.0),
            up.extend(0.0),
            origin.extend(1.0),
        )
    }
}
