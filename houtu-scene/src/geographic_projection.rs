use bevy::math::DVec3;

use crate::{ellipsoid::Ellipsoid, math::Cartographic, projection::Projection};

/// A simple map projection where longitude and latitude are linearly mapped
/// to X and Y by multiplying them by the semimajor axis.
#[derive(Debug, Clone, PartialEq)]
pub struct GeographicProjection {
    pub ellipsoid: Ellipsoid,
    semimajor_axis: f64,
    one_over_semimajor_axis: f64,
}

impl Default for GeographicProjection {
    fn default() -> Self {
        GeographicProjection::from_ellipsoid(&Ellipsoid::WGS84)
    }
}

impl GeographicProjection {
    pub fn from_ellipsoid(ellipsoid: &Ellipsoid) -> Self {
        Self {
            ellipsoid: *ellipsoid,
            semimajor_axis: ellipsoid.semimajor_axis(),
            one_over_semimajor_axis: 1.0 / ellipsoid.semimajor_axis(),
        }
    }
}

impl Projection for GeographicProjection {
    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
    fn project(&self, cartographic: &Cartographic) -> DVec3 {
        let semimajor_axis = self.semimajor_axis;
        let x = cartographic.longitude * semimajor_axis;
        let y = cartographic.latitude * semimajor_axis;
        let z = cartographic.height;
        DVec3::new(x, y, z)
    }
    fn un_project(&self, cartesian: &DVec3) -> Cartographic {
        let one_over_semimajor_axis = self.one_over_semimajor_axis;
        let longitude = cartesian.x * one_over_semimajor_axis;
        let latitude = cartesian.y * one_over_semimajor_axis;
        let height = cartesian.z;
        Cartographic::new(longitude, latitude, height)
    }
}
