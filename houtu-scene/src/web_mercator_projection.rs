use std::f64::consts::FRAC_PI_2;

use bevy::math::DVec3;

use crate::{ellipsoid::Ellipsoid, math::Cartographic, projection::Projection};

/// The map projection used by Google Maps, Bing Maps, and most of ArcGIS
/// Online, EPSG:3857.
#[derive(Debug, Clone, PartialEq)]
pub struct WebMercatorProjection {
    pub ellipsoid: Ellipsoid,
    semimajor_axis: f64,
    one_over_semimajor_axis: f64,
}

impl Default for WebMercatorProjection {
    fn default() -> Self {
        WebMercatorProjection::from_ellipsoid(&Ellipsoid::WGS84)
    }
}

impl WebMercatorProjection {
    /// The latitude at which the projected map is square, about 85.05113 degrees.
    pub const MAXIMUM_LATITUDE: f64 = 1.4844222297453322;

    pub fn from_ellipsoid(ellipsoid: &Ellipsoid) -> Self {
        Self {
            ellipsoid: *ellipsoid,
            semimajor_axis: ellipsoid.semimajor_axis(),
            one_over_semimajor_axis: 1.0 / ellipsoid.semimajor_axis(),
        }
    }

    pub fn mercator_angle_to_geodetic_latitude(mercator_angle: f64) -> f64 {
        FRAC_PI_2 - 2.0 * (-mercator_angle).exp().atan()
    }

    /// Latitudes beyond [`Self::MAXIMUM_LATITUDE`] are clamped first.
    pub fn geodetic_latitude_to_mercator_angle(latitude: f64) -> f64 {
        let latitude = latitude.clamp(-Self::MAXIMUM_LATITUDE, Self::MAXIMUM_LATITUDE);
        let sin_latitude = latitude.sin();
        0.5 * ((1.0 + sin_latitude) / (1.0 - sin_latitude)).ln()
    }
}

impl Projection for WebMercatorProjection {
    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
    fn project(&self, cartographic: &Cartographic) -> DVec3 {
        let semimajor_axis = self.semimajor_axis;
        let x = cartographic.longitude * semimajor_axis;
        let y = Self::geodetic_latitude_to_mercator_angle(cartographic.latitude) * semimajor_axis;
        let z = cartographic.height;
        DVec3::new(x, y, z)
    }
    fn un_project(&self, cartesian: &DVec3) -> Cartographic {
        let one_over_semimajor_axis = self.one_over_semimajor_axis;
        let longitude = cartesian.x * one_over_semimajor_axis;
        let latitude =
            Self::mercator_angle_to_geodetic_latitude(cartesian.y * one_over_semimajor_axis);
        let height = cartesian.z;
        Cartographic::new(longitude, latitude, height)
    }
}
