use bevy::math::DVec3;

use crate::math::*;

/// A quadratic surface defined in Cartesian coordinates by
/// `(x / a)^2 + (y / b)^2 + (z / c)^2 = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub radii: DVec3,
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Ellipsoid::WGS84
    }
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid::from_radii(DVec3::new(
        6378137.0,
        6378137.0,
        6356752.3142451793,
    ));
    pub const UNIT_SPHERE: Ellipsoid = Ellipsoid::from_radii(DVec3::ONE);

    const CENTER_TOLERANCE_SQUARED: f64 = EPSILON1;

    pub const fn from_radii(radii: DVec3) -> Self {
        Self { radii }
    }
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_radii(DVec3::new(x, y, z))
    }
    pub fn radii_squared(&self) -> DVec3 {
        self.radii * self.radii
    }
    pub fn one_over_radii(&self) -> DVec3 {
        DVec3::ONE / self.radii
    }
    pub fn one_over_radii_squared(&self) -> DVec3 {
        DVec3::ONE / self.radii_squared()
    }
    pub fn semimajor_axis(&self) -> f64 {
        self.radii.x
    }
    pub fn maximum_radius(&self) -> f64 {
        self.radii.max_element()
    }

    pub fn geodetic_surface_normal(&self, cartesian: &DVec3) -> Option<DVec3> {
        if cartesian.equals_epsilon(DVec3::ZERO, Some(EPSILON14), None) {
            return None;
        }
        cartesian
            .multiply_components(&self.one_over_radii_squared())
            .try_normalize()
    }

    fn geodetic_surface_normal_cartographic(&self, cartographic: &Cartographic) -> DVec3 {
        let longitude = cartographic.longitude;
        let latitude = cartographic.latitude;
        let cos_latitude = latitude.cos();
        DVec3::new(
            cos_latitude * longitude.cos(),
            cos_latitude * longitude.sin(),
            latitude.sin(),
        )
        .normalize()
    }

    pub fn cartographic_to_cartesian(&self, cartographic: &Cartographic) -> DVec3 {
        let n = self.geodetic_surface_normal_cartographic(cartographic);
        let mut k = self.radii_squared().multiply_components(&n);
        let gamma = n.dot(k).sqrt();
        k /= gamma;
        k + n * cartographic.height
    }

    /// Returns `None` when the position is too close to the ellipsoid's
    /// center for a surface point to be defined.
    pub fn cartesian_to_cartographic(&self, cartesian: &DVec3) -> Option<Cartographic> {
        let p = self.scale_to_geodetic_surface(cartesian)?;
        let n = self.geodetic_surface_normal(&p)?;
        let h = *cartesian - p;

        let longitude = n.y.atan2(n.x);
        let latitude = n.z.asin();
        let height = sign(h.dot(*cartesian)) * h.magnitude();
        Some(Cartographic::new(longitude, latitude, height))
    }

    /// Scales the provided Cartesian position along the geodetic surface
    /// normal so that it is on the surface of this ellipsoid.
    pub fn scale_to_geodetic_surface(&self, cartesian: &DVec3) -> Option<DVec3> {
        let position_x = cartesian.x;
        let position_y = cartesian.y;
        let position_z = cartesian.z;

        let one_over_radii = self.one_over_radii();
        let one_over_radii_squared = self.one_over_radii_squared();

        let x2 = position_x * position_x * one_over_radii.x * one_over_radii.x;
        let y2 = position_y * position_y * one_over_radii.y * one_over_radii.y;
        let z2 = position_z * position_z * one_over_radii.z * one_over_radii.z;

        let squared_norm = x2 + y2 + z2;
        let ratio = (1.0 / squared_norm).sqrt();

        let intersection = *cartesian * ratio;

        if squared_norm < Self::CENTER_TOLERANCE_SQUARED {
            return if ratio.is_finite() {
                Some(intersection)
            } else {
                None
            };
        }

        let gradient = intersection.multiply_components(&one_over_radii_squared) * 2.0;

        let mut lambda = ((1.0 - ratio) * cartesian.length()) / (0.5 * gradient.length());
        let mut correction = 0.0;

        let mut x_multiplier;
        let mut y_multiplier;
        let mut z_multiplier;
        loop {
            lambda -= correction;

            x_multiplier = 1.0 / (1.0 + lambda * one_over_radii_squared.x);
            y_multiplier = 1.0 / (1.0 + lambda * one_over_radii_squared.y);
            z_multiplier = 1.0 / (1.0 + lambda * one_over_radii_squared.z);

            let x_multiplier2 = x_multiplier * x_multiplier;
            let y_multiplier2 = y_multiplier * y_multiplier;
            let z_multiplier2 = z_multiplier * z_multiplier;

            let x_multiplier3 = x_multiplier2 * x_multiplier;
            let y_multiplier3 = y_multiplier2 * y_multiplier;
            let z_multiplier3 = z_multiplier2 * z_multiplier;

            let func = x2 * x_multiplier2 + y2 * y_multiplier2 + z2 * z_multiplier2 - 1.0;

            let denominator = x2 * x_multiplier3 * one_over_radii_squared.x
                + y2 * y_multiplier3 * one_over_radii_squared.y
                + z2 * z_multiplier3 * one_over_radii_squared.z;

            let derivative = -2.0 * denominator;

            correction = func / derivative;
            if func.abs() <= EPSILON12 {
                break;
            }
        }

        Some(DVec3::new(
            position_x * x_multiplier,
            position_y * y_multiplier,
            position_z * z_multiplier,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACE_CARTESIAN: DVec3 =
        DVec3::new(4582719.8827300891, -4582719.8827300882, 1725510.4250797231);

    fn space_cartographic() -> Cartographic {
        Cartographic::from_degrees(-45.0, 15.0, 330000.0)
    }

    #[test]
    fn default_is_wgs84() {
        let ellipsoid = Ellipsoid::default();
        assert_eq!(ellipsoid, Ellipsoid::WGS84);
        assert_eq!(ellipsoid.maximum_radius(), 6378137.0);
        assert_eq!(ellipsoid.radii.min_element(), 6356752.3142451793);
    }

    #[test]
    fn cartographic_to_cartesian_work() {
        let result = Ellipsoid::WGS84.cartographic_to_cartesian(&space_cartographic());
        assert!(result.equals_epsilon(SPACE_CARTESIAN, Some(EPSILON7), None));
    }

    #[test]
    fn cartesian_to_cartographic_work() {
        let result = Ellipsoid::WGS84
            .cartesian_to_cartographic(&SPACE_CARTESIAN)
            .unwrap();
        let expected = space_cartographic();
        assert!(equals_epsilon(result.longitude, expected.longitude, Some(EPSILON8), None));
        assert!(equals_epsilon(result.latitude, expected.latitude, Some(EPSILON8), None));
        assert!(equals_epsilon(result.height, expected.height, Some(EPSILON8), None));
    }

    #[test]
    fn cartesian_to_cartographic_at_center_is_none() {
        assert!(Ellipsoid::WGS84
            .cartesian_to_cartographic(&DVec3::ZERO)
            .is_none());
    }

    #[test]
    fn tiny_offsets_still_reach_the_surface() {
        let p = Ellipsoid::WGS84
            .scale_to_geodetic_surface(&DVec3::new(1e-50, 1e-60, 1e-70))
            .unwrap();
        assert!(equals_epsilon(p.length(), 6378137.0, Some(EPSILON10), None));
    }

    #[test]
    fn scale_to_geodetic_surface_work() {
        let ellipsoid = Ellipsoid::new(1.0, 2.0, 3.0);
        let result = ellipsoid
            .scale_to_geodetic_surface(&DVec3::new(4.0, 5.0, 6.0))
            .unwrap();
        let expected = DVec3::new(
            0.2680893773941855,
            1.1160466902266495,
            2.3559801120411263,
        );
        assert!(result.equals_epsilon(expected, Some(EPSILON8), None));
    }

    #[test]
    fn geodetic_surface_normal_of_zero_is_none() {
        assert!(Ellipsoid::WGS84
            .geodetic_surface_normal(&DVec3::ZERO)
            .is_none());
    }

    #[test]
    fn round_trip_keeps_height() {
        let carto = Cartographic::from_degrees(120.0, -33.0, 1500.0);
        let cartesian = Ellipsoid::WGS84.cartographic_to_cartesian(&carto);
        let back = Ellipsoid::WGS84.cartesian_to_cartographic(&cartesian).unwrap();
        assert!(equals_epsilon(back.longitude, carto.longitude, Some(EPSILON10), None));
        assert!(equals_epsilon(back.latitude, carto.latitude, Some(EPSILON10), None));
        assert!(equals_epsilon(back.height, carto.height, Some(EPSILON6), None));
    }
}
