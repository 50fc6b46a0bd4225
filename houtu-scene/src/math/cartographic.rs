/// A position given as longitude, latitude (radians) and height above the
/// ellipsoid (meters).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Cartographic {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
}
impl Cartographic {
    pub const ZERO: Cartographic = Cartographic {
        longitude: 0.0,
        latitude: 0.0,
        height: 0.0,
    };
    pub fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Cartographic::from_radians(longitude, latitude, height)
    }
    pub fn from_radians(longitude: f64, latitude: f64, height: f64) -> Self {
        Cartographic {
            longitude,
            latitude,
            height,
        }
    }
    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Cartographic {
            longitude: longitude.to_radians(),
            latitude: latitude.to_radians(),
            height,
        }
    }
    pub fn to_degrees(&self) -> Self {
        Cartographic {
            longitude: self.longitude.to_degrees(),
            latitude: self.latitude.to_degrees(),
            height: self.height,
        }
    }
    pub fn equals_epsilon(&self, right: &Cartographic, epsilon: f64) -> bool {
        return (self.longitude - right.longitude).abs() <= epsilon
            && (self.latitude - right.latitude).abs() <= epsilon
            && (self.height - right.height).abs() <= epsilon;
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use bevy::math::DVec3;

    use super::*;
    use crate::{ellipsoid::Ellipsoid, math::Cartesian3};

    const SURFACE_CARTOGRAPHIC: Cartographic = Cartographic {
        longitude: 25.0 * PI / 180.0,
        latitude: 45.0 * PI / 180.0,
        height: 0.0,
    };

    const SURFACE_CARTESIAN: DVec3 = DVec3 {
        x: 4094327.7921465295,
        y: 1909216.4044747739,
        z: 4487348.4088659193,
    };

    #[test]
    fn test_to_cartesian() {
        let actual = Ellipsoid::WGS84.cartographic_to_cartesian(&SURFACE_CARTOGRAPHIC);
        assert!(actual.equals_epsilon(SURFACE_CARTESIAN, Some(1e-7), None));
    }

    #[test]
    fn test_from_cartesian() {
        let c = Ellipsoid::WGS84
            .cartesian_to_cartographic(&SURFACE_CARTESIAN)
            .unwrap();
        assert!(c.equals_epsilon(&SURFACE_CARTOGRAPHIC, 1e-5));
    }

    #[test]
    fn test_degrees() {
        let c = Cartographic::from_degrees(90.0, -45.0, 10.0);
        assert_eq!(c.longitude, PI / 2.0);
        assert!(c.to_degrees().equals_epsilon(&Cartographic::new(90.0, -45.0, 10.0), 1e-12));
    }
}
