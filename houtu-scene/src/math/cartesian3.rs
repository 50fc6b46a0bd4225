use bevy::math::DVec3;

use super::equals_epsilon;

/// Cesium-flavoured helpers on top of [`DVec3`].
pub trait Cartesian3 {
    fn equals_epsilon(
        &self,
        right: DVec3,
        relative_epsilon: Option<f64>,
        absolute_epsilon: Option<f64>,
    ) -> bool;
    fn multiply_components(&self, right: &DVec3) -> DVec3;
    fn divide_components(&self, right: &DVec3) -> DVec3;
    fn magnitude(&self) -> f64;
    fn magnitude_squared(&self) -> f64;
}

impl Cartesian3 for DVec3 {
    fn equals_epsilon(
        &self,
        right: DVec3,
        relative_epsilon: Option<f64>,
        absolute_epsilon: Option<f64>,
    ) -> bool {
        return self.eq(&right)
            || equals_epsilon(self.x, right.x, relative_epsilon, absolute_epsilon)
                && equals_epsilon(self.y, right.y, relative_epsilon, absolute_epsilon)
                && equals_epsilon(self.z, right.z, relative_epsilon, absolute_epsilon);
    }
    fn multiply_components(&self, right: &DVec3) -> DVec3 {
        DVec3::new(self.x * right.x, self.y * right.y, self.z * right.z)
    }
    fn divide_components(&self, right: &DVec3) -> DVec3 {
        DVec3::new(self.x / right.x, self.y / right.y, self.z / right.z)
    }
    fn magnitude(&self) -> f64 {
        self.length()
    }
    fn magnitude_squared(&self) -> f64 {
        self.length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EPSILON14, EPSILON2};

    #[test]
    fn equals_epsilon_work() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        assert!(a.equals_epsilon(a, Some(0.0), None));
        assert!(a.equals_epsilon(DVec3::new(1.0, 2.0, 3.0 + EPSILON14), Some(EPSILON14), None));
        assert!(!a.equals_epsilon(DVec3::new(1.0, 2.1, 3.0), Some(EPSILON2), None));
    }

    #[test]
    fn component_wise_work() {
        let a = DVec3::new(2.0, 4.0, 6.0);
        let b = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(a.multiply_components(&b), DVec3::new(2.0, 8.0, 18.0));
        assert_eq!(a.divide_components(&b), DVec3::new(2.0, 2.0, 2.0));
    }
}
