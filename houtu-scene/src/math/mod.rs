use std::f64::consts::PI;

mod cartesian3;
mod cartographic;
mod matrix4;
mod transform;

pub use cartesian3::*;
pub use cartographic::*;
pub use matrix4::*;
pub use transform::*;

pub const EPSILON1: f64 = 0.1;
pub const EPSILON2: f64 = 0.01;
pub const EPSILON3: f64 = 0.001;
pub const EPSILON4: f64 = 0.0001;
pub const EPSILON5: f64 = 0.00001;
pub const EPSILON6: f64 = 0.000001;
pub const EPSILON7: f64 = 0.0000001;
pub const EPSILON8: f64 = 0.00000001;
pub const EPSILON9: f64 = 0.000000001;
pub const EPSILON10: f64 = 0.0000000001;
pub const EPSILON11: f64 = 0.00000000001;
pub const EPSILON12: f64 = 0.000000000001;
pub const EPSILON13: f64 = 0.0000000000001;
pub const EPSILON14: f64 = 0.00000000000001;
pub const EPSILON15: f64 = 0.000000000000001;

pub const RADIANS_PER_DEGREE: f64 = PI / 180.0;

/// Compares two scalars using an absolute tolerance, falling back to a
/// tolerance relative to the larger magnitude.
///
/// `absolute_epsilon` defaults to `relative_epsilon` when not given.
pub fn equals_epsilon(
    left: f64,
    right: f64,
    relative_epsilon: Option<f64>,
    absolute_epsilon: Option<f64>,
) -> bool {
    let relative_epsilon = relative_epsilon.unwrap_or(0.0);
    let absolute_epsilon = absolute_epsilon.unwrap_or(relative_epsilon);
    let abs_diff = (left - right).abs();
    return abs_diff <= absolute_epsilon
        || abs_diff <= relative_epsilon * left.abs().max(right.abs());
}

pub fn lerp(p: f64, q: f64, time: f64) -> f64 {
    (1.0 - time) * p + time * q
}

/// Like `f64::signum`, but zero maps to zero.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equals_epsilon_work() {
        assert!(equals_epsilon(1.0, 1.0, Some(0.0), None));
        assert!(equals_epsilon(1.0, 1.0 + EPSILON15, Some(EPSILON14), None));
        assert!(!equals_epsilon(1.0, 1.1, Some(EPSILON2), None));
        assert!(equals_epsilon(3000000.0, 3000000.2, Some(EPSILON7), None));
        assert!(equals_epsilon(0.5, 0.55, Some(0.0), Some(0.1)));
    }

    #[test]
    fn lerp_work() {
        assert_eq!(lerp(1.0, 2.0, 0.0), 1.0);
        assert_eq!(lerp(1.0, 2.0, 0.5), 1.5);
        assert_eq!(lerp(1.0, 2.0, 1.0), 2.0);
    }

    #[test]
    fn sign_work() {
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(2.5), 1.0);
    }
}
