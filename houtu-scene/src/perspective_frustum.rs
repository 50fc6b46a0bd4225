/// A perspective view frustum defined by a field of view, an aspect ratio and
/// near/far distances.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveFrustum {
    /// Angle of the field of view in radians, applied to the larger of the
    /// frustum's width and height.
    pub fov: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for PerspectiveFrustum {
    fn default() -> Self {
        Self::new((60.0 as f64).to_radians(), 1.0, 1.0, 500000000.0)
    }
}

impl PerspectiveFrustum {
    pub fn new(fov: f64, aspect_ratio: f64, near: f64, far: f64) -> Self {
        Self {
            fov,
            aspect_ratio,
            near,
            far,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_construct() {
        let f = PerspectiveFrustum::default();
        assert!(f.fov == (60.0 as f64).to_radians());
        assert!(f.aspect_ratio == 1.0);
        assert!(f.near == 1.0);
        assert!(f.far == 500000000.0);
    }
}
