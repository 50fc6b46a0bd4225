/// An off-center orthographic view frustum given by the extents of its
/// near plane.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicFrustum {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for OrthographicFrustum {
    fn default() -> Self {
        Self {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            near: 1.0,
            far: 500000000.0,
        }
    }
}

impl OrthographicFrustum {
    /// A frustum centered on the view axis, `half_width` wide on either side
    /// and shaped to the drawing buffer's aspect.
    pub fn from_half_width(half_width: f64, width: u32, height: u32) -> Self {
        let top = half_width * (f64::from(height) / f64::from(width));
        Self {
            left: -half_width,
            right: half_width,
            top,
            bottom: -top,
            ..Default::default()
        }
    }
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_half_width_work() {
        let f = OrthographicFrustum::from_half_width(100.0, 800, 400);
        assert_eq!(f.right, 100.0);
        assert_eq!(f.left, -100.0);
        assert_eq!(f.top, 50.0);
        assert_eq!(f.bottom, -50.0);
        assert_eq!(f.width(), 200.0);
        assert_eq!(f.near, 1.0);
    }
}
