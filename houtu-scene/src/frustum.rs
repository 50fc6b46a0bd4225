use crate::{orthographic_frustum::OrthographicFrustum, perspective_frustum::PerspectiveFrustum};

/// The projection volume of a camera. Exactly one kind is active at a time;
/// switching kinds replaces the whole value.
#[derive(Debug, Clone, PartialEq)]
pub enum Frustum {
    Perspective(PerspectiveFrustum),
    Orthographic(OrthographicFrustum),
}

impl Default for Frustum {
    fn default() -> Self {
        Frustum::Perspective(PerspectiveFrustum::default())
    }
}

impl From<PerspectiveFrustum> for Frustum {
    fn from(frustum: PerspectiveFrustum) -> Self {
        Frustum::Perspective(frustum)
    }
}

impl From<OrthographicFrustum> for Frustum {
    fn from(frustum: OrthographicFrustum) -> Self {
        Frustum::Orthographic(frustum)
    }
}

/// Which projection kind a [`Frustum`] is, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumKind {
    Perspective,
    Orthographic,
}

impl std::fmt::Display for FrustumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrustumKind::Perspective => write!(f, "perspective"),
            FrustumKind::Orthographic => write!(f, "orthographic"),
        }
    }
}

impl Frustum {
    pub fn kind(&self) -> FrustumKind {
        match self {
            Frustum::Perspective(_) => FrustumKind::Perspective,
            Frustum::Orthographic(_) => FrustumKind::Orthographic,
        }
    }
    pub fn as_perspective(&self) -> Option<&PerspectiveFrustum> {
        match self {
            Frustum::Perspective(f) => Some(f),
            Frustum::Orthographic(_) => None,
        }
    }
    pub fn as_perspective_mut(&mut self) -> Option<&mut PerspectiveFrustum> {
        match self {
            Frustum::Perspective(f) => Some(f),
            Frustum::Orthographic(_) => None,
        }
    }
    pub fn as_orthographic(&self) -> Option<&OrthographicFrustum> {
        match self {
            Frustum::Orthographic(f) => Some(f),
            Frustum::Perspective(_) => None,
        }
    }
}
