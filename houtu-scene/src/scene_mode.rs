use serde::Deserialize;

/// Indicates if the scene is viewed in 3D, 2D, or 2.5D Columbus view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneMode {
    /// Morphing between mode, e.g., 3D to 2D.
    Morphing,
    /// Columbus View mode. A 2.5D perspective view where the map is laid out
    /// flat and objects with non-zero height are drawn above it.
    ColumbusView,
    /// 2D mode. The map is viewed top-down with an orthographic projection.
    #[serde(rename = "scene2d")]
    Scene2D,
    /// 3D mode. A traditional 3D perspective view of the globe.
    #[default]
    #[serde(rename = "scene3d")]
    Scene3D,
}

impl SceneMode {
    /// Returns the resting morph time for the given scene mode, `None` while
    /// morphing.
    pub fn morph_time(mode: SceneMode) -> Option<f64> {
        match mode {
            SceneMode::Scene3D => Some(1.0),
            SceneMode::Morphing => None,
            _ => Some(0.0),
        }
    }
}

impl std::fmt::Display for SceneMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SceneMode::Morphing => "morphing",
            SceneMode::ColumbusView => "columbus view",
            SceneMode::Scene2D => "2D",
            SceneMode::Scene3D => "3D",
        };
        write!(f, "{}", name)
    }
}
