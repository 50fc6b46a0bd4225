#![warn(
    clippy::unwrap_used,
    clippy::cast_lossless,
    clippy::unimplemented,
    clippy::indexing_slicing,
    clippy::expect_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::indexing_slicing))]

mod camera;
mod ellipsoid;
mod error;
mod event;
mod frustum;
mod geographic_projection;
pub mod math;
mod orthographic_frustum;
mod perspective_frustum;
mod projection;
mod scene;
mod scene_mode;
pub mod scene_transitioner;
mod tween;
mod web_mercator_projection;

pub use camera::*;
pub use ellipsoid::*;
pub use error::*;
pub use event::*;
pub use frustum::*;
pub use geographic_projection::*;
pub use math::*;
pub use orthographic_frustum::*;
pub use perspective_frustum::*;
pub use projection::*;
pub use scene::*;
pub use scene_mode::*;
pub use scene_transitioner::{
    MorphComplete, MorphInput, MorphStart, MorphTarget, SceneTransitioner, TransitionerId,
};
pub use tween::*;
pub use web_mercator_projection::*;
