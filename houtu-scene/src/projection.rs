use bevy::math::DVec3;

use crate::{
    ellipsoid::Ellipsoid, geographic_projection::GeographicProjection, math::Cartographic,
    web_mercator_projection::WebMercatorProjection,
};

/// Forward and inverse transforms between geodetic coordinates and a planar
/// map, where `z` carries the height unchanged.
pub trait Projection {
    fn ellipsoid(&self) -> &Ellipsoid;
    fn project(&self, cartographic: &Cartographic) -> DVec3;
    fn un_project(&self, cartesian: &DVec3) -> Cartographic;
}

/// The map projection a scene lays its 2D and Columbus View modes out with.
#[derive(Debug, Clone, PartialEq)]
pub enum MapProjection {
    Geographic(GeographicProjection),
    WebMercator(WebMercatorProjection),
}

impl Default for MapProjection {
    fn default() -> Self {
        MapProjection::Geographic(GeographicProjection::default())
    }
}

impl From<GeographicProjection> for MapProjection {
    fn from(projection: GeographicProjection) -> Self {
        MapProjection::Geographic(projection)
    }
}

impl From<WebMercatorProjection> for MapProjection {
    fn from(projection: WebMercatorProjection) -> Self {
        MapProjection::WebMercator(projection)
    }
}

impl Projection for MapProjection {
    fn ellipsoid(&self) -> &Ellipsoid {
        match self {
            MapProjection::Geographic(p) => p.ellipsoid(),
            MapProjection::WebMercator(p) => p.ellipsoid(),
        }
    }
    fn project(&self, cartographic: &Cartographic) -> DVec3 {
        match self {
            MapProjection::Geographic(p) => p.project(cartographic),
            MapProjection::WebMercator(p) => p.project(cartographic),
        }
    }
    fn un_project(&self, cartesian: &DVec3) -> Cartographic {
        match self {
            MapProjection::Geographic(p) => p.un_project(cartesian),
            MapProjection::WebMercator(p) => p.un_project(cartesian),
        }
    }
}
