//! GeoJSON point features for the map page.

use serde::Serialize;

use crate::reference::{GeoSite, GEO_SITES};

/// GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    /// Always `"FeatureCollection"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Point features.
    pub features: Vec<Feature>,
}

/// GeoJSON `Feature` with a point geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    /// Always `"Feature"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Display properties.
    pub properties: PointProperties,
    /// Location.
    pub geometry: Point,
}

/// Properties attached to each point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointProperties {
    /// Place name.
    pub name: &'static str,
    /// Case count.
    pub value: u32,
}

/// GeoJSON `Point`; coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    /// Always `"Point"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[longitude, latitude]`.
    pub coordinates: [f64; 2],
}

impl From<GeoSite> for Feature {
    fn from(site: GeoSite) -> Self {
        Self {
            kind: "Feature",
            properties: PointProperties {
                name: site.name,
                value: site.value,
            },
            geometry: Point {
                kind: "Point",
                coordinates: [site.longitude, site.latitude],
            },
        }
    }
}

/// The fixed map points.
pub fn points() -> FeatureCollection {
    FeatureCollection {
        kind: "FeatureCollection",
        features: GEO_SITES.into_iter().map(Feature::from).collect(),
    }
}
