//! GeoJSON output types for the boundary overlay layer.

use serde::Serialize;

use crate::wkt::Ring;

/// GeoJSON `FeatureCollection` of BID boundaries.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<BoundaryFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<BoundaryFeature>) -> Self {
        Self {
            collection_type: "FeatureCollection".to_string(),
            features,
        }
    }
}

/// One BID boundary as a `MultiPolygon` feature.
#[derive(Debug, Clone, Serialize)]
pub struct BoundaryFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub properties: BoundaryProperties,
    pub geometry: MultiPolygonGeometry,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoundaryProperties {
    pub name: String,
    pub color: [u8; 3],
}

/// MultiPolygon geometry reconstructed from stored exterior rings.
///
/// Each stored ring becomes its own single-ring polygon part; holes were
/// dropped at parse time and are not represented.
#[derive(Debug, Clone, Serialize)]
pub struct MultiPolygonGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<Vec<Vec<[f64; 2]>>>,
}

impl BoundaryFeature {
    /// Build a feature from a named boundary's exterior rings.
    pub fn multipolygon(name: impl Into<String>, color: [u8; 3], rings: &[Ring]) -> Self {
        let coordinates: Vec<Vec<Vec<[f64; 2]>>> = rings
            .iter()
            .map(|ring| vec![ring.iter().map(|c| [c.x, c.y]).collect()])
            .collect();

        Self {
            feature_type: "Feature".to_string(),
            properties: BoundaryProperties {
                name: name.into(),
                color,
            },
            geometry: MultiPolygonGeometry {
                geometry_type: "MultiPolygon".to_string(),
                coordinates,
            },
        }
    }
}
