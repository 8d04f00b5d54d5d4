//! BID boundary set: CSV loader, insertion-ordered storage, bounding box.

use std::path::Path;

use anyhow::{Context, Result};
use geo_types::Coord;
use serde::Deserialize;
use tracing::{debug, info};

use crate::wkt::{self, Ring};

/// The Brooklyn BIDs tracked by the map, including the proposed Gowanus BID.
pub const BROOKLYN_BIDS: [&str; 24] = [
    "86th Street Bay Ridge",
    "Atlantic Avenue",
    "Bay Ridge 5th Avenue",
    "Bed-Stuy Gateway",
    "Brighton Beach",
    "Church Flatbush Community Alliance",
    "Court-Livingston-Schermerhorn",
    "Cypress Hills Fulton",
    "DUMBO",
    "East Brooklyn",
    "Flatbush-Nostrand Junction",
    "Fulton Area Business (FAB) Alliance",
    "Fulton Mall Improvement Association",
    "Gowanus BID (Proposed)",
    "Graham Avenue",
    "Grand Street",
    "Kings Highway",
    "MetroTech",
    "Montague Street",
    "Myrtle Avenue Brooklyn Partnership",
    "North Flatbush",
    "Park Slope 5th Avenue",
    "Pitkin Avenue",
    "Sunset Park",
];

pub const GOWANUS_BID: &str = "Gowanus BID (Proposed)";

/// Buffer added to the boundary bounding box on all sides, in degrees (~200m).
pub const BBOX_BUFFER_DEG: f64 = 0.002;

/// Boundary of the proposed Gowanus BID. It is not in the city dataset yet;
/// these coordinates come from the map front-end.
const GOWANUS_BOUNDARY: [[f64; 2]; 30] = [
    [-73.98871236113611, 40.6852235692749],
    [-73.98656632686861, 40.684387901353176],
    [-73.98699969227908, 40.683765500363144],
    [-73.98645689115888, 40.68355803207488],
    [-73.98666481900734, 40.68325429733605],
    [-73.98500577364807, 40.68259869031278],
    [-73.98436666910332, 40.6835430943332],
    [-73.9820772740561, 40.68265014324907],
    [-73.98185949699375, 40.6829862461299],
    [-73.97982727586435, 40.68216797788509],
    [-73.98387639712381, 40.67614435139574],
    [-73.98570616219023, 40.67397312303486],
    [-73.98800431209425, 40.67508032553716],
    [-73.98874190877774, 40.674180621155706],
    [-73.9903232547831, 40.674983217807416],
    [-73.99044582277797, 40.67536168816061],
    [-73.99097986904138, 40.67549199434205],
    [-73.99192101614494, 40.674349109154754],
    [-73.99482325116658, 40.67583311313964],
    [-73.99534854257324, 40.675454645462594],
    [-73.99649542881106, 40.67406691226546],
    [-73.99776488304373, 40.674704343540796],
    [-73.99649105138268, 40.67744655650161],
    [-73.99458577567648, 40.67657344282233],
    [-73.9937551586398, 40.67783165243714],
    [-73.991865203933, 40.67694775436462],
    [-73.99042393563609, 40.67867819171676],
    [-73.98827461829725, 40.68186174712512],
    [-73.99042393563607, 40.68269744671996],
    [-73.98871236113611, 40.6852235692749],
];

/// Boundary CSV row; the file carries more columns (borough, assessment,
/// budget, year) consumed by the tables pipeline's upstream dataset.
#[derive(Debug, Deserialize)]
struct BoundaryRow {
    #[serde(rename = "F_ALL_BI_2")]
    name: String,
    #[serde(rename = "the_geom", default)]
    geom: String,
}

/// Axis-aligned bounding box in lon/lat degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

/// Named BID boundaries in insertion order.
///
/// Order matters: classification assigns a point to the first boundary
/// containing it, so overlap resolution follows whatever order the set was
/// built in.
#[derive(Debug, Clone, Default)]
pub struct BoundarySet {
    entries: Vec<(String, Vec<Ring>)>,
}

impl BoundarySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named boundary, replacing its rings if the name exists.
    pub fn insert(&mut self, name: impl Into<String>, rings: Vec<Ring>) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = rings;
        } else {
            self.entries.push((name, rings));
        }
    }

    /// Append the proposed Gowanus BID boundary.
    pub fn inject_gowanus(&mut self) {
        let ring: Ring = GOWANUS_BOUNDARY
            .iter()
            .map(|&[x, y]| Coord { x, y })
            .collect();
        self.insert(GOWANUS_BID, vec![ring]);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Ring])> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Minimal enclosing box over every ring vertex, expanded by
    /// [`BBOX_BUFFER_DEG`] on all four sides.
    ///
    /// Returns `None` for an empty boundary set; the downstream API query
    /// cannot be scoped without at least one vertex.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut min_lon = f64::INFINITY;
        let mut min_lat = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        let mut max_lat = f64::NEG_INFINITY;

        for (_, rings) in self.iter() {
            for ring in rings {
                for c in ring {
                    min_lon = min_lon.min(c.x);
                    max_lon = max_lon.max(c.x);
                    min_lat = min_lat.min(c.y);
                    max_lat = max_lat.max(c.y);
                }
            }
        }

        if !min_lon.is_finite() || !min_lat.is_finite() {
            return None;
        }

        Some(BoundingBox {
            min_lon: min_lon - BBOX_BUFFER_DEG,
            min_lat: min_lat - BBOX_BUFFER_DEG,
            max_lon: max_lon + BBOX_BUFFER_DEG,
            max_lat: max_lat + BBOX_BUFFER_DEG,
        })
    }
}

/// Load BID boundaries from the boundaries CSV.
///
/// Only rows whose trimmed name is in `targets` are kept; rows whose WKT
/// parses to zero rings are skipped.
pub fn load_bid_boundaries(path: &Path, targets: &[&str]) -> Result<BoundarySet> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open boundary CSV {}", path.display()))?;

    let mut set = BoundarySet::new();
    for row in reader.deserialize() {
        let row: BoundaryRow = row.context("failed to parse boundary CSV row")?;
        let name = row.name.trim();
        if !targets.contains(&name) {
            continue;
        }
        let rings = wkt::parse_multipolygon(&row.geom);
        if rings.is_empty() {
            debug!("No usable rings for {}", name);
            continue;
        }
        set.insert(name, rings);
    }

    info!("Loaded {} BID boundaries from CSV", set.len());
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> Ring {
        coords.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    #[test]
    fn test_bounding_box_buffer() {
        let mut set = BoundarySet::new();
        set.insert("a", vec![ring(&[(-74.0, 40.6), (-73.9, 40.7)])]);

        let bbox = set.bounding_box().unwrap();
        assert!((bbox.min_lon - -74.002).abs() < 1e-12);
        assert!((bbox.min_lat - 40.598).abs() < 1e-12);
        assert!((bbox.max_lon - -73.898).abs() < 1e-12);
        assert!((bbox.max_lat - 40.702).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box_empty_set() {
        let set = BoundarySet::new();
        assert!(set.bounding_box().is_none());
    }

    #[test]
    fn test_insert_replaces_and_keeps_order() {
        let mut set = BoundarySet::new();
        set.insert("a", vec![ring(&[(0.0, 0.0)])]);
        set.insert("b", vec![ring(&[(1.0, 1.0)])]);
        set.insert("a", vec![ring(&[(2.0, 2.0), (3.0, 3.0)])]);

        let names: Vec<&str> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        let (_, rings) = set.iter().next().unwrap();
        assert_eq!(rings[0].len(), 2);
    }

    #[test]
    fn test_inject_gowanus() {
        let mut set = BoundarySet::new();
        set.inject_gowanus();
        assert_eq!(set.len(), 1);
        let (name, rings) = set.iter().next().unwrap();
        assert_eq!(name, GOWANUS_BID);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 30);
    }
}
