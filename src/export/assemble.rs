//! Parcel assembly: field coercion, classification, and the export document.

use hashbrown::HashMap;
use serde::Serialize;

use bidmap::models::{BoundaryFeature, FeatureCollection, Parcel, PlutoRow};
use bidmap::pip::{BoundarySet, BROOKLYN_BIDS};

/// Neutral gray for BIDs without a palette entry.
pub const DEFAULT_COLOR: [u8; 3] = [128, 128, 128];

pub type ColorMap = HashMap<&'static str, [u8; 3]>;

/// Placeholder palette: the front-end assigns diverging colors at render
/// time, so every tracked BID currently maps to the same gray.
pub fn placeholder_colors() -> ColorMap {
    BROOKLYN_BIDS.iter().map(|&n| (n, DEFAULT_COLOR)).collect()
}

fn bid_color(colors: &ColorMap, name: &str) -> [u8; 3] {
    colors.get(name).copied().unwrap_or(DEFAULT_COLOR)
}

/// Parse an optional Socrata string field as a number, defaulting to zero
/// when the field is missing, empty, or non-numeric.
fn num_or_zero(field: Option<&str>) -> f64 {
    field
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Convert a raw PLUTO row into an export parcel.
///
/// Returns `None` when the row has no usable location (a missing,
/// unparseable, or exactly-zero coordinate — zero means "no location data"
/// in the source feed) or when the point falls outside every tracked
/// boundary. All other field problems coerce to zero-valued defaults.
pub fn build_parcel(
    row: &PlutoRow,
    boundaries: &BoundarySet,
    colors: &ColorMap,
) -> Option<Parcel> {
    let lon: f64 = row.longitude.as_deref()?.trim().parse().ok()?;
    let lat: f64 = row.latitude.as_deref()?.trim().parse().ok()?;
    if lon == 0.0 || lat == 0.0 {
        return None;
    }

    let bid_name = boundaries.classify(lon, lat)?.to_string();
    let color = bid_color(colors, &bid_name);

    Some(Parcel {
        lat,
        lon,
        assesstot: num_or_zero(row.assesstot.as_deref()),
        assessland: num_or_zero(row.assessland.as_deref()),
        address: row.address.clone().unwrap_or_default(),
        bbl: row.bbl.clone().unwrap_or_default(),
        bid_name,
        bldgclass: row.bldgclass.clone().unwrap_or_default(),
        landuse: row.landuse.clone().unwrap_or_default(),
        yearbuilt: num_or_zero(row.yearbuilt.as_deref()) as i64,
        numfloors: num_or_zero(row.numfloors.as_deref()),
        lotarea: num_or_zero(row.lotarea.as_deref()),
        color,
    })
}

/// Convert the boundary set to the GeoJSON overlay FeatureCollection.
pub fn boundaries_geojson(boundaries: &BoundarySet, colors: &ColorMap) -> FeatureCollection {
    let features = boundaries
        .iter()
        .map(|(name, rings)| BoundaryFeature::multipolygon(name, bid_color(colors, name), rings))
        .collect();
    FeatureCollection::new(features)
}

/// Final export document consumed by the map page.
#[derive(Debug, Serialize)]
pub struct ExportDoc {
    pub parcels: Vec<Parcel>,
    pub bid_boundaries: FeatureCollection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidmap::wkt::Ring;
    use geo_types::Coord;

    fn ring(coords: &[(f64, f64)]) -> Ring {
        coords.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    fn two_bid_set() -> BoundarySet {
        let mut set = BoundarySet::new();
        set.insert(
            "BID A",
            vec![ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])],
        );
        set.insert(
            "BID B",
            vec![ring(&[(10.0, 10.0), (10.0, 11.0), (11.0, 11.0), (11.0, 10.0)])],
        );
        set
    }

    fn row_at(lon: &str, lat: &str) -> PlutoRow {
        PlutoRow {
            longitude: Some(lon.to_string()),
            latitude: Some(lat.to_string()),
            bbl: Some("3001230045".to_string()),
            ..PlutoRow::default()
        }
    }

    #[test]
    fn test_num_or_zero() {
        assert_eq!(num_or_zero(Some("1250000")), 1_250_000.0);
        assert_eq!(num_or_zero(Some(" 2.5 ")), 2.5);
        assert_eq!(num_or_zero(Some("")), 0.0);
        assert_eq!(num_or_zero(Some("n/a")), 0.0);
        assert_eq!(num_or_zero(None), 0.0);
    }

    #[test]
    fn test_rows_without_location_are_dropped() {
        let set = two_bid_set();
        let colors = placeholder_colors();

        assert!(build_parcel(&row_at("0", "0.5"), &set, &colors).is_none());
        assert!(build_parcel(&row_at("0.5", "0"), &set, &colors).is_none());
        assert!(build_parcel(&row_at("bogus", "0.5"), &set, &colors).is_none());
        assert!(build_parcel(&PlutoRow::default(), &set, &colors).is_none());
    }

    #[test]
    fn test_bad_numeric_fields_coerce_to_zero() {
        let set = two_bid_set();
        let colors = placeholder_colors();

        let mut row = row_at("0.5", "0.5");
        row.assesstot = Some("not a number".to_string());
        row.yearbuilt = None;
        row.numfloors = Some(String::new());

        let parcel = build_parcel(&row, &set, &colors).unwrap();
        assert_eq!(parcel.assesstot, 0.0);
        assert_eq!(parcel.yearbuilt, 0);
        assert_eq!(parcel.numfloors, 0.0);
        assert_eq!(parcel.bbl, "3001230045");
        assert_eq!(parcel.color, DEFAULT_COLOR);
    }

    #[test]
    fn test_two_bids_three_rows_end_to_end() {
        let set = two_bid_set();
        let colors = placeholder_colors();

        let rows = vec![
            row_at("0.5", "0.5"),   // inside BID A
            row_at("10.5", "10.5"), // inside BID B
            row_at("5.0", "5.0"),   // outside both
        ];

        let parcels: Vec<Parcel> = rows
            .iter()
            .filter_map(|r| build_parcel(r, &set, &colors))
            .collect();

        assert_eq!(parcels.len(), 2);
        assert_eq!(parcels[0].bid_name, "BID A");
        assert_eq!(parcels[1].bid_name, "BID B");

        let doc = ExportDoc {
            parcels,
            bid_boundaries: boundaries_geojson(&set, &colors),
        };
        assert_eq!(doc.bid_boundaries.features.len(), 2);

        let json: serde_json::Value = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["parcels"].as_array().unwrap().len(), 2);
        assert_eq!(
            json["bid_boundaries"]["type"].as_str(),
            Some("FeatureCollection")
        );
        assert_eq!(
            json["bid_boundaries"]["features"][0]["geometry"]["type"].as_str(),
            Some("MultiPolygon")
        );
        assert_eq!(
            json["bid_boundaries"]["features"][0]["properties"]["name"].as_str(),
            Some("BID A")
        );
    }
}
