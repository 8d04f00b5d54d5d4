//! PLUTO rows and the flattened parcel export record.

use serde::{Deserialize, Serialize};

/// Raw PLUTO lot row as returned by the Socrata API.
///
/// Socrata serializes every field as a string and omits null fields from
/// the JSON entirely, so everything here is optional. Coercion to numbers
/// happens when the row is assembled into a [`Parcel`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlutoRow {
    #[serde(default)]
    pub bbl: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub assesstot: Option<String>,
    #[serde(default)]
    pub assessland: Option<String>,
    #[serde(default)]
    pub bldgclass: Option<String>,
    #[serde(default)]
    pub landuse: Option<String>,
    #[serde(default)]
    pub yearbuilt: Option<String>,
    #[serde(default)]
    pub numfloors: Option<String>,
    #[serde(default)]
    pub lotarea: Option<String>,
}

/// Flattened per-parcel record consumed by the deck.gl ColumnLayer.
#[derive(Debug, Clone, Serialize)]
pub struct Parcel {
    pub lat: f64,
    pub lon: f64,
    pub assesstot: f64,
    pub assessland: f64,
    pub address: String,
    pub bbl: String,
    pub bid_name: String,
    pub bldgclass: String,
    pub landuse: String,
    pub yearbuilt: i64,
    pub numfloors: f64,
    pub lotarea: f64,
    /// RGB display color for the lot's BID.
    pub color: [u8; 3],
}
