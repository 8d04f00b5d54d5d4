//! Shared record types for both pipelines.

mod bid;
mod geojson;
mod parcel;

pub use bid::BidRecord;
pub use geojson::{BoundaryFeature, BoundaryProperties, FeatureCollection, MultiPolygonGeometry};
pub use parcel::{Parcel, PlutoRow};
