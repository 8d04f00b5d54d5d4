//! Data preparation for the Gowanus BID civic map.
//!
//! Two batch pipelines share this library: the `bids-table` binary renders
//! HTML table fragments from citywide BID statistics, and the
//! `parcel-export` binary spatially joins PLUTO lots against BID boundaries
//! and exports JSON for the deck.gl map.

pub mod models;
pub mod pip;
pub mod socrata;
pub mod wkt;

pub use models::{BidRecord, Parcel};
pub use pip::{BoundarySet, BoundingBox};
