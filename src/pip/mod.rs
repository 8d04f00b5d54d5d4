//! BID boundary loading and point-in-polygon classification.
//!
//! Boundaries load once from the boundaries CSV (plus one injected literal
//! boundary for the proposed Gowanus BID) and stay immutable for the run.

mod boundary;
mod geometry;

pub use boundary::{
    load_bid_boundaries, BoundarySet, BoundingBox, BBOX_BUFFER_DEG, BROOKLYN_BIDS, GOWANUS_BID,
};
pub use geometry::point_in_ring;
