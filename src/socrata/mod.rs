//! Clients for the NYC Open Data (Socrata) endpoints.
//!
//! Both pipelines are one-shot batch runs: the first transport error or
//! non-2xx status aborts the whole run before any output file is written.
//! Nothing is retried.

mod bids;
mod pluto;

pub use bids::{fetch_bid_records, BIDS_CSV_URL};
pub use pluto::{Pager, PlutoClient, PAGE_SIZE, PLUTO_API_URL};

use std::time::Duration;

use thiserror::Error;

/// Fixed per-request timeout; a stalled request fails the run.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum SocrataError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Shared HTTP client for all Open Data requests.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("bidmap/0.1 (gowanus civic mapping)")
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}
