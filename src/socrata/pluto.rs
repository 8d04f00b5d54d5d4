//! Paginated PLUTO lot fetch (resource `64uk-42ks`).

use tracing::{debug, info};

use super::SocrataError;
use crate::models::PlutoRow;
use crate::pip::BoundingBox;

pub const PLUTO_API_URL: &str = "https://data.cityofnewyork.us/resource/64uk-42ks.json";

/// Fields selected from the PLUTO resource, in export order.
pub const PLUTO_FIELDS: &str = "bbl,address,latitude,longitude,assesstot,assessland,\
                                bldgclass,landuse,yearbuilt,numfloors,lotarea";

pub const PAGE_SIZE: usize = 50_000;

/// Offset cursor for Socrata `$limit`/`$offset` pagination.
///
/// A page shorter than the page size (or empty) is the last one. Results
/// are ordered by `bbl` server-side so offsets are stable across requests.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    page_size: usize,
    offset: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Record a page of `fetched` rows; `false` means pagination is done.
    pub fn advance(&mut self, fetched: usize) -> bool {
        self.offset += fetched;
        fetched == self.page_size && fetched > 0
    }
}

/// Client for the PLUTO Socrata resource.
pub struct PlutoClient {
    client: reqwest::Client,
    base_url: String,
    page_size: usize,
}

impl PlutoClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, page_size: usize) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            page_size,
        }
    }

    /// Fetch every Brooklyn lot inside the bounding box, page by page.
    ///
    /// All pages accumulate in memory; the whole result set is at most a
    /// few tens of thousands of rows for any plausible boundary set.
    pub async fn fetch_all(&self, bbox: &BoundingBox) -> Result<Vec<PlutoRow>, SocrataError> {
        let where_clause = format!(
            "borough='BK' AND latitude IS NOT NULL AND longitude IS NOT NULL \
             AND latitude >= {} AND latitude <= {} \
             AND longitude >= {} AND longitude <= {}",
            bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon
        );

        let mut rows = Vec::new();
        let mut pager = Pager::new(self.page_size);
        loop {
            debug!("Fetching PLUTO page at offset {}", pager.offset());
            let batch = self.fetch_page(&where_clause, pager.offset()).await?;
            let fetched = batch.len();
            rows.extend(batch);
            info!("Got {} rows (total so far: {})", fetched, rows.len());
            if !pager.advance(fetched) {
                break;
            }
        }

        info!("Total PLUTO rows fetched: {}", rows.len());
        Ok(rows)
    }

    async fn fetch_page(
        &self,
        where_clause: &str,
        offset: usize,
    ) -> Result<Vec<PlutoRow>, SocrataError> {
        let limit = self.page_size.to_string();
        let offset = offset.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("$select", PLUTO_FIELDS),
                ("$where", where_clause),
                ("$limit", limit.as_str()),
                ("$offset", offset.as_str()),
                ("$order", "bbl"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SocrataError::Status {
                url: self.base_url.clone(),
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }
}
