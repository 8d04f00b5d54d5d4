//! Citywide BID statistics download (dataset `7jdm-inj8`).

use anyhow::{Context, Result};
use tracing::info;

use super::SocrataError;
use crate::models::BidRecord;

pub const BIDS_CSV_URL: &str =
    "https://data.cityofnewyork.us/api/views/7jdm-inj8/rows.csv?accessType=DOWNLOAD";

/// Download and parse the BID statistics CSV export.
pub async fn fetch_bid_records(client: &reqwest::Client, url: &str) -> Result<Vec<BidRecord>> {
    info!("Downloading NYC BIDs data from {}", url);

    let response = client.get(url).send().await.map_err(SocrataError::from)?;
    if !response.status().is_success() {
        return Err(SocrataError::Status {
            url: url.to_string(),
            status: response.status(),
        }
        .into());
    }
    let body = response.text().await.map_err(SocrataError::from)?;

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: BidRecord = row.context("failed to parse BID CSV row")?;
        records.push(record);
    }

    info!("Fetched {} BID records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use crate::models::BidRecord;

    #[test]
    fn test_csv_column_mapping() {
        let csv_text = "\
F_ALL_BI_1,F_ALL_BI_2,F_ALL_BI_3,F_ALL_BI_6,F_ALL_BI_7,Year_Found
Brooklyn,DUMBO,91,1500000,2500,1997
Manhattan,Times Square,,,,
";
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let records: Vec<BidRecord> = reader.deserialize().map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].borough, "Brooklyn");
        assert_eq!(records[0].name, "DUMBO");
        assert_eq!(records[0].properties, Some(91.0));
        assert_eq!(records[0].assessment, Some(1_500_000.0));
        assert_eq!(records[0].year, Some(1997.0));

        // Empty numeric cells come back as None, not an error.
        assert_eq!(records[1].properties, None);
        assert_eq!(records[1].budget, None);
    }
}
