//! BID statistics record from the NYC Open Data CSV export.

use serde::Deserialize;

/// One row of the citywide BID dataset (`7jdm-inj8`).
///
/// The CSV export keeps the source shapefile's opaque column names; the
/// serde renames give them meaning. Numeric columns may be empty for BIDs
/// with incomplete reporting, so they deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BidRecord {
    #[serde(rename = "F_ALL_BI_1")]
    pub borough: String,

    #[serde(rename = "F_ALL_BI_2")]
    pub name: String,

    /// Number of properties in the district.
    #[serde(rename = "F_ALL_BI_3")]
    pub properties: Option<f64>,

    /// Total assessed value, dollars.
    #[serde(rename = "F_ALL_BI_6")]
    pub assessment: Option<f64>,

    /// Annual budget, dollars.
    #[serde(rename = "F_ALL_BI_7")]
    pub budget: Option<f64>,

    #[serde(rename = "Year_Found")]
    pub year: Option<f64>,
}
