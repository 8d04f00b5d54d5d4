//! Per-parcel assessment export for the 3D deck.gl map.
//!
//! Loads BID boundaries from the boundaries CSV, fetches PLUTO lots within
//! their bounding box, classifies each lot into a BID by point-in-polygon,
//! and writes the map's JSON data file.

mod assemble;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hashbrown::HashMap;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bidmap::pip::{self, BROOKLYN_BIDS};
use bidmap::socrata::{self, PlutoClient, PAGE_SIZE, PLUTO_API_URL};

#[derive(Parser, Debug)]
#[command(name = "parcel-export")]
#[command(about = "Export per-parcel assessment data for the deck.gl map")]
struct Args {
    /// Boundaries CSV with the WKT geometry column
    #[arg(long, default_value = "DATA/NYC_BIDS_09112015.csv")]
    bid_csv: PathBuf,

    /// Output JSON path
    #[arg(long, default_value = "DATA/gowanus_parcels.json")]
    output: PathBuf,

    /// PLUTO Socrata resource URL
    #[arg(long, default_value = PLUTO_API_URL)]
    pluto_url: String,

    /// Socrata page size
    #[arg(long, default_value_t = PAGE_SIZE)]
    page_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Step A: Loading BID boundaries...");
    let mut boundaries = pip::load_bid_boundaries(&args.bid_csv, &BROOKLYN_BIDS)?;
    // The proposed Gowanus BID is not in the city dataset.
    boundaries.inject_gowanus();
    info!("Loaded {} BID boundaries:", boundaries.len());
    for (name, rings) in boundaries.iter() {
        info!("  - {} ({} polygon part(s))", name, rings.len());
    }

    let bbox = boundaries
        .bounding_box()
        .context("boundary set is empty; cannot scope the PLUTO query")?;
    info!(
        "Bounding box: lon [{:.4}, {:.4}], lat [{:.4}, {:.4}]",
        bbox.min_lon, bbox.max_lon, bbox.min_lat, bbox.max_lat
    );

    info!("Step B: Fetching PLUTO data...");
    let client = PlutoClient::new(socrata::http_client(), &args.pluto_url, args.page_size);
    let rows = client.fetch_all(&bbox).await?;

    info!("Step C: Spatial filtering (point-in-polygon)...");
    let colors = assemble::placeholder_colors();

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let mut parcels = Vec::new();
    let mut bid_counts: HashMap<String, usize> = HashMap::new();
    for row in &rows {
        pb.inc(1);
        if let Some(parcel) = assemble::build_parcel(row, &boundaries, &colors) {
            *bid_counts.entry(parcel.bid_name.clone()).or_default() += 1;
            parcels.push(parcel);
        }
    }
    pb.finish_with_message("Classification complete");

    info!(
        "Matched {} lots across {} BIDs:",
        parcels.len(),
        bid_counts.len()
    );
    let mut counts: Vec<_> = bid_counts.iter().collect();
    counts.sort_by_key(|&(_, count)| std::cmp::Reverse(*count));
    for (name, count) in counts {
        info!("  - {}: {} lots", name, count);
    }

    info!("Step D: Exporting JSON...");
    let doc = assemble::ExportDoc {
        parcels,
        bid_boundaries: assemble::boundaries_geojson(&boundaries, &colors),
    };
    let json = serde_json::to_string(&doc).context("failed to serialize export document")?;
    fs::write(&args.output, &json)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(
        "Saved {} ({} parcels, {:.1} MB)",
        args.output.display(),
        doc.parcels.len(),
        json.len() as f64 / (1024.0 * 1024.0)
    );

    Ok(())
}
