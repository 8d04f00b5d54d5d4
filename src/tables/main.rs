//! Brooklyn BIDs table generator.
//!
//! Downloads citywide BID statistics from NYC Open Data and renders two
//! HTML fragments: the Brooklyn table embedded in the map page and the
//! borough-level overview.

mod render;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bidmap::socrata::{self, BIDS_CSV_URL};

#[derive(Parser, Debug)]
#[command(name = "bids-table")]
#[command(about = "Generate BID HTML table fragments from NYC Open Data")]
struct Args {
    /// BID statistics CSV endpoint
    #[arg(long, default_value = BIDS_CSV_URL)]
    bids_url: String,

    /// Output path for the Brooklyn table fragment
    #[arg(long, default_value = "../brooklyn_bids_table_snippet.html")]
    table_out: PathBuf,

    /// Output path for the borough overview fragment
    #[arg(long, default_value = "../bid_overview_table_snippet.html")]
    overview_out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let client = socrata::http_client();
    let records = socrata::fetch_bid_records(&client, &args.bids_url).await?;

    let brooklyn: Vec<_> = records
        .iter()
        .filter(|r| r.borough == "Brooklyn")
        .collect();
    info!("Found {} Brooklyn BIDs", brooklyn.len());
    for record in &brooklyn {
        info!(
            "  - {}: year {}, {} properties",
            record.name,
            render::format_year(record.year),
            record
                .properties
                .map_or_else(|| "—".to_string(), |p| (p as i64).to_string()),
        );
    }

    let table_html = render::brooklyn_table(&records);
    fs::write(&args.table_out, &table_html)
        .with_context(|| format!("failed to write {}", args.table_out.display()))?;
    info!("Table HTML saved to {}", args.table_out.display());

    let overview_html = render::overview_table(&records);
    fs::write(&args.overview_out, &overview_html)
        .with_context(|| format!("failed to write {}", args.overview_out.display()))?;
    info!(
        "Borough overview HTML saved to {}",
        args.overview_out.display()
    );

    Ok(())
}
