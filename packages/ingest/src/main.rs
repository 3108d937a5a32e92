#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the road geometry ingestion tool.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use road_risk_database::{db, queries, run_migrations};

#[derive(Parser)]
#[command(name = "road_risk_ingest", about = "Road geometry ingestion tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import roads from a `GeoJSON` export file
    Import {
        /// Path to the export file (e.g., "export.geojson")
        file: PathBuf,
    },
    /// Recompute current risk for all roads from the stored issues
    Recompute,
    /// Run database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let db = db::connect_from_env().await?;

    match cli.command {
        Commands::Import { file } => {
            let start = Instant::now();
            run_migrations(db.as_ref()).await?;

            let summary = road_risk_ingest::import_geojson(db.as_ref(), &file).await?;
            log::info!(
                "Imported {} roads ({} of {} features skipped) in {:?}",
                summary.inserted,
                summary.skipped,
                summary.total,
                start.elapsed()
            );
        }
        Commands::Recompute => {
            let start = Instant::now();
            let updated = queries::recompute_all_road_risks(db.as_ref()).await?;
            log::info!("Recomputed current risk for {updated} roads in {:?}", start.elapsed());
        }
        Commands::Migrate => {
            run_migrations(db.as_ref()).await?;
        }
    }

    Ok(())
}
