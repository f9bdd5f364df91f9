//! Command-line surface: single-item generation and the batch sync run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::catalog::SupabaseCatalog;
use crate::config::load_config;
use crate::encode::{artifact_path, Code128Encoder, Encoder};
use crate::synchronise;

/// Subdirectory of the output root holding the artifact mirror. The
/// filename inside it is the index: `<output_root>/qrcodes/<barcode>.png`.
const ARTIFACT_SUBDIR: &str = "qrcodes";

#[derive(Parser)]
#[clap(
    name = "stock-barcodes",
    version,
    about = "Render Code 128 barcode images for stock items and mirror the catalog to disk"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a single barcode image to <OUTPUT_STEM>.png
    Generate {
        /// Identifier to encode (printable ASCII)
        identifier: String,
        /// Output path without extension
        output_stem: PathBuf,
    },
    /// Regenerate barcode images for every item in the stock catalog
    Sync,
}

/// Extracted CLI logic entrypoint, shared by main() and integration tests.
/// Per-item failures inside `sync` do not surface as an `Err` here; only
/// configuration and catalog fetch failures do.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            identifier,
            output_stem,
        } => {
            let encoder = Code128Encoder::default();
            encoder
                .encode(&identifier, &output_stem)
                .with_context(|| format!("could not generate a barcode for {identifier:?}"))?;
            println!(
                "Barcode successfully saved to: {}",
                artifact_path(&output_stem).display()
            );
            Ok(())
        }
        Commands::Sync => {
            let config = load_config()?;
            let catalog = SupabaseCatalog::new(&config);
            let encoder = Code128Encoder::default();
            let output_dir = config.output_root.join(ARTIFACT_SUBDIR);

            println!("Fetching items from {}...", config.supabase_url);
            let summary = synchronise::run(&catalog, &encoder, &output_dir).await?;

            for outcome in &summary.failed {
                if let Some(err) = &outcome.error {
                    eprintln!("Failed to generate for {}: {err}", outcome.identifier);
                }
            }
            if summary.skipped > 0 {
                println!("Skipped {} items without a barcode.", summary.skipped);
            }
            println!(
                "Regeneration complete. Successfully generated {}/{} barcodes.",
                summary.succeeded, summary.total_fetched
            );
            Ok(())
        }
    }
}
