//! Batch synchronisation of the catalog with the on-disk artifact mirror.
//!
//! Linear pipeline: fetch every stock item, skip the ones without an
//! assigned barcode, encode the rest one at a time, and fold the outcomes
//! into a [`BatchSummary`]. A catalog fetch failure is fatal and yields no
//! summary at all; a per-item encode failure is recorded and the run
//! continues. The fold makes the counting invariant
//! `total_fetched == skipped + succeeded + failed.len()` hold by
//! construction.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

use crate::catalog::{CatalogError, CatalogReader};
use crate::encode::{artifact_path, EncodeError, Encoder};

/// Result of one encode attempt, immutable once produced.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub identifier: String,
    /// Where the artifact was (or would have been) written.
    pub output_path: PathBuf,
    /// `None` means the encode succeeded.
    pub error: Option<EncodeError>,
}

impl GenerationOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate of one batch run. `failed` keeps the catalog's fetch order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total_fetched: usize,
    pub skipped: usize,
    pub succeeded: usize,
    pub failed: Vec<GenerationOutcome>,
}

/// Errors that abort the whole batch. Per-item encode failures are not
/// fatal and live in [`BatchSummary::failed`] instead.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to fetch the stock catalog: {0}")]
    Fetch(#[from] CatalogError),
}

/// Runs one full synchronisation pass: fetch, filter, encode, aggregate.
///
/// Strictly sequential; every artifact is fully written before the next item
/// is considered. Items are processed in the order the catalog returned
/// them, with no resorting.
pub async fn run<C, E>(
    catalog: &C,
    encoder: &E,
    output_dir: &Path,
) -> Result<BatchSummary, SyncError>
where
    C: CatalogReader + ?Sized,
    E: Encoder + ?Sized,
{
    let items = catalog.list_items().await.map_err(|e| {
        error!(error = %e, "Aborting batch: catalog fetch failed");
        SyncError::Fetch(e)
    })?;

    let total_fetched = items.len();
    info!(total_fetched, output_dir = %output_dir.display(), "Starting barcode regeneration");

    let summary = items.into_iter().fold(
        BatchSummary {
            total_fetched,
            ..BatchSummary::default()
        },
        |mut summary, item| {
            match item.identifier() {
                None => {
                    info!(id = %item.id, "Skipping item without barcode");
                    summary.skipped += 1;
                }
                Some(identifier) => {
                    let outcome = encode_one(encoder, identifier, output_dir);
                    if outcome.succeeded() {
                        summary.succeeded += 1;
                    } else {
                        summary.failed.push(outcome);
                    }
                }
            }
            summary
        },
    );

    info!(
        succeeded = summary.succeeded,
        skipped = summary.skipped,
        failed = summary.failed.len(),
        "Barcode regeneration complete"
    );
    Ok(summary)
}

fn encode_one<E>(encoder: &E, identifier: &str, output_dir: &Path) -> GenerationOutcome
where
    E: Encoder + ?Sized,
{
    let stem = output_dir.join(identifier);
    let result = encoder.encode(identifier, &stem);
    if let Err(err) = &result {
        error!(identifier, error = %err, "Barcode generation failed, continuing with next item");
    }
    GenerationOutcome {
        identifier: identifier.to_string(),
        output_path: artifact_path(&stem),
        error: result.err(),
    }
}
