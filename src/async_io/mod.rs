//! Async snapshot loading utilities
//! Provides concurrent loading of multiple snapshot families

use std::path::PathBuf;
use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use futures::stream::{self, StreamExt};

use crate::config::CollateConfig;
use crate::error::Result;
use crate::family::FamilyLoader;

/// Load one family's snapshot files on a blocking worker thread
///
/// The synchronous loader already reads its files in parallel on the rayon
/// pool; this wrapper only keeps the tokio runtime responsive while several
/// families load at once.
///
/// # Errors
/// Returns an error if loading fails or the worker task is cancelled
pub async fn load_family_async(
    family: Arc<dyn FamilyLoader>,
    dir: PathBuf,
    config: CollateConfig,
) -> Result<Vec<RecordBatch>> {
    tokio::task::spawn_blocking(move || family.load(&dir, &config))
        .await
        .map_err(|e| anyhow::anyhow!("Family load task failed: {e}"))?
}

/// Load several families concurrently
///
/// Results are returned in input order. Concurrency is bounded by the
/// available CPU count; loading order has no effect on the collated output.
///
/// # Errors
/// Returns the first error any family load produced
pub async fn load_families_async(
    families: &[(Arc<dyn FamilyLoader>, PathBuf)],
    config: &CollateConfig,
) -> Result<Vec<Vec<RecordBatch>>> {
    let concurrency = num_cpus::get();

    let results: Vec<Result<Vec<RecordBatch>>> = stream::iter(families.iter().cloned())
        .map(|(family, dir)| {
            let config = config.clone();
            async move { load_family_async(family, dir, config).await }
        })
        .buffered(concurrency)
        .collect()
        .await;

    results.into_iter().collect()
}
