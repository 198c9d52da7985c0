//! Snapshot CSV file loading with schema inference and validation.

use std::fs::File;
use std::io::Seek;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use indicatif::{ParallelProgressIterator, ProgressBar};
use itertools::Itertools;
use rayon::prelude::*;

use crate::config::CollateConfig;
use crate::error::{CollateError, Result};
use crate::schema::{
    RequiredColumn, SchemaCompatibilityReport, find_schema_incompatibilities,
    validate_required_columns,
};
use crate::utils::{
    DEFAULT_BATCH_SIZE, get_batch_size, log_operation_complete, log_operation_start, log_warning,
    validate_directory,
};

/// Number of rows inspected when inferring a file's schema
const SCHEMA_INFERENCE_DEPTH: usize = 1024;

/// Find all snapshot CSV files for one family in a directory
///
/// Files are matched by `<prefix>*.csv`, non-recursively. Name order keeps
/// repeated runs deterministic; downstream stages are order-independent.
///
/// # Errors
/// Returns an error if directory reading fails
pub fn find_snapshot_files(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for snapshot files in", dir);

    validate_directory(dir)?;

    let snapshot_files = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .par_bridge()
        .filter_map(|entry_result| match entry_result {
            Ok(entry) => {
                let path = entry.path();
                let matches = path.is_file()
                    && path.extension().is_some_and(|ext| ext == "csv")
                    && path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| name.starts_with(prefix));
                matches.then_some(Ok(path))
            }
            Err(e) => Some(Err(CollateError::Io(e))),
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .sorted()
        .collect_vec();

    if snapshot_files.is_empty() {
        log_warning("No snapshot files found in directory", Some(dir));
    } else {
        log_operation_complete("found", dir, snapshot_files.len(), None);
    }

    Ok(snapshot_files)
}

/// Read a single snapshot CSV file into Arrow record batches
///
/// The schema is inferred from the file contents; a header row is required.
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `batch_size` - Optional batch size for reading (defaults to `DEFAULT_BATCH_SIZE`)
///
/// # Returns
/// The inferred schema and a vector of `RecordBatch` objects
///
/// # Errors
/// Returns an error if the file cannot be opened or parsed as CSV
pub fn read_snapshot_file(
    path: &Path,
    batch_size: Option<usize>,
) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let start = std::time::Instant::now();
    log_operation_start("Reading snapshot file", path);

    let mut file = File::open(path).map_err(|e| {
        CollateError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Failed to open file {}: {}", path.display(), e),
        ))
    })?;

    let format = Format::default().with_header(true);
    let (schema, _) = format
        .infer_schema(&mut file, Some(SCHEMA_INFERENCE_DEPTH))
        .with_context(|| format!("Failed to infer schema for {}", path.display()))?;
    file.rewind()?;

    let schema = Arc::new(schema);

    // Use provided batch size, then env var, then default
    let batch_size = batch_size.or_else(get_batch_size).unwrap_or(DEFAULT_BATCH_SIZE);

    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_format(format)
        .with_batch_size(batch_size)
        .build(file)
        .with_context(|| format!("Failed to build CSV reader for {}", path.display()))?;

    let mut batches = Vec::new();
    for batch_result in reader {
        let batch = batch_result
            .with_context(|| format!("Failed to read record batch from {}", path.display()))?;
        batches.push(batch);
    }

    log_operation_complete("read", path, batches.len(), Some(start.elapsed()));
    Ok((schema, batches))
}

/// Load all snapshot files for one family from a directory in parallel
///
/// Every matching file is read on the rayon pool, validated against the
/// family's required columns, and checked for schema compatibility against
/// the first file, so that the batches can later be concatenated into one
/// table.
///
/// # Errors
/// Returns `EmptyInput` if no files match, a schema error if validation or
/// the compatibility check fails, and a read error if any file cannot be
/// parsed
pub fn load_snapshot_files(
    dir: &Path,
    family: &str,
    prefix: &str,
    required: &[RequiredColumn],
    config: &CollateConfig,
) -> Result<Vec<RecordBatch>> {
    let snapshot_files = find_snapshot_files(dir, prefix)?;

    if snapshot_files.is_empty() {
        return Err(CollateError::EmptyInput(format!(
            "No {family} files matching {prefix}*.csv in {}",
            dir.display()
        )));
    }

    let progress = ProgressBar::new(snapshot_files.len() as u64);
    let per_file: Vec<Result<(SchemaRef, Vec<RecordBatch>)>> = snapshot_files
        .par_iter()
        .progress_with(progress)
        .map(|path| {
            let (schema, batches) = read_snapshot_file(path, Some(config.batch_size))?;
            if config.validate_schema {
                validate_required_columns(&schema, required, path)?;
            }
            Ok((schema, batches))
        })
        .collect();

    // Combine all the results, propagating any errors and comparing every
    // file's schema against the first one
    let mut report = SchemaCompatibilityReport {
        compatible: true,
        issues: vec![],
    };
    let mut reference: Option<(&PathBuf, SchemaRef)> = None;
    let mut combined_batches = Vec::new();

    for (path, result) in snapshot_files.iter().zip(per_file) {
        let (schema, batches) =
            result.with_context(|| format!("Error processing file {}", path.display()))?;

        if let Some((reference_path, reference_schema)) = &reference {
            let issues = find_schema_incompatibilities(
                reference_schema,
                &schema,
                &reference_path.to_string_lossy(),
                &path.to_string_lossy(),
            );
            if !issues.is_empty() {
                report.compatible = false;
                report.issues.extend(issues);
            }
        } else {
            reference = Some((path, schema));
        }

        combined_batches.extend(batches);
    }

    if !report.compatible {
        if config.fail_on_schema_incompatibility {
            let detail = report
                .issues
                .iter()
                .map(|issue| issue.description.as_str())
                .join("; ");
            return Err(CollateError::Schema(format!(
                "Incompatible {family} file schemas: {detail}"
            )));
        }
        for issue in &report.issues {
            log_warning(&issue.description, None);
        }
    }

    log::info!(
        "Successfully loaded {} batches from {} {} files",
        combined_batches.len(),
        snapshot_files.len(),
        family
    );

    Ok(combined_batches)
}
