//! Shared helpers for building snapshot fixtures in tests

use std::path::Path;

use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::config::CollateConfig;
use crate::error::Result;

/// Build a record batch from typed fixture rows
///
/// The schema is traced from the rows themselves, the same way the CSV
/// reader infers one from file contents.
///
/// # Errors
/// Returns an error if tracing or conversion fails (e.g. no rows)
pub fn rows_to_batch<T: Serialize>(rows: &[T]) -> Result<RecordBatch> {
    let fields = Vec::<FieldRef>::from_samples(&rows, TracingOptions::default())?;
    Ok(serde_arrow::to_record_batch(&fields, &rows)?)
}

/// Write a snapshot CSV fixture with a header row
///
/// # Errors
/// Returns an error if the file cannot be written
pub fn write_snapshot_csv(path: &Path, header: &str, rows: &[&str]) -> Result<()> {
    let mut contents = String::with_capacity(header.len() + rows.len() * 16);
    contents.push_str(header);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Get a collation configuration pointed at fixture directories
#[must_use]
pub fn test_config(phenotype_dir: &Path, genotype_dir: &Path, population_dir: &Path) -> CollateConfig {
    CollateConfig {
        phenotype_dir: phenotype_dir.to_path_buf(),
        genotype_dir: genotype_dir.to_path_buf(),
        population_dir: population_dir.to_path_buf(),
        ..Default::default()
    }
}
