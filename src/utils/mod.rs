//! Utility functions for working with snapshot CSV files

use std::path::Path;

use arrow::record_batch::RecordBatch;

use crate::error::{CollateError, Result};

pub mod test_utils;

/// Default batch size for CSV reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var("COLLATE_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
}

/// Validates that a directory exists and is a directory
///
/// # Errors
/// Returns an error if the directory does not exist or is not a directory
pub fn validate_directory(dir: &Path) -> Result<()> {
    if !dir.exists() || !dir.is_dir() {
        return Err(CollateError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Directory does not exist: {}", dir.display()),
        )));
    }
    Ok(())
}

/// Find a column name and index in a record batch
///
/// Tries the given name first, then the uppercase spelling some collection
/// tools emit.
///
/// # Errors
/// Returns an error if the column cannot be found
pub fn find_column(batch: &RecordBatch, name: &str) -> Result<(String, usize)> {
    let upper = name.to_uppercase();
    let col_name = match batch.schema().field_with_name(name) {
        Ok(_) => name.to_string(),
        Err(_) => match batch.schema().field_with_name(&upper) {
            Ok(_) => upper,
            Err(_) => {
                return Err(CollateError::Metadata(format!(
                    "Column '{name}' not found in record batch"
                )));
            }
        },
    };

    let col_idx = batch.schema().index_of(&col_name).map_err(|e| {
        CollateError::Metadata(format!("Column '{name}' not found in record batch: {e}"))
    })?;

    Ok((col_name, col_idx))
}

/// Find the update column name and index in a record batch
///
/// # Errors
/// Returns an error if the update column cannot be found or accessed
pub fn find_update_column(batch: &RecordBatch) -> Result<(String, usize)> {
    find_column(batch, "update")
}

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory that was operated on
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<std::time::Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!(
            "Successfully {} {} items from {} in {:?}",
            operation,
            items,
            path.display(),
            duration
        );
    } else {
        log::info!(
            "Successfully {} {} items from {}",
            operation,
            items,
            path.display()
        );
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
