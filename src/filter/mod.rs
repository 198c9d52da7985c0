//! Most-recent-update selection
//!
//! A family's snapshot files may contain several successive updates. Only the
//! rows belonging to the single most recent update (the maximum value of the
//! update column) are carried into the join.

use anyhow::Context;
use arrow::array::{Array, ArrayRef, BooleanArray, Int64Array};
use arrow::compute::kernels::cmp::eq;
use arrow::compute::{cast, concat_batches, filter as arrow_filter, max};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{CollateError, Result};
use crate::utils::find_update_column;

/// The update column of a batch as Int64 values, cast if needed
fn update_values(batch: &RecordBatch) -> Result<Int64Array> {
    let (_, update_idx) = find_update_column(batch)?;
    let column = cast(batch.column(update_idx), &DataType::Int64)
        .with_context(|| "Failed to cast update column to Int64")?;

    let values = column
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| CollateError::Schema("Update column is not an integer array".to_string()))?;

    Ok(values.clone())
}

/// Compute the maximum value of the update column across a table
///
/// # Errors
/// Returns `EmptyInput` if the table has no rows or only null updates, and a
/// schema error if the update column is missing or non-numeric
pub fn max_update(batch: &RecordBatch) -> Result<i64> {
    let values = update_values(batch)?;
    max(&values).ok_or_else(|| {
        CollateError::EmptyInput(
            "Cannot take the most recent update of a table with no update values".to_string(),
        )
    })
}

/// Build a mask selecting the rows at the given update value
///
/// Rows with a null update never match.
///
/// # Errors
/// Returns an error if the update column is missing or the comparison fails
pub fn latest_update_mask(batch: &RecordBatch, latest: i64) -> Result<BooleanArray> {
    let values = update_values(batch)?;
    let mask = eq(&values, &Int64Array::new_scalar(latest))
        .with_context(|| "Failed to compare update column against the most recent update")?;
    Ok(mask)
}

/// Filter a record batch based on a boolean mask
///
/// # Arguments
/// * `batch` - The record batch to filter
/// * `mask` - The boolean mask indicating which rows to keep
///
/// # Returns
/// A new record batch with only rows where mask is true
///
/// # Errors
/// Returns an error if filtering fails
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(CollateError::Schema(format!(
            "Mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        )));
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<arrow::error::Result<_>>()
        .with_context(|| "Failed to apply boolean filter to columns")?;

    Ok(RecordBatch::try_new(batch.schema(), filtered_columns)
        .with_context(|| "Failed to create filtered record batch")?)
}

/// Keep only the rows of a family table that belong to its most recent update
///
/// Concatenates the family's batches into one table, computes the maximum of
/// the update column, and retains exactly the rows at that maximum. Row
/// positions are contiguous from zero in the result. Applying this twice
/// yields the same table as applying it once.
///
/// Rows from different files sharing the maximum update are all retained; no
/// deduplication by seed happens here.
///
/// # Errors
/// Returns `EmptyInput` if there are no batches or no update values, and a
/// schema error if the update column is missing or the batches disagree on
/// schema
pub fn keep_latest_update(batches: &[RecordBatch]) -> Result<RecordBatch> {
    let Some(first) = batches.first() else {
        return Err(CollateError::EmptyInput(
            "Cannot filter a family with no record batches".to_string(),
        ));
    };

    let table = concat_batches(&first.schema(), batches)
        .with_context(|| "Failed to concatenate family record batches")?;

    let latest = max_update(&table)?;
    let mask = latest_update_mask(&table, latest)?;
    filter_record_batch(&table, &mask)
}
