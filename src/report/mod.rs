//! Reporting a sorted view of one joined column

use anyhow::Context;
use arrow::array::{Array, Float64Array};
use arrow::compute::{SortOptions, cast, sort};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::error::{CollateError, Result};
use crate::utils::find_column;

/// Extract a column as Float64 values, sorted ascending with nulls last
///
/// # Errors
/// Returns an error if the column is missing or cannot be cast to Float64
pub fn sorted_column(batch: &RecordBatch, name: &str) -> Result<Float64Array> {
    let (_, col_idx) = find_column(batch, name)?;
    let column = cast(batch.column(col_idx), &DataType::Float64)
        .with_context(|| format!("Failed to cast column '{name}' to Float64"))?;

    let sorted = sort(
        &column,
        Some(SortOptions {
            descending: false,
            nulls_first: false,
        }),
    )
    .with_context(|| format!("Failed to sort column '{name}'"))?;

    let values = sorted
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| {
            CollateError::Schema(format!("Column '{name}' did not sort as Float64"))
        })?;

    Ok(values.clone())
}

/// Render sorted values as a one-dimensional sequence
#[must_use]
pub fn format_report(values: &Float64Array) -> String {
    let rendered = (0..values.len())
        .map(|i| {
            if values.is_null(i) {
                "null".to_string()
            } else {
                values.value(i).to_string()
            }
        })
        .join(" ");

    format!("[{rendered}]")
}

/// Print the sorted view of one column to standard output
///
/// # Errors
/// Returns an error if the column cannot be extracted or sorted
pub fn print_report(batch: &RecordBatch, name: &str) -> Result<()> {
    let values = sorted_column(batch, name)?;
    println!("{}", format_report(&values));
    Ok(())
}
