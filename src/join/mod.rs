//! Left joins over seed-keyed tables
//!
//! The phenotype table is the primary side of the collation; genotype and
//! population rows are attached to it by seed.

use std::sync::Arc;

use anyhow::Context;
use arrow::array::{Array, ArrayRef, Int64Array, UInt32Array};
use arrow::compute::{cast, take};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{CollateError, Result};
use crate::family::{SEED_COLUMN, UPDATE_COLUMN};
use crate::utils::find_column;

/// A join key column as Int64 values, cast if needed
fn key_values(batch: &RecordBatch, key: &str) -> Result<Int64Array> {
    let (_, key_idx) = find_column(batch, key)?;
    let column = cast(batch.column(key_idx), &DataType::Int64)
        .with_context(|| format!("Failed to cast join key '{key}' to Int64"))?;

    let values = column
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| CollateError::Join(format!("Join key '{key}' is not an integer array")))?;

    Ok(values.clone())
}

/// Left join two tables on an integer key
///
/// Every left row is preserved. Where the right table has a matching key the
/// right columns are filled in; otherwise they are null. Duplicate keys on
/// the right fan out, duplicating the left row once per match. The right
/// table's own key column and every column named in `drop_from_right` are
/// omitted from the output.
///
/// # Errors
/// Returns an error if a key column is missing or non-integer, or if column
/// gathering fails
pub fn left_join(
    left: &RecordBatch,
    right: &RecordBatch,
    key: &str,
    drop_from_right: &[&str],
) -> Result<RecordBatch> {
    let left_keys = key_values(left, key)?;
    let right_keys = key_values(right, key)?;

    // Index right rows by key; duplicate keys accumulate and fan out below
    let mut index: FxHashMap<i64, SmallVec<[u32; 2]>> = FxHashMap::default();
    for row in 0..right_keys.len() {
        if right_keys.is_null(row) {
            continue;
        }
        let row_idx = u32::try_from(row)
            .map_err(|_| CollateError::Join("Right table exceeds u32 row indices".to_string()))?;
        index.entry(right_keys.value(row)).or_default().push(row_idx);
    }

    let mut left_indices: Vec<u32> = Vec::with_capacity(left.num_rows());
    let mut right_indices: Vec<Option<u32>> = Vec::with_capacity(left.num_rows());
    for row in 0..left_keys.len() {
        let row_idx = u32::try_from(row)
            .map_err(|_| CollateError::Join("Left table exceeds u32 row indices".to_string()))?;

        let matches = if left_keys.is_null(row) {
            None
        } else {
            index.get(&left_keys.value(row))
        };

        if let Some(rows) = matches {
            for &right_row in rows {
                left_indices.push(row_idx);
                right_indices.push(Some(right_row));
            }
        } else {
            left_indices.push(row_idx);
            right_indices.push(None);
        }
    }

    let left_take = UInt32Array::from(left_indices);
    let right_take = UInt32Array::from(right_indices);

    let mut fields: Vec<Field> = Vec::with_capacity(left.num_columns() + right.num_columns());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(left.num_columns() + right.num_columns());

    for (field, column) in left.schema().fields().iter().zip(left.columns()) {
        fields.push(field.as_ref().clone());
        columns.push(
            take(column, &left_take, None)
                .with_context(|| format!("Failed to gather left column '{}'", field.name()))?,
        );
    }

    for (field, column) in right.schema().fields().iter().zip(right.columns()) {
        let name = field.name();
        if name.eq_ignore_ascii_case(key)
            || drop_from_right.iter().any(|d| name.eq_ignore_ascii_case(d))
        {
            continue;
        }

        // Misses become nulls, so right-side fields are nullable in the output
        fields.push(Field::new(name, field.data_type().clone(), true));
        columns.push(
            take(column, &right_take, None)
                .with_context(|| format!("Failed to gather right column '{name}'"))?,
        );
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .with_context(|| "Failed to assemble joined record batch")?)
}

/// Join the three filtered family tables on seed
///
/// Phenotype is the primary table; every one of its rows appears in the
/// output, and its update column is the authoritative one. The secondaries
/// lose their update column (and their duplicate seed column) before joining.
///
/// # Errors
/// Returns an error if any table is missing its seed column or a join fails
pub fn join_families(
    phenotype: &RecordBatch,
    genotype: &RecordBatch,
    population: &RecordBatch,
) -> Result<RecordBatch> {
    let with_genotype = left_join(phenotype, genotype, SEED_COLUMN, &[UPDATE_COLUMN])?;
    left_join(&with_genotype, population, SEED_COLUMN, &[UPDATE_COLUMN])
}
