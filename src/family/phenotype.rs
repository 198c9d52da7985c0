//! Phenotype family: per-seed behavioral measurements
//!
//! Phenotype snapshots form the primary table of the collation. Every seed in
//! the most recent phenotype update appears in the joined output, and the
//! phenotype update column is the authoritative one.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use super::{FamilyLoader, SEED_COLUMN, UPDATE_COLUMN};
use crate::error::{CollateError, Result};
use crate::schema::{ColumnKind, RequiredColumn};

/// Column reported at the end of the pipeline
pub const MEAN_AVOID_OVER1: &str = "mean_avoid_over1";

/// Columns every phenotype snapshot file must carry
pub static REQUIRED_COLUMNS: &[RequiredColumn] = &[
    RequiredColumn::new(SEED_COLUMN, ColumnKind::Integer),
    RequiredColumn::new(UPDATE_COLUMN, ColumnKind::Integer),
    RequiredColumn::new(MEAN_AVOID_OVER1, ColumnKind::Numeric),
];

/// Get the Arrow schema for the phenotype required columns
pub fn phenotype_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(SEED_COLUMN, DataType::Int64, false),
        Field::new(UPDATE_COLUMN, DataType::Int64, false),
        Field::new(MEAN_AVOID_OVER1, DataType::Float64, true),
    ]))
}

/// Loader for phenotype snapshot files
#[derive(Debug, Default)]
pub struct PhenotypeFamily;

impl FamilyLoader for PhenotypeFamily {
    fn family_name(&self) -> &'static str {
        "phenotype"
    }

    fn file_prefix(&self) -> &'static str {
        "Phenotypes_"
    }

    fn schema(&self) -> SchemaRef {
        phenotype_schema()
    }

    fn required_columns(&self) -> &'static [RequiredColumn] {
        REQUIRED_COLUMNS
    }
}

/// Helper function to create a new phenotype loader
#[must_use]
pub fn create_loader() -> PhenotypeFamily {
    PhenotypeFamily
}

/// One phenotype row, required columns only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenotypeRecord {
    /// Simulation run identifier
    pub seed: i64,
    /// Snapshot counter this row was written at
    pub update: i64,
    /// Mean avoidance score over threshold 1
    pub mean_avoid_over1: f64,
}

/// Deserialize the required phenotype columns from a record batch
///
/// Family-specific measurement columns beyond the required ones are ignored.
///
/// # Errors
/// Returns an error if a required column is missing or a value is null
pub fn deserialize_batch(batch: &RecordBatch) -> Result<Vec<PhenotypeRecord>> {
    let projected = project_required(batch, REQUIRED_COLUMNS, "phenotype")?;
    Ok(serde_arrow::from_record_batch(&projected)?)
}

/// Project a batch down to a family's required columns, in declaration order
pub(super) fn project_required(
    batch: &RecordBatch,
    required: &[RequiredColumn],
    family: &str,
) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut indices = Vec::with_capacity(required.len());
    for column in required {
        let idx = schema.index_of(column.name).map_err(|_| {
            CollateError::Schema(format!(
                "Required column '{}' missing from {family} batch",
                column.name
            ))
        })?;
        indices.push(idx);
    }
    Ok(batch.project(&indices)?)
}
