//! Genotype family: per-seed genome summaries
//!
//! Genotype snapshots are written by the collection step into a `collected`
//! directory next to the run's working directory, one level up.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use super::phenotype::project_required;
use super::{FamilyLoader, SEED_COLUMN, UPDATE_COLUMN};
use crate::error::Result;
use crate::schema::{ColumnKind, RequiredColumn};

/// Columns every genotype snapshot file must carry
pub static REQUIRED_COLUMNS: &[RequiredColumn] = &[
    RequiredColumn::new(SEED_COLUMN, ColumnKind::Integer),
    RequiredColumn::new(UPDATE_COLUMN, ColumnKind::Integer),
];

/// Get the Arrow schema for the genotype required columns
pub fn genotype_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(SEED_COLUMN, DataType::Int64, false),
        Field::new(UPDATE_COLUMN, DataType::Int64, false),
    ]))
}

/// Loader for genotype snapshot files
#[derive(Debug, Default)]
pub struct GenotypeFamily;

impl FamilyLoader for GenotypeFamily {
    fn family_name(&self) -> &'static str {
        "genotype"
    }

    fn file_prefix(&self) -> &'static str {
        "Genotypes_"
    }

    fn schema(&self) -> SchemaRef {
        genotype_schema()
    }

    fn required_columns(&self) -> &'static [RequiredColumn] {
        REQUIRED_COLUMNS
    }
}

/// Helper function to create a new genotype loader
#[must_use]
pub fn create_loader() -> GenotypeFamily {
    GenotypeFamily
}

/// One genotype row, required columns only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenotypeRecord {
    /// Simulation run identifier
    pub seed: i64,
    /// Snapshot counter this row was written at
    pub update: i64,
}

/// Deserialize the required genotype columns from a record batch
///
/// # Errors
/// Returns an error if a required column is missing or a value is null
pub fn deserialize_batch(batch: &RecordBatch) -> Result<Vec<GenotypeRecord>> {
    let projected = project_required(batch, REQUIRED_COLUMNS, "genotype")?;
    Ok(serde_arrow::from_record_batch(&projected)?)
}
