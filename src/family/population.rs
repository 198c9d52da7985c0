//! Population family: per-seed population measurements

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use super::phenotype::project_required;
use super::{FamilyLoader, SEED_COLUMN, UPDATE_COLUMN};
use crate::error::Result;
use crate::schema::{ColumnKind, RequiredColumn};

/// Columns every population snapshot file must carry
pub static REQUIRED_COLUMNS: &[RequiredColumn] = &[
    RequiredColumn::new(SEED_COLUMN, ColumnKind::Integer),
    RequiredColumn::new(UPDATE_COLUMN, ColumnKind::Integer),
];

/// Get the Arrow schema for the population required columns
pub fn population_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(SEED_COLUMN, DataType::Int64, false),
        Field::new(UPDATE_COLUMN, DataType::Int64, false),
    ]))
}

/// Loader for population snapshot files
#[derive(Debug, Default)]
pub struct PopulationFamily;

impl FamilyLoader for PopulationFamily {
    fn family_name(&self) -> &'static str {
        "population"
    }

    fn file_prefix(&self) -> &'static str {
        "Population_"
    }

    fn schema(&self) -> SchemaRef {
        population_schema()
    }

    fn required_columns(&self) -> &'static [RequiredColumn] {
        REQUIRED_COLUMNS
    }
}

/// Helper function to create a new population loader
#[must_use]
pub fn create_loader() -> PopulationFamily {
    PopulationFamily
}

/// One population row, required columns only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRecord {
    /// Simulation run identifier
    pub seed: i64,
    /// Snapshot counter this row was written at
    pub update: i64,
}

/// Deserialize the required population columns from a record batch
///
/// # Errors
/// Returns an error if a required column is missing or a value is null
pub fn deserialize_batch(batch: &RecordBatch) -> Result<Vec<PopulationRecord>> {
    let projected = project_required(batch, REQUIRED_COLUMNS, "population")?;
    Ok(serde_arrow::from_record_batch(&projected)?)
}
