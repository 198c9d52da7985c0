//! Family definitions and loaders for simulation snapshot data
//!
//! This module contains the definitions and loaders for the snapshot families
//! a simulation run writes out. It provides a unified interface for loading
//! and validating CSV snapshot files from the different families.
//!
//! Available families:
//! - Phenotype: per-seed behavioral measurements (primary table)
//! - Genotype: per-seed genome summaries, collected one directory up
//! - Population: per-seed population measurements

use std::path::Path;
use std::sync::Arc;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use crate::config::CollateConfig;
use crate::error::{CollateError, Result};
use crate::reader::load_snapshot_files;
use crate::schema::RequiredColumn;

pub mod genotype;
pub mod phenotype;
pub mod population;

/// Column identifying one simulation run, the join key across families
pub const SEED_COLUMN: &str = "seed";

/// Column identifying the snapshot a row belongs to
pub const UPDATE_COLUMN: &str = "update";

/// Base trait for family loaders
pub trait FamilyLoader: Send + Sync {
    /// Get the name of the family
    fn family_name(&self) -> &'static str;

    /// Filename prefix of this family's snapshot files
    fn file_prefix(&self) -> &'static str;

    /// Get the required-column schema for this family
    fn schema(&self) -> SchemaRef;

    /// Columns every snapshot file of this family must carry
    fn required_columns(&self) -> &'static [RequiredColumn];

    /// Load all of this family's snapshot files from a directory
    ///
    /// # Errors
    /// Returns an error if no files match or a file fails validation
    fn load(&self, dir: &Path, config: &CollateConfig) -> Result<Vec<RecordBatch>> {
        load_snapshot_files(
            dir,
            self.family_name(),
            self.file_prefix(),
            self.required_columns(),
            config,
        )
    }
}

impl std::fmt::Debug for dyn FamilyLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FamilyLoader")
            .field("family_name", &self.family_name())
            .finish()
    }
}

/// Create a family loader from a family name
///
/// # Errors
/// Returns an error for an unknown family name
pub fn family_from_name(name: &str) -> Result<Arc<dyn FamilyLoader>> {
    match name.to_lowercase().as_str() {
        "phenotype" => Ok(Arc::new(phenotype::create_loader())),
        "genotype" => Ok(Arc::new(genotype::create_loader())),
        "population" => Ok(Arc::new(population::create_loader())),
        _ => Err(CollateError::Metadata(format!("Unknown family: {name}"))),
    }
}
