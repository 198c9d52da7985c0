//! Configuration for the collation pipeline.

use std::path::PathBuf;

use crate::utils::DEFAULT_BATCH_SIZE;

/// Configuration for the collation pipeline
#[derive(Debug, Clone)]
pub struct CollateConfig {
    /// Directory scanned for phenotype snapshot files
    pub phenotype_dir: PathBuf,
    /// Directory scanned for genotype snapshot files
    pub genotype_dir: PathBuf,
    /// Directory scanned for population snapshot files
    pub population_dir: PathBuf,
    /// Column reported after joining
    pub report_column: String,
    /// Whether to validate required columns when loading
    pub validate_schema: bool,
    /// Whether to fail on cross-file schema incompatibility
    pub fail_on_schema_incompatibility: bool,
    /// Batch size for CSV reading
    pub batch_size: usize,
}

impl Default for CollateConfig {
    fn default() -> Self {
        Self {
            phenotype_dir: PathBuf::from("."),
            genotype_dir: PathBuf::from("../collected"),
            population_dir: PathBuf::from("."),
            report_column: "mean_avoid_over1".to_string(),
            validate_schema: true,
            fail_on_schema_incompatibility: true,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}
