#![allow(dead_code)]

use std::path::Path;

use arrow::record_batch::RecordBatch;
use serde::Serialize;
use sim_collate::Result;
use sim_collate::utils::test_utils::{rows_to_batch, write_snapshot_csv};

/// One phenotype fixture row
#[derive(Debug, Clone, Serialize)]
pub struct PhenotypeRow {
    pub seed: i64,
    pub update: i64,
    pub mean_avoid_over1: f64,
}

/// One genotype fixture row
#[derive(Debug, Clone, Serialize)]
pub struct GenotypeRow {
    pub seed: i64,
    pub update: i64,
    pub dominant_sequence: String,
}

/// One population fixture row
#[derive(Debug, Clone, Serialize)]
pub struct PopulationRow {
    pub seed: i64,
    pub update: i64,
    pub num_orgs: i64,
}

pub fn phenotype_batch(rows: &[PhenotypeRow]) -> Result<RecordBatch> {
    rows_to_batch(rows)
}

pub fn genotype_batch(rows: &[GenotypeRow]) -> Result<RecordBatch> {
    rows_to_batch(rows)
}

pub fn population_batch(rows: &[PopulationRow]) -> Result<RecordBatch> {
    rows_to_batch(rows)
}

/// The end-to-end fixture: two phenotype files (one holding a stale update),
/// one genotype file in the collected directory, one population file
pub fn write_scenario_files(work_dir: &Path, collected_dir: &Path) -> Result<()> {
    write_snapshot_csv(
        &work_dir.join("Phenotypes_100.csv"),
        "seed,update,mean_avoid_over1",
        &["1,2,0.5", "2,2,0.1"],
    )?;
    write_snapshot_csv(
        &work_dir.join("Phenotypes_50.csv"),
        "seed,update,mean_avoid_over1",
        &["1,1,9.9"],
    )?;
    write_snapshot_csv(
        &collected_dir.join("Genotypes_100.csv"),
        "seed,update,dominant_sequence",
        &["1,2,AAG", "2,2,GGT"],
    )?;
    write_snapshot_csv(
        &work_dir.join("Population_100.csv"),
        "seed,update,num_orgs",
        &["1,2,10", "2,2,20"],
    )?;
    Ok(())
}
