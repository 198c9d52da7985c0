use log::info;
use sim_collate::async_io::load_family_async;
use sim_collate::family::{family_from_name, phenotype};
use sim_collate::{CollateConfig, Result, filter, join, report};
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CollateConfig::default();

    info!(
        "Collating snapshot data from {} and {}",
        config.phenotype_dir.display(),
        config.genotype_dir.display()
    );

    // Load the three families concurrently; each loader reads its own files
    // in parallel
    let start = Instant::now();
    let (phenotype_batches, genotype_batches, population_batches) = tokio::try_join!(
        load_family_async(
            family_from_name("phenotype")?,
            config.phenotype_dir.clone(),
            config.clone(),
        ),
        load_family_async(
            family_from_name("genotype")?,
            config.genotype_dir.clone(),
            config.clone(),
        ),
        load_family_async(
            family_from_name("population")?,
            config.population_dir.clone(),
            config.clone(),
        ),
    )?;
    info!("Loaded all families in {:?}", start.elapsed());

    // Filter each family to its most recent update
    let phenotype_table = filter::keep_latest_update(&phenotype_batches)?;
    let genotype_table = filter::keep_latest_update(&genotype_batches)?;
    let population_table = filter::keep_latest_update(&population_batches)?;
    info!(
        "Most recent snapshots: {} phenotype rows, {} genotype rows, {} population rows",
        phenotype_table.num_rows(),
        genotype_table.num_rows(),
        population_table.num_rows()
    );

    let records = phenotype::deserialize_batch(&phenotype_table)?;
    info!(
        "Deserialized {} phenotype records from the most recent update",
        records.len()
    );

    // Stitch the families together by seed
    let combined = join::join_families(&phenotype_table, &genotype_table, &population_table)?;
    info!(
        "Joined table: {} rows, {} columns",
        combined.num_rows(),
        combined.num_columns()
    );

    report::print_report(&combined, &config.report_column)?;
    Ok(())
}
