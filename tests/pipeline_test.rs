mod utils;

use rand::seq::SliceRandom;
use sim_collate::async_io::load_families_async;
use sim_collate::family::FamilyLoader;
use sim_collate::utils::test_utils::test_config;
use sim_collate::{Result, family_from_name, filter, join, report};

use crate::utils::{
    GenotypeRow, PhenotypeRow, PopulationRow, genotype_batch, phenotype_batch, population_batch,
    write_scenario_files,
};

#[test]
fn test_end_to_end_scenario() -> Result<()> {
    let work = tempfile::tempdir()?;
    let collected = tempfile::tempdir()?;
    write_scenario_files(work.path(), collected.path())?;
    let config = test_config(work.path(), collected.path(), work.path());

    let phenotype_batches = family_from_name("phenotype")?.load(work.path(), &config)?;
    let genotype_batches = family_from_name("genotype")?.load(collected.path(), &config)?;
    let population_batches = family_from_name("population")?.load(work.path(), &config)?;

    let phenotype = filter::keep_latest_update(&phenotype_batches)?;
    let genotype = filter::keep_latest_update(&genotype_batches)?;
    let population = filter::keep_latest_update(&population_batches)?;

    // The stale update-1 phenotype row is gone
    assert_eq!(phenotype.num_rows(), 2);

    let combined = join::join_families(&phenotype, &genotype, &population)?;
    let sorted = report::sorted_column(&combined, "mean_avoid_over1")?;

    assert_eq!(report::format_report(&sorted), "[0.1 0.5]");
    Ok(())
}

#[tokio::test]
async fn test_async_loading_matches_sync() -> Result<()> {
    let work = tempfile::tempdir()?;
    let collected = tempfile::tempdir()?;
    write_scenario_files(work.path(), collected.path())?;
    let config = test_config(work.path(), collected.path(), work.path());

    let families = vec![
        (family_from_name("phenotype")?, work.path().to_path_buf()),
        (family_from_name("genotype")?, collected.path().to_path_buf()),
        (family_from_name("population")?, work.path().to_path_buf()),
    ];

    let concurrent = load_families_async(&families, &config).await?;
    let sequential: Vec<_> = families
        .iter()
        .map(|(family, dir)| family.load(dir, &config))
        .collect::<Result<_>>()?;

    assert_eq!(concurrent.len(), sequential.len());
    for (a, b) in concurrent.iter().zip(&sequential) {
        let rows_a: usize = a.iter().map(|batch| batch.num_rows()).sum();
        let rows_b: usize = b.iter().map(|batch| batch.num_rows()).sum();
        assert_eq!(rows_a, rows_b);
    }
    Ok(())
}

#[test]
fn test_row_order_does_not_affect_the_report() -> Result<()> {
    let mut phenotype_rows: Vec<PhenotypeRow> = (1..=6)
        .flat_map(|seed| {
            (1..=3).map(move |update| PhenotypeRow {
                seed,
                update,
                mean_avoid_over1: seed as f64 * 0.25,
            })
        })
        .collect();
    let genotype_rows: Vec<GenotypeRow> = (1..=6)
        .map(|seed| GenotypeRow {
            seed,
            update: 3,
            dominant_sequence: "AAG".to_string(),
        })
        .collect();
    let population_rows: Vec<PopulationRow> = (1..=6)
        .map(|seed| PopulationRow {
            seed,
            update: 3,
            num_orgs: seed * 10,
        })
        .collect();

    let genotype = genotype_batch(&genotype_rows)?;
    let population = population_batch(&population_rows)?;

    let baseline_table = filter::keep_latest_update(&[phenotype_batch(&phenotype_rows)?])?;
    let baseline_joined = join::join_families(&baseline_table, &genotype, &population)?;
    let baseline: Vec<f64> =
        report::sorted_column(&baseline_joined, "mean_avoid_over1")?.values().to_vec();

    let mut rng = rand::rng();
    for _ in 0..3 {
        phenotype_rows.shuffle(&mut rng);
        let mid = phenotype_rows.len() / 2;
        let first = phenotype_batch(&phenotype_rows[..mid])?;
        let second = phenotype_batch(&phenotype_rows[mid..])?;

        let table = filter::keep_latest_update(&[first, second])?;
        let joined = join::join_families(&table, &genotype, &population)?;
        let sorted: Vec<f64> =
            report::sorted_column(&joined, "mean_avoid_over1")?.values().to_vec();

        assert_eq!(sorted, baseline);
    }
    Ok(())
}

#[test]
fn test_family_names_are_case_insensitive() -> Result<()> {
    let loader = family_from_name("Phenotype")?;
    assert_eq!(loader.family_name(), "phenotype");
    Ok(())
}
