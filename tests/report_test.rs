mod utils;

use sim_collate::Result;
use sim_collate::report::{format_report, sorted_column};

use crate::utils::{PhenotypeRow, PopulationRow, phenotype_batch, population_batch};

#[test]
fn test_sorted_column_is_a_nondecreasing_permutation() -> Result<()> {
    let batch = phenotype_batch(&[
        PhenotypeRow {
            seed: 1,
            update: 2,
            mean_avoid_over1: 0.5,
        },
        PhenotypeRow {
            seed: 2,
            update: 2,
            mean_avoid_over1: 0.1,
        },
        PhenotypeRow {
            seed: 3,
            update: 2,
            mean_avoid_over1: 0.3,
        },
    ])?;

    let sorted = sorted_column(&batch, "mean_avoid_over1")?;
    let values: &[f64] = sorted.values();

    assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));

    let mut expected = vec![0.5, 0.1, 0.3];
    expected.sort_by(f64::total_cmp);
    assert_eq!(values, expected.as_slice());
    Ok(())
}

#[test]
fn test_report_renders_a_flat_sequence() -> Result<()> {
    let batch = phenotype_batch(&[
        PhenotypeRow {
            seed: 1,
            update: 2,
            mean_avoid_over1: 0.5,
        },
        PhenotypeRow {
            seed: 2,
            update: 2,
            mean_avoid_over1: 0.1,
        },
    ])?;

    let sorted = sorted_column(&batch, "mean_avoid_over1")?;
    assert_eq!(format_report(&sorted), "[0.1 0.5]");
    Ok(())
}

#[test]
fn test_integer_columns_report_through_a_float_cast() -> Result<()> {
    let batch = population_batch(&[
        PopulationRow {
            seed: 1,
            update: 2,
            num_orgs: 20,
        },
        PopulationRow {
            seed: 2,
            update: 2,
            num_orgs: 10,
        },
    ])?;

    let sorted = sorted_column(&batch, "num_orgs")?;
    assert_eq!(format_report(&sorted), "[10 20]");
    Ok(())
}
