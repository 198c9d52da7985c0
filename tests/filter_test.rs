mod utils;

use arrow::array::{Array, BooleanArray, Int64Array};
use sim_collate::filter::{filter_record_batch, keep_latest_update, max_update};
use sim_collate::{CollateError, Result};

use crate::utils::{PhenotypeRow, phenotype_batch};

fn sample_rows(updates: &[i64]) -> Vec<PhenotypeRow> {
    updates
        .iter()
        .enumerate()
        .map(|(i, &update)| PhenotypeRow {
            seed: i as i64 + 1,
            update,
            mean_avoid_over1: 0.1 * (i as f64 + 1.0),
        })
        .collect()
}

#[test]
fn test_filter_retains_only_maximum_update() -> Result<()> {
    let batch = phenotype_batch(&sample_rows(&[1, 2, 2, 3]))?;

    let filtered = keep_latest_update(std::slice::from_ref(&batch))?;

    assert_eq!(filtered.num_rows(), 1);
    assert_eq!(max_update(&filtered)?, 3);
    Ok(())
}

#[test]
fn test_filter_is_idempotent() -> Result<()> {
    let batch = phenotype_batch(&sample_rows(&[1, 2, 2, 3, 3]))?;

    let once = keep_latest_update(std::slice::from_ref(&batch))?;
    let twice = keep_latest_update(std::slice::from_ref(&once))?;

    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_filter_spans_batches_without_deduplicating() -> Result<()> {
    // Two files may both contain rows at the shared maximum update; all of
    // them survive the filter
    let first = phenotype_batch(&sample_rows(&[1, 5]))?;
    let second = phenotype_batch(&sample_rows(&[5, 4]))?;

    let filtered = keep_latest_update(&[first, second])?;

    assert_eq!(filtered.num_rows(), 2);
    let updates = filtered
        .column_by_name("update")
        .expect("update column present")
        .as_any()
        .downcast_ref::<Int64Array>()
        .expect("update column is Int64");
    assert!(updates.iter().all(|u| u == Some(5)));
    Ok(())
}

#[test]
fn test_empty_family_is_an_explicit_error() {
    let err = keep_latest_update(&[]).unwrap_err();
    assert!(matches!(err, CollateError::EmptyInput(_)));
}

#[test]
fn test_mask_length_mismatch_is_rejected() -> Result<()> {
    let batch = phenotype_batch(&sample_rows(&[1, 2]))?;
    let mask = BooleanArray::from(vec![true]);

    let err = filter_record_batch(&batch, &mask).unwrap_err();
    assert!(matches!(err, CollateError::Schema(_)));
    Ok(())
}
