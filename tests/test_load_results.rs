use std::path::PathBuf;

use anyhow::Result;
use claim::*;
use once_cell::sync::Lazy;
use orderbench::error::ResultsError;
use orderbench::results::{self, REQUIRED_COLUMNS};
use orderbench::{Measurement, ResultSet};
use pretty_assertions::assert_eq;

fn fixture_path() -> Result<PathBuf> {
    let base_path = std::env::current_dir()?;
    Ok(base_path.join(PathBuf::from("tests/data/benchmark_results.csv")))
}

#[test]
fn test_load_results_table() -> Result<()> {
    Lazy::force(&orderbench::tracing::TEST_TRACING);

    let results = ResultSet::from_path(fixture_path()?)?;

    assert_eq!(results.len(), 12);
    assert_eq!(results.functions(), vec!["total_amount_traded", "order_stats"]);
    assert_eq!(results.sizes(), vec![10_000, 100_000]);
    assert_eq!(results.max_threads(), Some(4));

    let subset = results.rows_for("total_amount_traded", 100_000);
    assert_eq!(subset.len(), 3);
    assert_eq!(subset[2].threads, 4);
    assert_eq!(subset[2].speedup, 3.65);

    assert_eq!(results.rows_for_function("order_stats").len(), 6);
    assert!(results.rows_for("order_stats", 1_000_000).is_empty());
    Ok(())
}

#[test]
fn test_load_missing_file_is_input_error() {
    Lazy::force(&orderbench::tracing::TEST_TRACING);

    let err = assert_err!(ResultSet::from_path("tests/data/no_such_results.csv"));
    assert!(matches!(err, ResultsError::InputFile { .. }), "unexpected error: {err}");
}

#[test]
fn test_load_rejects_missing_required_column() -> Result<()> {
    Lazy::force(&orderbench::tracing::TEST_TRACING);

    let scratch = tempfile::tempdir()?;
    let path = scratch.path().join("results.csv");
    std::fs::write(&path, "Function,Size,Threads,Time_ms\ntotal_amount_traded,10000,1,12.5\n")?;

    let err = assert_err!(ResultSet::from_path(&path));
    match err {
        ResultsError::MissingColumn(column) => assert_eq!(column, "Speedup"),
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn test_load_ignores_extra_columns() -> Result<()> {
    Lazy::force(&orderbench::tracing::TEST_TRACING);

    let scratch = tempfile::tempdir()?;
    let path = scratch.path().join("results.csv");
    std::fs::write(
        &path,
        "Function,Size,Threads,Time_ms,Speedup,Host\ntotal_amount_traded,10000,1,12.5,1.0,zeus\n",
    )?;

    let results = ResultSet::from_path(&path)?;
    assert_eq!(results.len(), 1);
    assert_eq!(results.rows()[0].function, "total_amount_traded");
    Ok(())
}

#[test]
fn test_load_header_only_table_is_empty() -> Result<()> {
    Lazy::force(&orderbench::tracing::TEST_TRACING);

    let scratch = tempfile::tempdir()?;
    let path = scratch.path().join("results.csv");
    std::fs::write(&path, format!("{}\n", REQUIRED_COLUMNS.join(",")))?;

    let results = ResultSet::from_path(&path)?;
    assert!(results.is_empty());
    assert!(results.functions().is_empty());
    assert!(results.sizes().is_empty());
    assert_eq!(results.max_threads(), None);
    Ok(())
}

#[test]
fn test_write_then_load_round_trip() -> Result<()> {
    Lazy::force(&orderbench::tracing::TEST_TRACING);

    let rows = vec![
        Measurement {
            function: "order_stats".to_string(),
            size: 10_000,
            threads: 1,
            time_ms: 20.875,
            speedup: 1.,
        },
        Measurement {
            function: "order_stats".to_string(),
            size: 10_000,
            threads: 4,
            time_ms: 8.5,
            speedup: 2.456,
        },
    ];

    let scratch = tempfile::tempdir()?;
    let path = scratch.path().join("results.csv");
    results::write_results(&path, &rows)?;

    let reloaded = ResultSet::from_path(&path)?;
    assert_eq!(reloaded.rows(), rows.as_slice());
    Ok(())
}
