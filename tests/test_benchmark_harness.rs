use anyhow::Result;
use approx::assert_relative_eq;
use once_cell::sync::Lazy;
use orderbench::harness::run_sweep;
use orderbench::{results, ResultSet};
use pretty_assertions::assert_eq;

#[test]
fn test_sweep_emits_one_row_per_kernel_and_thread_count() -> Result<()> {
    Lazy::force(&orderbench::tracing::TEST_TRACING);

    let measurements = run_sweep(&[600], &[1, 2])?;

    assert_eq!(measurements.len(), 6);
    let table = ResultSet::new(measurements.clone());
    assert_eq!(
        table.functions(),
        vec!["total_amount_traded", "order_stats", "market_snapshots"]
    );
    assert_eq!(table.sizes(), vec![600]);
    assert_eq!(table.max_threads(), Some(2));

    for row in &measurements {
        assert!(row.time_ms >= 0.);
        assert!(row.speedup > 0.);
        if row.threads == 1 {
            assert_relative_eq!(row.speedup, 1.);
        }
    }
    Ok(())
}

#[test]
fn test_sweep_rows_keep_ascending_thread_order() -> Result<()> {
    Lazy::force(&orderbench::tracing::TEST_TRACING);

    let measurements = run_sweep(&[400], &[1, 2, 4])?;
    let table = ResultSet::new(measurements);

    for function in table.functions() {
        let threads: Vec<u32> = table.rows_for(function, 400).iter().map(|row| row.threads).collect();
        assert_eq!(threads, vec![1, 2, 4]);
    }
    Ok(())
}

#[test]
fn test_sweep_results_survive_csv_round_trip() -> Result<()> {
    Lazy::force(&orderbench::tracing::TEST_TRACING);

    let measurements = run_sweep(&[500], &[1, 2])?;

    let scratch = tempfile::tempdir()?;
    let path = scratch.path().join("benchmark_results.csv");
    results::write_results(&path, &measurements)?;

    let reloaded = ResultSet::from_path(&path)?;
    assert_eq!(reloaded.rows(), measurements.as_slice());
    Ok(())
}
