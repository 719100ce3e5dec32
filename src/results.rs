use std::fs::File;
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::ResultsError;

/// Column headers required of every results table.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Function", "Size", "Threads", "Time_ms", "Speedup"];

/// One benchmark run: a kernel at one input size and one thread count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "Function")]
    pub function: String,

    #[serde(rename = "Size")]
    pub size: u64,

    #[serde(rename = "Threads")]
    pub threads: u32,

    #[serde(rename = "Time_ms")]
    pub time_ms: f64,

    #[serde(rename = "Speedup")]
    pub speedup: f64,
}

/// Immutable in-memory results table. Rows keep file order; all groupings are
/// derived views over the same rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    rows: Vec<Measurement>,
}

impl ResultSet {
    pub fn new(rows: Vec<Measurement>) -> Self {
        Self { rows }
    }

    /// Load a results table from a CSV file in a single synchronous read.
    ///
    /// Fails if the file cannot be opened or if any of the required columns is
    /// absent. Extra columns are ignored.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ResultsError> {
        let path = path.as_ref();

        let load_span = tracing::debug_span!("loading results table", ?path);
        let _load_span_guard = load_span.enter();

        let file = File::open(path).map_err(|source| ResultsError::InputFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers()?;
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(ResultsError::MissingColumn(column.to_string()));
            }
        }

        tracing::trace!("loading measurements from CSV...");
        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: Measurement = result?;
            rows.push(row);
        }
        tracing::debug!("deserialized {} measurements from CSV.", rows.len());

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Measurement] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct benchmarked functions, in first-seen order.
    pub fn functions(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.function.as_str()).unique().collect()
    }

    /// Distinct input sizes across the whole table, in first-seen order.
    pub fn sizes(&self) -> Vec<u64> {
        self.rows.iter().map(|row| row.size).unique().collect()
    }

    /// Maximum thread count observed over the whole table.
    pub fn max_threads(&self) -> Option<u32> {
        self.rows.iter().map(|row| row.threads).max()
    }

    /// All rows for a function, in file order.
    pub fn rows_for_function(&self, function: &str) -> Vec<&Measurement> {
        self.rows.iter().filter(|row| row.function == function).collect()
    }

    /// All rows for a (function, size) pair, in file order.
    pub fn rows_for(&self, function: &str, size: u64) -> Vec<&Measurement> {
        self.rows
            .iter()
            .filter(|row| row.function == function && row.size == size)
            .collect()
    }
}

/// Persist measurements to a CSV file with the standard headers.
pub fn write_results(path: impl AsRef<Path>, rows: &[Measurement]) -> Result<(), ResultsError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    tracing::debug!("wrote {} measurements to {:?}.", rows.len(), path);
    Ok(())
}
