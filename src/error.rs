use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("{0}")]
    Results(#[from] ResultsError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Harness(#[from] HarnessError),
}

/// Set of errors occurring while loading or writing the results table.
#[derive(Debug, Error)]
pub enum ResultsError {
    /// The results file could not be opened at all.
    #[error("failed to open results table at {path}: {source}")]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error related to reading or writing CSV records.
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("results table is missing required column, {0}")]
    MissingColumn(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Set of errors occurring while rendering the results figure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to draw chart: {0}")]
    Drawing(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(that: DrawingAreaErrorKind<E>) -> Self {
        Self::Drawing(that.to_string())
    }
}

/// Set of errors occurring during a benchmark sweep.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
