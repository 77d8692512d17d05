/// Fatal errors for a sweep invocation.
///
/// Per-file stat and delete failures are not listed here: they are recovered
/// locally and surface as [`SweepEvent`](crate::scanner::progress::SweepEvent)s.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("root path '{}' does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("root path '{}' is not a directory", .0.display())]
    RootNotADirectory(PathBuf),

    #[error("invalid budget {0} GB: must be a finite, non-negative number")]
    InvalidBudget(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SweepError>;
