use std::io;

use thiserror::Error;

/// Rejected scan parameters. Always raised before any input is read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("repeat length must be in [1,4], got {0}")]
    RepeatLength(usize),
    #[error("repeat length ({repeat}) must be less than total length ({total})")]
    TotalLength { repeat: usize, total: usize },
    /// Only reachable when a subpattern filter is requested for a unit length
    /// that has none (1, or anything above 4).
    #[error("no subpattern filter for unit length {0}")]
    UnsupportedPeriod(usize),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("sink already finished")]
    Finished,
}

#[derive(Debug, Error)]
pub enum ScanError {
    /// Failure reading the sequence source.
    #[error("failed to read sequence: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Export(#[from] ExportError),
}
