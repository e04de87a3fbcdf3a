pub mod bench;
pub mod core;
pub mod merge_cmd;
pub mod run_cmd;
pub mod storage;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error(transparent)]
    Config(#[from] toml::de::Error),
}

pub type BenchResult<T> = Result<T, BenchError>;

// Re-export key types for convenience
pub use crate::bench::{Benchmarker, HarnessConfig, measure};
pub use crate::core::{FileSizeRecord, MergedRecord, TimingRecord};
