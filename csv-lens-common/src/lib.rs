pub mod config;
pub use config::{Config, CsvConfig, DisplayConfig, MessagesConfig, OutputFormat};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvLensError {
    #[error("invalid operator: {0}")]
    InvalidOperator(String),
    #[error("invalid aggregate: {0}")]
    InvalidAggregate(String),
    #[error("invalid column: {0}")]
    InvalidColumn(String),
    #[error("cannot open '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Other(String),
}

/// Coarse error category, stable across payload changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidOperator,
    InvalidAggregate,
    InvalidColumn,
    FileAccess,
    Unhandled,
}

impl CsvLensError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOperator(_) => ErrorKind::InvalidOperator,
            Self::InvalidAggregate(_) => ErrorKind::InvalidAggregate,
            Self::InvalidColumn(_) => ErrorKind::InvalidColumn,
            Self::FileAccess { .. } => ErrorKind::FileAccess,
            Self::Io(_) | Self::Csv(_) | Self::Other(_) => ErrorKind::Unhandled,
        }
    }
}

pub type Result<T> = std::result::Result<T, CsvLensError>;
