use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IncludeSortError {
    #[error("Invalid include pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("File does not exist: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IncludeSortError>;

impl IncludeSortError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::ConfigParse { .. } => 3,
            Self::ConfigKeyNotFound { .. } => 4,
            Self::InvalidPattern { .. } => 5,
            _ => 1,
        }
    }
}
