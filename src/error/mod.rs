//! Error handling for the collation pipeline.

use std::io;

use arrow::error::ArrowError;

/// Specialized error type for the collation pipeline
#[derive(Debug, thiserror::Error)]
pub enum CollateError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing CSV data or applying Arrow kernels
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error with schema validation or compatibility
    #[error("Schema error: {0}")]
    Schema(String),

    /// A file pattern matched nothing, or a table holds no usable rows
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Error while joining tables by key
    #[error("Join error: {0}")]
    Join(String),

    /// Error with table metadata, such as an unknown family or column
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Error converting record batches to typed records
    #[error("Record conversion error: {0}")]
    Record(#[from] serde_arrow::Error),

    /// Any other error, with context attached at the failure site
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type for collation operations
pub type Result<T> = std::result::Result<T, CollateError>;
