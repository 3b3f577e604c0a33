//! Core error types.

use thiserror::Error;

/// Join engine errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A predicate referenced by a join or the pipeline is not in the store.
    #[error("relation not found: {0}")]
    RelationNotFound(String),

    /// A join key or projection column is outside the table width.
    #[error("column {column} out of range for table of width {width}")]
    ColumnOutOfRange { column: usize, width: usize },

    /// A row does not match the declared table width.
    #[error("row width mismatch: expected {expected}, got {actual}")]
    RowWidthMismatch { expected: usize, actual: usize },

    /// Tables must have at least one column.
    #[error("table width must be at least 1")]
    InvalidWidth,

    /// One or both tasks of a parallel sort failed.
    #[error("sort task failed: {0}")]
    SortTaskFailed(String),

    /// A source line could not be split into subject, predicate and object.
    #[error("malformed triple on line {line}")]
    MalformedTriple { line: usize },

    /// I/O error while reading a dataset.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid pipeline configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
