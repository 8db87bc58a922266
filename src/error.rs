//! Error types for the persistence pipeline.
//!
//! Bad input data and configuration surface as [`PersistenceError`].
//! Contract violations between stages (e.g. a boundary matrix that is not
//! strictly upper triangular handed to the reducer) are programming errors
//! and panic instead.

/// Everything that can go wrong between a point cloud and its barcode.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PersistenceError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("point set is empty")]
    EmptyPointSet,

    #[error("point {row} has a non-finite coordinate")]
    NonFinitePoint { row: usize },

    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("invalid distance {value} at ({row}, {col})")]
    InvalidDistance { row: usize, col: usize, value: f64 },

    #[error("boundary entry at ({row}, {col}) is {value}, expected 0 or 1")]
    NonBinaryEntry { row: usize, col: usize, value: u8 },

    #[error("row {row} of column {col} is outside a {size}x{size} matrix")]
    RowOutOfRange { row: usize, col: usize, size: usize },

    #[error("complex exceeds the limit of {limit} simplices")]
    ComplexTooLarge { limit: usize },

    #[error("simplex {simplex} is missing its face {face:?}")]
    MissingFace { simplex: usize, face: Vec<usize> },

    #[error("invalid simplex: {0}")]
    InvalidSimplex(String),

    #[error("column {column} has low {row}, which is not a zero column; input is not a boundary matrix")]
    NotABirth { column: usize, row: usize },

    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
