//! Error taxonomy for the ranking engine.
//!
//! Shape errors (an order that references an index outside the matrix, or
//! repeats one) are fatal and surfaced immediately. Empty index sets are
//! not errors: every solver maps them to an empty ranking with score 0.

use thiserror::Error;

/// Errors produced by the ranking engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KemenyError {
    /// An order references an index that is not a row/column of the matrix.
    #[error("index {index} is out of bounds for a {size}x{size} preference matrix")]
    IndexOutOfBounds { index: usize, size: usize },

    /// An order (or a pair of orders to be merged) repeats an index.
    #[error("index {index} appears more than once")]
    DuplicateIndex { index: usize },

    /// A row of the input does not have the expected length.
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A matrix entry is negative, NaN or infinite.
    #[error("invalid weight {value} at ({row}, {col})")]
    InvalidWeight { row: usize, col: usize, value: f64 },

    /// An order is not a permutation of the index set it should govern.
    #[error("order of length {order_len} is not a permutation of the {set_len}-element index set")]
    NotAPermutation { order_len: usize, set_len: usize },

    /// A runner configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl KemenyError {
    /// Returns `true` for the shape family (bad index, duplicate index).
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            KemenyError::IndexOutOfBounds { .. } | KemenyError::DuplicateIndex { .. }
        )
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, KemenyError>;
