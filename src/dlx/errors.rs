//! Error types for matrix construction and the cover/uncover engine.

use std::fmt;

/// Errors reported by [`Matrix`](crate::dlx::matrix::Matrix) operations.
///
/// All of these are programmer-contract violations rather than transient
/// conditions; none of them is retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DlxError {
    /// The matrix was asked for fewer than one column.
    InvalidColumnCount { column_count: usize },

    /// An incidence or cover named a column outside `0..column_count`.
    ColumnOutOfRange {
        column: usize,
        column_count: usize,
    },

    /// `uncover` was invoked on a column other than the innermost open
    /// cover. Out-of-order uncovering would corrupt the links silently, so
    /// it is detected against the open-cover stack instead.
    NestingViolation {
        /// The innermost open cover, if any cover is open at all.
        expected: Option<usize>,
        /// The column the caller tried to uncover.
        found: usize,
    },
}

impl fmt::Display for DlxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DlxError::InvalidColumnCount { column_count } => {
                write!(f, "matrix needs at least one column, got {column_count}")
            }
            DlxError::ColumnOutOfRange {
                column,
                column_count,
            } => {
                write!(
                    f,
                    "column {column} is out of range for a matrix with {column_count} columns"
                )
            }
            DlxError::NestingViolation { expected, found } => match expected {
                Some(expected) => write!(
                    f,
                    "uncover of column {found} violates cover nesting (innermost open cover is column {expected})"
                ),
                None => write!(f, "uncover of column {found} with no cover open"),
            },
        }
    }
}

impl std::error::Error for DlxError {}
