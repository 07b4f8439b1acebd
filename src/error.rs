//! Error types for runboard
//!
//! Every malformed request is a request-level failure: the engine never
//! returns a best-effort truncated response. Missing data on a session is
//! not an error; it is handled by the missing-value policies in the
//! aggregator, filter, and sort stages.

use thiserror::Error;

use crate::hparam::HParamType;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Runboard error types
#[derive(Error, Debug)]
pub enum Error {
    /// A filter or sort column references a name absent from the experiment schema
    #[error("schema violation: no hyperparameter or metric named {column:?} in the experiment")]
    SchemaViolation {
        /// Name of the unknown column
        column: String,
    },

    /// Interval constraint with an empty or non-finite range
    #[error("invalid interval on column {column:?}: [{min}, {max}]")]
    InvalidInterval {
        /// Column the interval was applied to
        column: String,
        /// Lower bound of the interval
        min: f64,
        /// Upper bound of the interval
        max: f64,
    },

    /// Discrete-set constraint with no permitted values
    #[error("empty discrete set on column {column:?}")]
    EmptyDiscreteSet {
        /// Column the discrete set was applied to
        column: String,
    },

    /// Pattern constraint that failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Constraint type does not match the column's declared type
    #[error("type mismatch on column {column:?}: constraint expects {expected}, column is {actual}")]
    TypeMismatch {
        /// Column the constraint was applied to
        column: String,
        /// Value type the constraint requires
        expected: HParamType,
        /// Declared type of the column
        actual: HParamType,
    },

    /// Negative pagination offset or limit
    #[error("invalid pagination: start_index {start_index}, slice_size {slice_size:?}")]
    InvalidPagination {
        /// Requested pagination offset
        start_index: i64,
        /// Requested pagination limit, if any
        slice_size: Option<i64>,
    },
}
