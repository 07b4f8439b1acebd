//! Hyperparameter values
//!
//! A hyperparameter is a named configuration value fixed for the lifetime
//! of a session. Values are an explicit tagged union over float64, string,
//! and bool, with exhaustive matching in comparators, formatters, and
//! predicate evaluators, so adding a new column type is a compile-time
//! exercise rather than a runtime surprise.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Declared type of a hyperparameter column.
///
/// Hyperparameters declared without a type default to [`Float64`].
///
/// [`Float64`]: HParamType::Float64
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HParamType {
    /// 64-bit floating point value
    Float64,
    /// UTF-8 string value
    Str,
    /// Boolean value
    Bool,
}

impl Default for HParamType {
    fn default() -> Self {
        Self::Float64
    }
}

impl fmt::Display for HParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float64 => write!(f, "float64"),
            Self::Str => write!(f, "string"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

/// A single hyperparameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HParamValue {
    /// 64-bit floating point value
    F64(f64),
    /// Boolean value
    Bool(bool),
    /// UTF-8 string value
    Str(String),
}

impl HParamValue {
    /// Get the type tag of this value.
    #[must_use]
    pub const fn hparam_type(&self) -> HParamType {
        match self {
            Self::F64(_) => HParamType::Float64,
            Self::Str(_) => HParamType::Str,
            Self::Bool(_) => HParamType::Bool,
        }
    }

    /// Get the numeric value, if this is a float64.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            Self::Str(_) | Self::Bool(_) => None,
        }
    }

    /// Compare two values in the natural order of their type.
    ///
    /// Floats compare by total order (so NaN is still deterministic),
    /// strings lexicographically, and `false < true`. Values of different
    /// types never belong to the same column; when they meet anyway they
    /// order by type tag so the result is still total and deterministic.
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::F64(a), Self::F64(b)) => a.total_cmp(b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (a, b) => type_rank(a).cmp(&type_rank(b)),
        }
    }
}

const fn type_rank(value: &HParamValue) -> u8 {
    match value {
        HParamValue::F64(_) => 0,
        HParamValue::Bool(_) => 1,
        HParamValue::Str(_) => 2,
    }
}

impl fmt::Display for HParamValue {
    /// Render the value in its default decimal/textual form.
    ///
    /// This is the string form pattern predicates match against: floats use
    /// Rust's default formatting, bools render as `true`/`false`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F64(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for HParamValue {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<bool> for HParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for HParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for HParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}
