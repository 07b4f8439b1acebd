//! Column specifications
//!
//! A column is a sortable/filterable attribute of a session group: either a
//! hyperparameter name or a metric tag. Each request column carries at most
//! one constraint (interval, discrete set, or pattern) and an optional sort
//! direction. A column with only a direction sorts without filtering; one
//! with only a constraint filters without sorting.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::experiment::ExperimentSchema;
use crate::hparam::{HParamType, HParamValue};

/// Identity of a filterable/sortable column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnId {
    /// A hyperparameter column, by name.
    Hparam(String),
    /// A metric column, by tag.
    Metric(String),
}

impl ColumnId {
    /// Get the column's name or tag.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Hparam(name) | Self::Metric(name) => name,
        }
    }
}

/// A single filter constraint on a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Numeric interval, inclusive at both ends.
    Interval {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
    /// Finite set of permitted values, type-matched to the column.
    DiscreteSet(Vec<HParamValue>),
    /// Unanchored, case-sensitive regex on the value's string form.
    Pattern(String),
}

/// Sort direction for a column used as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest values first.
    Ascending,
    /// Largest values first. Groups missing the key still sort last.
    Descending,
}

/// One column of a list-session-groups request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    column: ColumnId,
    constraint: Option<Constraint>,
    sort: Option<SortDirection>,
}

impl ColumnSpec {
    /// Reference a hyperparameter column, with no constraint and no sort.
    #[must_use]
    pub fn hparam(name: impl Into<String>) -> Self {
        Self {
            column: ColumnId::Hparam(name.into()),
            constraint: None,
            sort: None,
        }
    }

    /// Reference a metric column, with no constraint and no sort.
    #[must_use]
    pub fn metric(tag: impl Into<String>) -> Self {
        Self {
            column: ColumnId::Metric(tag.into()),
            constraint: None,
            sort: None,
        }
    }

    /// Constrain the column to a closed numeric interval.
    #[must_use]
    pub fn interval(mut self, min: f64, max: f64) -> Self {
        self.constraint = Some(Constraint::Interval { min, max });
        self
    }

    /// Constrain the column to a discrete set of permitted values.
    #[must_use]
    pub fn discrete_set(mut self, values: impl IntoIterator<Item = HParamValue>) -> Self {
        self.constraint = Some(Constraint::DiscreteSet(values.into_iter().collect()));
        self
    }

    /// Constrain the column's string form to match a regex.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.constraint = Some(Constraint::Pattern(pattern.into()));
        self
    }

    /// Use the column as a sort key.
    #[must_use]
    pub const fn sort(mut self, direction: SortDirection) -> Self {
        self.sort = Some(direction);
        self
    }

    /// Get the column identity.
    #[must_use]
    pub const fn column(&self) -> &ColumnId {
        &self.column
    }

    /// Get the filter constraint, if any.
    #[must_use]
    pub const fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    /// Get the sort direction, if the column is a sort key.
    #[must_use]
    pub const fn sort_direction(&self) -> Option<SortDirection> {
        self.sort
    }

    /// Validate this column against the experiment schema.
    ///
    /// Returns the column's declared value type. Metric columns are always
    /// `float64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaViolation`] for an undeclared column,
    /// [`Error::InvalidInterval`] for an empty or non-finite interval,
    /// [`Error::EmptyDiscreteSet`] for a discrete set with no values, and
    /// [`Error::TypeMismatch`] when the constraint's value type does not
    /// match the column's declared type.
    pub fn validate(&self, schema: &ExperimentSchema) -> Result<HParamType> {
        let declared = match &self.column {
            ColumnId::Hparam(name) => {
                schema
                    .hparam_type(name)
                    .ok_or_else(|| Error::SchemaViolation {
                        column: name.clone(),
                    })?
            }
            ColumnId::Metric(tag) => {
                if !schema.has_metric(tag) {
                    return Err(Error::SchemaViolation {
                        column: tag.clone(),
                    });
                }
                HParamType::Float64
            }
        };

        match &self.constraint {
            None | Some(Constraint::Pattern(_)) => {}
            Some(Constraint::Interval { min, max }) => {
                if declared != HParamType::Float64 {
                    return Err(Error::TypeMismatch {
                        column: self.column.name().to_string(),
                        expected: HParamType::Float64,
                        actual: declared,
                    });
                }
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(Error::InvalidInterval {
                        column: self.column.name().to_string(),
                        min: *min,
                        max: *max,
                    });
                }
            }
            Some(Constraint::DiscreteSet(values)) => {
                if values.is_empty() {
                    return Err(Error::EmptyDiscreteSet {
                        column: self.column.name().to_string(),
                    });
                }
                for value in values {
                    if value.hparam_type() != declared {
                        return Err(Error::TypeMismatch {
                            column: self.column.name().to_string(),
                            expected: value.hparam_type(),
                            actual: declared,
                        });
                    }
                }
            }
        }

        Ok(declared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::HParamInfo;

    fn schema() -> ExperimentSchema {
        let mut schema = ExperimentSchema::new();
        schema.add_hparam(HParamInfo::new("lr"));
        schema.add_hparam(HParamInfo::typed("model", HParamType::Str));
        schema.add_metric("loss");
        schema
    }

    #[test]
    fn test_validate_unknown_column() {
        let err = ColumnSpec::hparam("nope").validate(&schema()).unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { .. }));

        let err = ColumnSpec::metric("nope").validate(&schema()).unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { .. }));
    }

    #[test]
    fn test_validate_interval() {
        assert!(ColumnSpec::hparam("lr")
            .interval(0.0, 1.0)
            .validate(&schema())
            .is_ok());

        let err = ColumnSpec::hparam("lr")
            .interval(2.0, 1.0)
            .validate(&schema())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInterval { .. }));

        let err = ColumnSpec::hparam("model")
            .interval(0.0, 1.0)
            .validate(&schema())
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_validate_discrete_set() {
        let err = ColumnSpec::metric("loss")
            .discrete_set([])
            .validate(&schema())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyDiscreteSet { .. }));

        let err = ColumnSpec::metric("loss")
            .discrete_set([HParamValue::from("low")])
            .validate(&schema())
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        assert!(ColumnSpec::hparam("model")
            .discrete_set([HParamValue::from("resnet")])
            .validate(&schema())
            .is_ok());
    }

    #[test]
    fn test_metric_columns_are_float64() {
        assert_eq!(
            ColumnSpec::metric("loss").validate(&schema()).unwrap(),
            HParamType::Float64
        );
    }
}
