//! Column Filter Engine
//!
//! Evaluates a conjunction of column predicates against every session
//! group. A group survives only if it satisfies every predicate; there are
//! no partial matches, and filtering never truncates a surviving group's
//! members or metrics. A group missing the column's value fails every
//! constraint kind.

use regex::Regex;

use super::column::{ColumnId, ColumnSpec, Constraint};
use super::group::SessionGroup;
use crate::error::Result;
use crate::hparam::HParamValue;

/// One compiled column predicate.
#[derive(Debug)]
pub(crate) struct ColumnPredicate {
    column: ColumnId,
    kind: PredicateKind,
}

#[derive(Debug)]
enum PredicateKind {
    Interval { min: f64, max: f64 },
    DiscreteSet(Vec<HParamValue>),
    Pattern(Regex),
}

impl ColumnPredicate {
    fn matches(&self, group: &SessionGroup) -> bool {
        let Some(value) = group.value_of(&self.column) else {
            return false;
        };
        match &self.kind {
            PredicateKind::Interval { min, max } => value
                .as_f64()
                .is_some_and(|v| *min <= v && v <= *max),
            PredicateKind::DiscreteSet(permitted) => permitted.contains(&value),
            PredicateKind::Pattern(regex) => regex.is_match(&value.to_string()),
        }
    }
}

/// Compile the constrained columns of a request into predicates.
///
/// Columns must already be validated against the schema; this only
/// compiles the regex of pattern constraints, which is the one check
/// validation defers.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidPattern`] if a pattern fails to compile.
pub(crate) fn compile(specs: &[ColumnSpec]) -> Result<Vec<ColumnPredicate>> {
    let mut predicates = Vec::new();
    for spec in specs {
        let Some(constraint) = spec.constraint() else {
            continue;
        };
        let kind = match constraint {
            Constraint::Interval { min, max } => PredicateKind::Interval {
                min: *min,
                max: *max,
            },
            Constraint::DiscreteSet(values) => PredicateKind::DiscreteSet(values.clone()),
            Constraint::Pattern(pattern) => PredicateKind::Pattern(Regex::new(pattern)?),
        };
        predicates.push(ColumnPredicate {
            column: spec.column().clone(),
            kind,
        });
    }
    Ok(predicates)
}

/// Retain the groups satisfying every predicate.
pub(crate) fn retain(
    mut groups: Vec<SessionGroup>,
    predicates: &[ColumnPredicate],
) -> Vec<SessionGroup> {
    if predicates.is_empty() {
        return groups;
    }
    groups.retain(|group| predicates.iter().all(|predicate| predicate.matches(group)));
    groups
}
