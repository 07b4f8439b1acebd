//! Multi-Key Sort Engine
//!
//! Stable lexicographic sort over an ordered list of (column, direction)
//! keys. One comparator per key closes over that key's extraction, missing
//! policy, and direction; the comparators fold left-to-right with a
//! short-circuit on the first non-equal result.
//!
//! Missing-value policy: a group missing a key's value sorts after every
//! group that has one, regardless of direction. Descending reverses only
//! present-vs-present comparisons. Ties across all keys keep the incoming
//! (discovery) order because the underlying sort is stable.

use std::cmp::Ordering;

use super::column::{ColumnId, ColumnSpec, SortDirection};
use super::group::SessionGroup;

/// One resolved sort key.
#[derive(Debug, Clone)]
pub(crate) struct SortKey {
    column: ColumnId,
    direction: SortDirection,
}

impl SortKey {
    fn compare(&self, a: &SessionGroup, b: &SessionGroup) -> Ordering {
        match (a.value_of(&self.column), b.value_of(&self.column)) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(x), Some(y)) => {
                let present = x.natural_cmp(&y);
                match self.direction {
                    SortDirection::Ascending => present,
                    SortDirection::Descending => present.reverse(),
                }
            }
        }
    }
}

/// Extract the sort keys of a request, in column order.
pub(crate) fn keys(specs: &[ColumnSpec]) -> Vec<SortKey> {
    specs
        .iter()
        .filter_map(|spec| {
            spec.sort_direction().map(|direction| SortKey {
                column: spec.column().clone(),
                direction,
            })
        })
        .collect()
}

/// Sort the groups by the given keys.
///
/// With no keys the incoming order is returned untouched.
pub(crate) fn apply(mut groups: Vec<SessionGroup>, keys: &[SortKey]) -> Vec<SessionGroup> {
    if keys.is_empty() {
        return groups;
    }
    groups.sort_by(|a, b| {
        keys.iter()
            .map(|key| key.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    groups
}
