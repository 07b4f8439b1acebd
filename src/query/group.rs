//! Group Aggregator
//!
//! Merges sessions sharing a group identity into one comparable row. Two
//! distinct reduction rules apply and must stay distinct:
//!
//! - Hyperparameters are static and rarely conflict, so the **first**
//!   value seen in member discovery order wins.
//! - Metrics are inherently time-ordered, so the temporally **last**
//!   sample wins: greatest step, ties by wall time, then by larger value.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::column::ColumnId;
use crate::experiment::{ExperimentSchema, MetricSample, SessionRecord, SessionStatus};
use crate::hparam::HParamValue;

/// Per-member view of a session inside a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    name: String,
    status: SessionStatus,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    metric_values: BTreeMap<String, MetricSample>,
}

impl SessionSummary {
    /// Get the session name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the terminal status.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Get the start timestamp, if recorded.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Get the end timestamp, if recorded.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Get this session's own last-sample-per-tag metric map.
    #[must_use]
    pub const fn metric_values(&self) -> &BTreeMap<String, MetricSample> {
        &self.metric_values
    }
}

/// One or more sessions sharing a group identity, shown as a single row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionGroup {
    name: String,
    hparams: BTreeMap<String, HParamValue>,
    metric_values: BTreeMap<String, MetricSample>,
    sessions: Vec<SessionSummary>,
}

impl SessionGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            hparams: BTreeMap::new(),
            metric_values: BTreeMap::new(),
            sessions: Vec::new(),
        }
    }

    /// Get the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the resolved group-level hyperparameter map.
    ///
    /// Contains only schema-declared names; a name no member reports is
    /// absent.
    #[must_use]
    pub const fn hparams(&self) -> &BTreeMap<String, HParamValue> {
        &self.hparams
    }

    /// Get the resolved group-level metric map.
    ///
    /// One representative sample per tag, taken over the union of all
    /// members' series. A tag no member reports is absent.
    #[must_use]
    pub const fn metric_values(&self) -> &BTreeMap<String, MetricSample> {
        &self.metric_values
    }

    /// Get the member sessions in discovery order.
    #[must_use]
    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    /// Get this group's value for a filter/sort column, if present.
    ///
    /// Metric columns resolve to the group-level representative value.
    #[must_use]
    pub fn value_of(&self, column: &ColumnId) -> Option<HParamValue> {
        match column {
            ColumnId::Hparam(name) => self.hparams.get(name).cloned(),
            ColumnId::Metric(tag) => self
                .metric_values
                .get(tag)
                .map(|sample| HParamValue::F64(sample.value())),
        }
    }

    fn absorb(&mut self, schema: &ExperimentSchema, session: &SessionRecord) {
        for (name, value) in session.hparams() {
            if schema.hparam_type(name).is_none() {
                continue;
            }
            // First member to report a name wins; later conflicts are ignored.
            self.hparams
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }

        let mut metric_values = BTreeMap::new();
        for tag in session.metric_tags() {
            if !schema.has_metric(tag) {
                continue;
            }
            let Some(last) = session.last_sample(tag) else {
                continue;
            };
            metric_values.insert(tag.to_string(), last);

            let representative = self.metric_values.entry(tag.to_string()).or_insert(last);
            if representative.cmp_recency(&last).is_lt() {
                *representative = last;
            }
        }

        self.sessions.push(SessionSummary {
            name: session.name().to_string(),
            status: session.status(),
            started_at: session.started_at(),
            ended_at: session.ended_at(),
            metric_values,
        });
    }
}

/// Aggregate session records into session groups.
///
/// Scans the records once in supplied order: the first sight of a group
/// identity creates the group, and members append in scan order, which
/// fixes the discovery order the reduction rules above depend on. The
/// returned collection is in group discovery order; final output order is
/// owned by the sort engine.
#[must_use]
pub fn aggregate(schema: &ExperimentSchema, sessions: &[SessionRecord]) -> Vec<SessionGroup> {
    let mut groups: Vec<SessionGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for session in sessions {
        let key = session.group_key();
        let slot = *index.entry(key.to_string()).or_insert_with(|| {
            groups.push(SessionGroup::new(key));
            groups.len() - 1
        });
        groups[slot].absorb(schema, session);
    }

    groups
}
