//! Session Record - one recorded run of a training job
//!
//! A session carries hyperparameter values fixed at start time and the
//! scalar metric series recorded while it ran. Records are immutable
//! snapshots: the query engine never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::sample::MetricSample;
use crate::hparam::HParamValue;

/// Terminal status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// No end record was written for the session.
    Unknown,
    /// Session is still executing.
    Running,
    /// Session completed successfully.
    Success,
    /// Session failed with an error.
    Failure,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

/// One recorded session of an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    name: String,
    group_name: String,
    status: SessionStatus,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    hparams: BTreeMap<String, HParamValue>,
    metrics: BTreeMap<String, Vec<MetricSample>>,
}

impl SessionRecord {
    /// Create a builder for a session record.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SessionRecordBuilder {
        SessionRecordBuilder::new(name)
    }

    /// Get the session name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the group identity key for this session.
    ///
    /// A session with an unset group name forms a singleton group keyed by
    /// its own name.
    #[must_use]
    pub fn group_key(&self) -> &str {
        if self.group_name.is_empty() {
            &self.name
        } else {
            &self.group_name
        }
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

    /// Get the hyperparameter value map.
    #[must_use]
    pub const fn hparams(&self) -> &BTreeMap<String, HParamValue> {
        &self.hparams
    }

    /// Get one hyperparameter value, if the session reports it.
    #[must_use]
    pub fn hparam(&self, name: &str) -> Option<&HParamValue> {
        self.hparams.get(name)
    }

    /// Iterate over the metric tags this session reported.
    pub fn metric_tags(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    /// Get the full sample series for a metric tag, ordered by step.
    #[must_use]
    pub fn samples(&self, tag: &str) -> Option<&[MetricSample]> {
        self.metrics.get(tag).map(Vec::as_slice)
    }

    /// Get the representative (temporally last) sample for a metric tag.
    ///
    /// Returns `None` if the session never reported the tag. The series is
    /// already step-ordered, but ties on step are still resolved by the
    /// recency rule, so the maximum is taken explicitly.
    #[must_use]
    pub fn last_sample(&self, tag: &str) -> Option<MetricSample> {
        self.metrics
            .get(tag)?
            .iter()
            .max_by(|a, b| a.cmp_recency(b))
            .copied()
    }
}

/// Builder for [`SessionRecord`].
#[derive(Debug)]
pub struct SessionRecordBuilder {
    name: String,
    group_name: String,
    status: SessionStatus,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    hparams: BTreeMap<String, HParamValue>,
    metrics: BTreeMap<String, Vec<MetricSample>>,
}

impl SessionRecordBuilder {
    /// Create a new builder with the session name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group_name: String::new(),
            status: SessionStatus::default(),
            started_at: None,
            ended_at: None,
            hparams: BTreeMap::new(),
            metrics: BTreeMap::new(),
        }
    }

    /// Set the group identity.
    #[must_use]
    pub fn group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = group_name.into();
        self
    }

    /// Set the terminal status.
    #[must_use]
    pub const fn status(mut self, status: SessionStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the start timestamp.
    #[must_use]
    pub const fn started_at(mut self, at: DateTime<Utc>) -> Self {
        self.started_at = Some(at);
        self
    }

    /// Set the end timestamp.
    #[must_use]
    pub const fn ended_at(mut self, at: DateTime<Utc>) -> Self {
        self.ended_at = Some(at);
        self
    }

    /// Set one hyperparameter value.
    #[must_use]
    pub fn hparam(mut self, name: impl Into<String>, value: impl Into<HParamValue>) -> Self {
        self.hparams.insert(name.into(), value.into());
        self
    }

    /// Append one metric sample.
    #[must_use]
    pub fn sample(mut self, tag: impl Into<String>, sample: MetricSample) -> Self {
        self.metrics.entry(tag.into()).or_default().push(sample);
        self
    }

    /// Build the record, ordering every metric series by step.
    #[must_use]
    pub fn build(mut self) -> SessionRecord {
        for series in self.metrics.values_mut() {
            series.sort_by_key(MetricSample::step);
        }
        SessionRecord {
            name: self.name,
            group_name: self.group_name,
            status: self.status,
            started_at: self.started_at,
            ended_at: self.ended_at,
            hparams: self.hparams,
            metrics: self.metrics,
        }
    }
}
