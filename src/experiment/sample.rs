//! Metric Sample - one scalar data point of a session metric
//!
//! A metric is a named scalar time series recorded during a session,
//! sampled at discrete training steps. The representative value of a
//! series is its temporally last sample: greatest step, ties broken by
//! wall time, further ties by the larger value (last-write-wins).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single metric data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    step: i64,
    wall_time_secs: f64,
    value: f64,
}

impl MetricSample {
    /// Create a new metric sample.
    ///
    /// # Arguments
    ///
    /// * `step` - Training step or epoch number
    /// * `wall_time_secs` - Wall-clock time of the measurement, in seconds
    /// * `value` - Scalar metric value
    #[must_use]
    pub const fn new(step: i64, wall_time_secs: f64, value: f64) -> Self {
        Self {
            step,
            wall_time_secs,
            value,
        }
    }

    /// Get the training step.
    #[must_use]
    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Get the wall-clock time in seconds.
    #[must_use]
    pub const fn wall_time_secs(&self) -> f64 {
        self.wall_time_secs
    }

    /// Get the scalar value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Compare two samples by recency.
    ///
    /// Orders by step, then wall time, then value, so the maximum under
    /// this order is the last-write-wins representative of a series.
    #[must_use]
    pub fn cmp_recency(&self, other: &Self) -> Ordering {
        self.step
            .cmp(&other.step)
            .then_with(|| self.wall_time_secs.total_cmp(&other.wall_time_secs))
            .then_with(|| self.value.total_cmp(&other.value))
    }
}
