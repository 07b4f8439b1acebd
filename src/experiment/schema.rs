//! Experiment Schema - declared hyperparameters and metrics
//!
//! The schema is the experiment-level contract: which hyperparameter names
//! exist (with their declared types) and which metric tags exist. Filter
//! and sort columns are validated against it; session data outside it is
//! ignored by aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::hparam::HParamType;

/// Declared info for one hyperparameter column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HParamInfo {
    name: String,
    hparam_type: HParamType,
    description: Option<String>,
}

impl HParamInfo {
    /// Declare a hyperparameter with the default `float64` type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hparam_type: HParamType::default(),
            description: None,
        }
    }

    /// Declare a hyperparameter with an explicit type.
    #[must_use]
    pub fn typed(name: impl Into<String>, hparam_type: HParamType) -> Self {
        Self {
            name: name.into(),
            hparam_type,
            description: None,
        }
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Get the hyperparameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared type.
    #[must_use]
    pub const fn hparam_type(&self) -> HParamType {
        self.hparam_type
    }
}

/// Declared schema of one experiment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentSchema {
    description: String,
    user: String,
    hparam_infos: Vec<HParamInfo>,
    metric_tags: BTreeSet<String>,
}

impl ExperimentSchema {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the experiment description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the experiment owner.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Declare a hyperparameter column.
    pub fn add_hparam(&mut self, info: HParamInfo) {
        self.hparam_infos.push(info);
    }

    /// Declare a metric tag.
    pub fn add_metric(&mut self, tag: impl Into<String>) {
        self.metric_tags.insert(tag.into());
    }

    /// Get the experiment description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the experiment owner.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Look up the declared type of a hyperparameter, if it is declared.
    #[must_use]
    pub fn hparam_type(&self, name: &str) -> Option<HParamType> {
        self.hparam_infos
            .iter()
            .find(|info| info.name == name)
            .map(|info| info.hparam_type)
    }

    /// Check whether a metric tag is declared.
    #[must_use]
    pub fn has_metric(&self, tag: &str) -> bool {
        self.metric_tags.contains(tag)
    }

    /// Iterate over declared hyperparameters.
    pub fn hparam_infos(&self) -> impl Iterator<Item = &HParamInfo> {
        self.hparam_infos.iter()
    }

    /// Iterate over declared metric tags.
    pub fn metric_tags(&self) -> impl Iterator<Item = &str> {
        self.metric_tags.iter().map(String::as_str)
    }
}
