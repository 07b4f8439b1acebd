//! Session group query engine
//!
//! Turns raw per-session records into ranked, filtered session-group
//! summaries: Aggregate → Filter → Sort → Paginate. Every stage is a pure
//! transformation of the group collection; the engine holds no state, does
//! no I/O, and produces identical output for identical input.

mod column;
mod filter;
mod group;
mod page;
mod sort;

pub use column::{ColumnId, ColumnSpec, Constraint, SortDirection};
pub use group::{SessionGroup, SessionSummary};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::experiment::{ExperimentSchema, SessionRecord};
use page::Pagination;

/// A list-session-groups request.
///
/// Columns double as filters and sort keys: a column with only a sort
/// direction participates in sorting without filtering, and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListSessionGroupsRequest {
    #[serde(default)]
    col_params: Vec<ColumnSpec>,
    #[serde(default)]
    start_index: i64,
    #[serde(default)]
    slice_size: Option<i64>,
}

impl ListSessionGroupsRequest {
    /// Create an empty request: no filters, no sort, no pagination window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column specification.
    #[must_use]
    pub fn col_param(mut self, spec: ColumnSpec) -> Self {
        self.col_params.push(spec);
        self
    }

    /// Set the pagination offset.
    #[must_use]
    pub const fn start_index(mut self, start_index: i64) -> Self {
        self.start_index = start_index;
        self
    }

    /// Set the pagination limit.
    #[must_use]
    pub const fn slice_size(mut self, slice_size: i64) -> Self {
        self.slice_size = Some(slice_size);
        self
    }

    /// Get the column specifications.
    #[must_use]
    pub fn col_params(&self) -> &[ColumnSpec] {
        &self.col_params
    }
}

/// A page of session groups plus the pre-pagination total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSessionGroupsResponse {
    session_groups: Vec<SessionGroup>,
    total_size: usize,
}

impl ListSessionGroupsResponse {
    /// Get the session groups in response order.
    #[must_use]
    pub fn session_groups(&self) -> &[SessionGroup] {
        &self.session_groups
    }

    /// Get the count of groups that passed filtering, before pagination.
    #[must_use]
    pub const fn total_size(&self) -> usize {
        self.total_size
    }
}

/// Query engine for session group listings.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryEngine {
    _private: (),
}

impl QueryEngine {
    /// Create a new query engine.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Produce the paginated, filtered, sorted session-group view.
    ///
    /// # Arguments
    /// * `schema` - Declared hyperparameters and metric tags of the experiment
    /// * `sessions` - Decoded session records in discovery order
    /// * `request` - Column constraints, sort keys, and pagination window
    ///
    /// # Errors
    /// Returns an error, with no partial result, if:
    /// - A column references a name absent from the schema
    /// - A constraint is malformed (empty interval or set, bad pattern,
    ///   type mismatch with the column's declared type)
    /// - The pagination offset or limit is negative
    ///
    /// # Example
    /// ```rust
    /// use runboard::experiment::{ExperimentSchema, HParamInfo, SessionRecord};
    /// use runboard::query::{ColumnSpec, ListSessionGroupsRequest, QueryEngine, SortDirection};
    ///
    /// # fn main() -> runboard::Result<()> {
    /// let mut schema = ExperimentSchema::new();
    /// schema.add_hparam(HParamInfo::new("learning_rate"));
    ///
    /// let sessions = vec![
    ///     SessionRecord::builder("s1").hparam("learning_rate", 0.1).build(),
    ///     SessionRecord::builder("s2").hparam("learning_rate", 0.01).build(),
    /// ];
    ///
    /// let request = ListSessionGroupsRequest::new()
    ///     .col_param(ColumnSpec::hparam("learning_rate").sort(SortDirection::Ascending));
    ///
    /// let response = QueryEngine::new().list_session_groups(&schema, &sessions, &request)?;
    /// assert_eq!(response.total_size(), 2);
    /// assert_eq!(response.session_groups()[0].name(), "s2");
    /// # Ok(())
    /// # }
    /// ```
    pub fn list_session_groups(
        &self,
        schema: &ExperimentSchema,
        sessions: &[SessionRecord],
        request: &ListSessionGroupsRequest,
    ) -> Result<ListSessionGroupsResponse> {
        // Reject a malformed request before doing any work.
        let pagination = Pagination::from_request(request.start_index, request.slice_size)?;
        for spec in &request.col_params {
            spec.validate(schema)?;
        }
        let predicates = filter::compile(&request.col_params)?;
        let sort_keys = sort::keys(&request.col_params);

        let groups = group::aggregate(schema, sessions);
        debug!(
            sessions = sessions.len(),
            groups = groups.len(),
            "aggregated session groups"
        );

        let filtered = filter::retain(groups, &predicates);
        let total_size = filtered.len();
        debug!(
            predicates = predicates.len(),
            retained = total_size,
            "applied column filters"
        );

        let sorted = sort::apply(filtered, &sort_keys);
        let session_groups = pagination.window(sorted);

        Ok(ListSessionGroupsResponse {
            session_groups,
            total_size,
        })
    }
}
