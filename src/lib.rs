//! # Runboard: Session Group Comparison Engine
//!
//! Runboard answers a single query: given recorded experiment sessions
//! (independent runs of a training job annotated with hyperparameter
//! values and time-series metrics), produce a paginated, filtered, and
//! sorted view of **session groups** suitable for a comparison table.
//!
//! The pipeline is Aggregate → Filter → Sort → Paginate over an immutable
//! snapshot of session records. Storage, transport, and authorization live
//! outside this crate; callers hand in decoded records and get back a
//! deterministic page of group summaries.
//!
//! ## Example
//!
//! ```rust
//! use runboard::experiment::{ExperimentSchema, HParamInfo, MetricSample, SessionRecord};
//! use runboard::query::{ColumnSpec, ListSessionGroupsRequest, QueryEngine};
//!
//! # fn main() -> runboard::Result<()> {
//! let mut schema = ExperimentSchema::new();
//! schema.add_hparam(HParamInfo::new("initial_temp"));
//! schema.add_metric("delta_temp");
//!
//! let sessions = vec![
//!     SessionRecord::builder("session_1")
//!         .group_name("group_1")
//!         .hparam("initial_temp", 270.0)
//!         .sample("delta_temp", MetricSample::new(1, 1.0, 20.0))
//!         .sample("delta_temp", MetricSample::new(2, 10.0, 15.0))
//!         .build(),
//! ];
//!
//! let request = ListSessionGroupsRequest::new()
//!     .col_param(ColumnSpec::hparam("initial_temp").interval(270.0, 282.0));
//!
//! let response = QueryEngine::new().list_session_groups(&schema, &sessions, &request)?;
//! assert_eq!(response.total_size(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;
pub mod experiment;
pub mod hparam;
pub mod query;

pub use error::{Error, Result};
pub use query::QueryEngine;
