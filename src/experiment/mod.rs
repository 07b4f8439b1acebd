//! Experiment Tracking Schema
//!
//! Data structures for recorded experiments: the declared schema, session
//! records with hyperparameters and metric series, and the in-memory store
//! that snapshots them for the query engine.
//!
//! ## Schema Overview
//!
//! ```text
//! ExperimentSchema (1) ──< SessionRecord (N)
//!                               │
//!                               └──< MetricSample (N) [time-series, per tag]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use runboard::experiment::{
//!     ExperimentSchema, HParamInfo, MetricSample, SessionRecord, SessionStatus,
//! };
//!
//! let mut schema = ExperimentSchema::new();
//! schema.add_hparam(HParamInfo::new("learning_rate"));
//! schema.add_metric("loss");
//!
//! let session = SessionRecord::builder("session-001")
//!     .group_name("trial-7")
//!     .status(SessionStatus::Success)
//!     .hparam("learning_rate", 0.01)
//!     .sample("loss", MetricSample::new(0, 1.0, 0.9))
//!     .sample("loss", MetricSample::new(1, 2.0, 0.4))
//!     .build();
//!
//! assert_eq!(session.last_sample("loss").unwrap().step(), 1);
//! ```

mod sample;
mod schema;
mod session;
mod store;

pub use sample::MetricSample;
pub use schema::{ExperimentSchema, HParamInfo};
pub use session::{SessionRecord, SessionRecordBuilder, SessionStatus};
pub use store::SessionStore;
