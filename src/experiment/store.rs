//! Session Store - in-memory record store adapter
//!
//! The store is the boundary between ingestion and the query engine: it
//! accepts the experiment schema, session records, and late-arriving metric
//! samples, and hands the engine an immutable snapshot. Decoding whatever
//! on-disk or wire format holds this data is the caller's concern; the
//! engine only ever sees fully-decoded records with step-ordered series.

use std::collections::HashMap;

use super::schema::ExperimentSchema;
use super::sample::MetricSample;
use super::session::SessionRecord;

/// In-memory store for one experiment's session data.
#[derive(Debug, Default)]
pub struct SessionStore {
    schema: ExperimentSchema,
    sessions: Vec<SessionRecord>,
    index: HashMap<String, usize>,
}

impl SessionStore {
    /// Create an empty store with an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store for the given experiment schema.
    #[must_use]
    pub fn with_schema(schema: ExperimentSchema) -> Self {
        Self {
            schema,
            sessions: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Get the experiment schema.
    #[must_use]
    pub const fn schema(&self) -> &ExperimentSchema {
        &self.schema
    }

    /// Check if the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Get the number of stored sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Add a session record, replacing any earlier record with the same name.
    ///
    /// Replacement keeps the session's original discovery position so group
    /// membership order stays stable across re-ingestion.
    pub fn add_session(&mut self, session: SessionRecord) {
        if let Some(&slot) = self.index.get(session.name()) {
            self.sessions[slot] = session;
        } else {
            self.index
                .insert(session.name().to_string(), self.sessions.len());
            self.sessions.push(session);
        }
    }

    /// Get a session by name.
    #[must_use]
    pub fn get_session(&self, name: &str) -> Option<&SessionRecord> {
        self.index.get(name).map(|&slot| &self.sessions[slot])
    }

    /// Get all sessions in discovery order.
    #[must_use]
    pub fn sessions(&self) -> &[SessionRecord] {
        &self.sessions
    }

    /// Get the sample series for one (session, metric) pair, ordered by step.
    #[must_use]
    pub fn get_samples(&self, session: &str, tag: &str) -> Vec<MetricSample> {
        self.get_session(session)
            .and_then(|record| record.samples(tag))
            .map(<[MetricSample]>::to_vec)
            .unwrap_or_default()
    }
}
