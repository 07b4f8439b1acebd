//! Integration tests for the session group query pipeline
//!
//! Four sessions across three groups, with one multi-member group, optional
//! hyperparameters, and optional metrics, exercised through every request
//! shape: empty, filtered, sorted, and paginated.

use runboard::experiment::{
    ExperimentSchema, HParamInfo, MetricSample, SessionRecord, SessionStatus, SessionStore,
};
use runboard::hparam::{HParamType, HParamValue};
use runboard::query::{
    ColumnSpec, ListSessionGroupsRequest, ListSessionGroupsResponse, QueryEngine, SortDirection,
};

fn fixture_schema() -> ExperimentSchema {
    let mut schema = ExperimentSchema::new()
        .with_description("Test experiment")
        .with_user("Test user");
    schema.add_hparam(HParamInfo::new("initial_temp"));
    schema.add_hparam(HParamInfo::new("final_temp"));
    schema.add_hparam(HParamInfo::typed("string_hparam", HParamType::Str));
    schema.add_hparam(HParamInfo::typed("bool_hparam", HParamType::Bool));
    schema.add_hparam(HParamInfo::typed("optional_string_hparam", HParamType::Str));
    schema.add_metric("current_temp");
    schema.add_metric("delta_temp");
    schema.add_metric("optional_metric");
    schema
}

fn fixture_sessions() -> Vec<SessionRecord> {
    vec![
        SessionRecord::builder("session_1")
            .group_name("group_1")
            .status(SessionStatus::Success)
            .hparam("initial_temp", 270.0)
            .hparam("final_temp", 150.0)
            .hparam("string_hparam", "a string")
            .hparam("bool_hparam", true)
            .sample("current_temp", MetricSample::new(1, 1.0, 10.0))
            .sample("delta_temp", MetricSample::new(1, 1.0, 20.0))
            .sample("delta_temp", MetricSample::new(2, 10.0, 15.0))
            .sample("optional_metric", MetricSample::new(1, 1.0, 20.0))
            .sample("optional_metric", MetricSample::new(20, 2.0, 33.0))
            .build(),
        SessionRecord::builder("session_2")
            .group_name("group_2")
            .status(SessionStatus::Success)
            .hparam("initial_temp", 280.0)
            .hparam("final_temp", 100.0)
            .hparam("string_hparam", "AAAAA")
            .hparam("bool_hparam", false)
            .sample("current_temp", MetricSample::new(1, 1.0, 100.0))
            .sample("delta_temp", MetricSample::new(1, 1.0, 200.0))
            .sample("delta_temp", MetricSample::new(2, 10.0, 150.0))
            .build(),
        SessionRecord::builder("session_3")
            .group_name("group_2")
            .status(SessionStatus::Success)
            .hparam("initial_temp", 280.0)
            .hparam("final_temp", 100.0)
            .hparam("string_hparam", "AAAAA")
            .hparam("bool_hparam", false)
            .sample("current_temp", MetricSample::new(1, 1.0, 1.0))
            .sample("delta_temp", MetricSample::new(1, 1.0, 2.0))
            .sample("delta_temp", MetricSample::new(2, 10.0, 1.5))
            .build(),
        SessionRecord::builder("session_4")
            .group_name("group_3")
            .status(SessionStatus::Success)
            .hparam("initial_temp", 300.0)
            .hparam("final_temp", 120.0)
            .hparam("string_hparam", "a string_3")
            .hparam("bool_hparam", true)
            .hparam("optional_string_hparam", "BB")
            .sample("current_temp", MetricSample::new(1, 1.0, 101.0))
            .sample("delta_temp", MetricSample::new(1, 1.0, 201.0))
            .sample("delta_temp", MetricSample::new(2, 10.0, -151.0))
            .build(),
    ]
}

fn run(request: &ListSessionGroupsRequest) -> ListSessionGroupsResponse {
    QueryEngine::new()
        .list_session_groups(&fixture_schema(), &fixture_sessions(), request)
        .expect("valid request")
}

fn group_names(response: &ListSessionGroupsResponse) -> Vec<&str> {
    response.session_groups().iter().map(|g| g.name()).collect()
}

// =============================================================================
// Pass-through
// =============================================================================

#[test]
fn test_empty_request_returns_every_group() {
    let response = run(&ListSessionGroupsRequest::new());
    assert_eq!(group_names(&response), vec!["group_1", "group_2", "group_3"]);
    assert_eq!(response.total_size(), 3);
}

#[test]
fn test_group_hparams_are_fully_resolved() {
    let response = run(&ListSessionGroupsRequest::new());
    let group_1 = &response.session_groups()[0];

    assert_eq!(
        group_1.hparams().get("initial_temp"),
        Some(&HParamValue::from(270.0))
    );
    assert_eq!(
        group_1.hparams().get("string_hparam"),
        Some(&HParamValue::from("a string"))
    );
    assert_eq!(
        group_1.hparams().get("bool_hparam"),
        Some(&HParamValue::from(true))
    );
    // No member of group_1 reports the optional hparam.
    assert!(!group_1.hparams().contains_key("optional_string_hparam"));

    let group_3 = &response.session_groups()[2];
    assert_eq!(
        group_3.hparams().get("optional_string_hparam"),
        Some(&HParamValue::from("BB"))
    );
}

#[test]
fn test_group_metrics_use_last_sample() {
    let response = run(&ListSessionGroupsRequest::new());
    let group_1 = &response.session_groups()[0];

    // delta_temp's step-2 sample wins even though step 1 has a larger value.
    let delta = group_1.metric_values().get("delta_temp").unwrap();
    assert_eq!(delta.step(), 2);
    assert!((delta.value() - 15.0).abs() < f64::EPSILON);
    assert!((delta.wall_time_secs() - 10.0).abs() < f64::EPSILON);

    let optional = group_1.metric_values().get("optional_metric").unwrap();
    assert_eq!(optional.step(), 20);
    assert!((optional.value() - 33.0).abs() < f64::EPSILON);
}

#[test]
fn test_multi_member_group_merges_metrics() {
    let response = run(&ListSessionGroupsRequest::new());
    let group_2 = &response.session_groups()[1];

    let members: Vec<&str> = group_2.sessions().iter().map(|s| s.name()).collect();
    assert_eq!(members, vec!["session_2", "session_3"]);

    // Both members report delta_temp at step 2, wall time 10; the larger
    // value (session_2's 150) is the representative.
    let delta = group_2.metric_values().get("delta_temp").unwrap();
    assert!((delta.value() - 150.0).abs() < f64::EPSILON);

    // Per-session maps stay independent of the group aggregate.
    let session_3 = &group_2.sessions()[1];
    let own_delta = session_3.metric_values().get("delta_temp").unwrap();
    assert!((own_delta.value() - 1.5).abs() < f64::EPSILON);

    // optional_metric is reported by nobody in group_2.
    assert!(!group_2.metric_values().contains_key("optional_metric"));
}

#[test]
fn test_session_summaries_carry_lifecycle_fields() {
    let response = run(&ListSessionGroupsRequest::new());
    let session_1 = &response.session_groups()[0].sessions()[0];
    assert_eq!(session_1.name(), "session_1");
    assert_eq!(session_1.status(), SessionStatus::Success);
    assert_eq!(session_1.metric_values().len(), 3);
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_filter_pattern() {
    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("string_hparam").pattern("AA*")));
    assert_eq!(group_names(&response), vec!["group_2"]);
    assert_eq!(response.total_size(), 1);

    // A pattern matching nothing filters out every group.
    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("string_hparam").pattern("a string_100")));
    assert!(response.session_groups().is_empty());
    assert_eq!(response.total_size(), 0);
}

#[test]
fn test_filter_interval() {
    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("initial_temp").interval(270.0, 282.0)));
    assert_eq!(group_names(&response), vec!["group_1", "group_2"]);
    assert_eq!(response.total_size(), 2);
}

#[test]
fn test_filter_discrete_set_on_metric() {
    let response = run(&ListSessionGroupsRequest::new().col_param(
        ColumnSpec::metric("current_temp")
            .discrete_set([HParamValue::from(101.0), HParamValue::from(10.0)]),
    ));
    assert_eq!(group_names(&response), vec!["group_1", "group_3"]);
    assert_eq!(response.total_size(), 2);
}

#[test]
fn test_filter_multiple_columns_is_a_conjunction() {
    let response = run(&ListSessionGroupsRequest::new()
        .col_param(
            ColumnSpec::metric("current_temp")
                .discrete_set([HParamValue::from(101.0), HParamValue::from(10.0)]),
        )
        .col_param(ColumnSpec::hparam("initial_temp").interval(270.0, 282.0)));
    assert_eq!(group_names(&response), vec!["group_1"]);
    assert_eq!(response.total_size(), 1);
}

#[test]
fn test_filter_on_optional_hparam_drops_groups_missing_it() {
    // "B*" matches the empty string, but groups with no value at all still fail.
    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("optional_string_hparam").pattern("B*")));
    assert_eq!(group_names(&response), vec!["group_3"]);
    assert_eq!(response.total_size(), 1);
}

#[test]
fn test_filter_on_optional_metric_drops_groups_missing_it() {
    let response = run(&ListSessionGroupsRequest::new().col_param(
        ColumnSpec::metric("optional_metric").discrete_set([HParamValue::from(33.0)]),
    ));
    assert_eq!(group_names(&response), vec!["group_1"]);
    assert_eq!(response.total_size(), 1);
}

#[test]
fn test_filtering_never_truncates_a_surviving_group() {
    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("string_hparam").pattern("AA*")));
    let group_2 = &response.session_groups()[0];
    assert_eq!(group_2.sessions().len(), 2);
    assert_eq!(group_2.hparams().len(), 4);
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_sort_one_metric_column() {
    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::metric("delta_temp").sort(SortDirection::Ascending)));
    // Representatives: group_3 = -151, group_1 = 15, group_2 = 150.
    assert_eq!(group_names(&response), vec!["group_3", "group_1", "group_2"]);
}

#[test]
fn test_sort_one_string_column() {
    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("string_hparam").sort(SortDirection::Ascending)));
    // "AAAAA" < "a string" < "a string_3" in byte order.
    assert_eq!(group_names(&response), vec!["group_2", "group_1", "group_3"]);

    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("string_hparam").sort(SortDirection::Descending)));
    assert_eq!(group_names(&response), vec!["group_3", "group_1", "group_2"]);
}

#[test]
fn test_sort_multiple_columns() {
    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("bool_hparam").sort(SortDirection::Ascending))
        .col_param(ColumnSpec::metric("delta_temp").sort(SortDirection::Ascending)));
    // false < true, then delta_temp splits the two true groups.
    assert_eq!(group_names(&response), vec!["group_2", "group_3", "group_1"]);

    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("bool_hparam").sort(SortDirection::Descending))
        .col_param(ColumnSpec::metric("delta_temp").sort(SortDirection::Ascending)));
    assert_eq!(group_names(&response), vec!["group_3", "group_1", "group_2"]);
}

#[test]
fn test_sort_missing_values_go_last_in_both_directions() {
    // Only group_1 reports optional_metric.
    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        let response = run(&ListSessionGroupsRequest::new()
            .col_param(ColumnSpec::metric("optional_metric").sort(direction)));
        assert_eq!(group_names(&response), vec!["group_1", "group_2", "group_3"]);
    }

    // Only group_3 reports optional_string_hparam.
    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("optional_string_hparam").sort(SortDirection::Ascending)));
    assert_eq!(group_names(&response), vec!["group_3", "group_1", "group_2"]);
}

#[test]
fn test_sort_key_with_constraint_filters_and_sorts() {
    let response = run(&ListSessionGroupsRequest::new().col_param(
        ColumnSpec::hparam("initial_temp")
            .interval(270.0, 282.0)
            .sort(SortDirection::Descending),
    ));
    assert_eq!(group_names(&response), vec!["group_2", "group_1"]);
    assert_eq!(response.total_size(), 2);
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn test_pagination_window() {
    let response = run(&ListSessionGroupsRequest::new().slice_size(2));
    assert_eq!(group_names(&response), vec!["group_1", "group_2"]);
    assert_eq!(response.total_size(), 3);

    let response = run(&ListSessionGroupsRequest::new().start_index(1).slice_size(1));
    assert_eq!(group_names(&response), vec!["group_2"]);
    assert_eq!(response.total_size(), 3);
}

#[test]
fn test_pagination_offset_past_end_keeps_total_size() {
    let response = run(&ListSessionGroupsRequest::new().start_index(5));
    assert!(response.session_groups().is_empty());
    assert_eq!(response.total_size(), 3);
}

#[test]
fn test_total_size_reflects_filter_not_window() {
    let response = run(&ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("initial_temp").interval(270.0, 282.0))
        .slice_size(1));
    assert_eq!(group_names(&response), vec!["group_1"]);
    assert_eq!(response.total_size(), 2);
}

// =============================================================================
// Store snapshots
// =============================================================================

fn fixture_store() -> SessionStore {
    let mut store = SessionStore::with_schema(fixture_schema());
    for session in fixture_sessions() {
        store.add_session(session);
    }
    store
}

#[test]
fn test_store_snapshot_drives_the_engine() {
    let store = fixture_store();
    let response = QueryEngine::new()
        .list_session_groups(
            store.schema(),
            store.sessions(),
            &ListSessionGroupsRequest::new(),
        )
        .expect("valid request");

    assert_eq!(group_names(&response), vec!["group_1", "group_2", "group_3"]);
    assert_eq!(response.total_size(), 3);

    // The store serves step-ordered series, so the engine's last-sample
    // representative agrees with the tail of the stored series.
    let stored = store.get_samples("session_1", "delta_temp");
    let steps: Vec<i64> = stored.iter().map(MetricSample::step).collect();
    assert_eq!(steps, vec![1, 2]);

    let delta = response.session_groups()[0]
        .metric_values()
        .get("delta_temp")
        .unwrap();
    assert_eq!(delta.step(), stored.last().unwrap().step());
    assert!((delta.value() - 15.0).abs() < f64::EPSILON);
}

#[test]
fn test_reingestion_keeps_engine_output_stable() {
    let mut store = fixture_store();
    let baseline = QueryEngine::new()
        .list_session_groups(
            store.schema(),
            store.sessions(),
            &ListSessionGroupsRequest::new(),
        )
        .expect("valid request");

    // Replaying session_1 after every other session must not move group_1:
    // replacement keeps the session's discovery slot.
    let replayed = fixture_sessions().into_iter().next().unwrap();
    store.add_session(replayed);

    let after = QueryEngine::new()
        .list_session_groups(
            store.schema(),
            store.sessions(),
            &ListSessionGroupsRequest::new(),
        )
        .expect("valid request");

    assert_eq!(group_names(&after), vec!["group_1", "group_2", "group_3"]);
    assert_eq!(baseline, after);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_repeated_queries_are_identical() {
    let request = ListSessionGroupsRequest::new()
        .col_param(ColumnSpec::hparam("bool_hparam").sort(SortDirection::Ascending));
    let first = run(&request);
    let second = run(&request);
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}
