//! Window-policy tests over parsed record sequences, including the
//! interaction between filtering and the session store.

use buildlens::pipeline::filter::{self, WindowPolicy};
use buildlens::pipeline::parse_records;
use buildlens::record::BuildRecord;
use buildlens::session::SessionStore;
use chrono::{DateTime, Utc};

fn records_over_two_weeks() -> Vec<BuildRecord> {
    let text = r#"[
      {"timestamp":"2024-01-01T08:00:00Z","data":[
        {"阶段":"编译","阶段耗时":"1min","Heap已用峰值 (MB)":500}]},
      {"timestamp":"2024-01-04T08:00:00Z","data":[
        {"阶段":"编译","阶段耗时":"2min","Heap已用峰值 (MB)":600}]},
      {"timestamp":"2024-01-10T08:00:00Z","data":[
        {"阶段":"编译","阶段耗时":"3min","Heap已用峰值 (MB)":700}]},
      {"timestamp":"2024-01-14T08:00:00Z","data":[
        {"阶段":"编译","阶段耗时":"4min","Heap已用峰值 (MB)":800}]}
    ]"#;
    parse_records(text).unwrap()
}

fn now() -> DateTime<Utc> {
    "2024-01-15T00:00:00Z".parse().unwrap()
}

// ---------------------------------------------------------------------------
// Policy semantics
// ---------------------------------------------------------------------------

#[test]
fn all_returns_input_unchanged_and_never_empty() {
    let records = records_over_two_weeks();
    let out = filter::apply(&records, WindowPolicy::All, now());

    assert_eq!(out.records.len(), records.len());
    assert!(!out.is_empty);

    let out = filter::apply(&[], WindowPolicy::All, now());
    assert!(!out.is_empty);
}

#[test]
fn first_count_clamps_without_error() {
    let records = records_over_two_weeks();
    let out = filter::apply(&records, WindowPolicy::FirstCount(10), now());

    assert_eq!(out.records.len(), 4);
    assert!(!out.is_empty);
}

#[test]
fn first_days_window_is_anchored_to_first_record() {
    let records = records_over_two_weeks();
    let out = filter::apply(&records, WindowPolicy::FirstDays(7), now());

    let kept: Vec<&str> = out.records.iter().map(|r| r.timestamp.as_str()).collect();
    assert_eq!(
        kept,
        vec!["2024-01-01T08:00:00Z", "2024-01-04T08:00:00Z"]
    );
}

#[test]
fn last_days_window_is_anchored_to_now() {
    let records = records_over_two_weeks();
    let out = filter::apply(&records, WindowPolicy::LastDays(7), now());

    let kept: Vec<&str> = out.records.iter().map(|r| r.timestamp.as_str()).collect();
    assert_eq!(
        kept,
        vec!["2024-01-10T08:00:00Z", "2024-01-14T08:00:00Z"]
    );
}

#[test]
fn last_count_takes_the_tail() {
    let records = records_over_two_weeks();
    let out = filter::apply(&records, WindowPolicy::LastCount(1), now());

    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].timestamp, "2024-01-14T08:00:00Z");
}

#[test]
fn unknown_policy_name_is_identity() {
    let records = records_over_two_weeks();
    let policy = WindowPolicy::parse("made-up-policy");

    assert_eq!(policy, WindowPolicy::All);
    let out = filter::apply(&records, policy, now());
    assert_eq!(out.records.len(), 4);
    assert!(!out.is_empty);
}

#[test]
fn day_window_on_empty_input_is_empty_without_panicking() {
    let out = filter::apply(&[], WindowPolicy::FirstDays(7), now());
    assert!(out.records.is_empty());
    assert!(out.is_empty);
}

// ---------------------------------------------------------------------------
// Session re-derivation
// ---------------------------------------------------------------------------

#[test]
fn window_selection_rederives_without_resubmission() {
    let mut store = SessionStore::default();
    store
        .submit(
            r#"[
              {"timestamp":"2024-01-01T08:00:00Z","data":[
                {"阶段":"编译","阶段耗时":"1min","Heap已用峰值 (MB)":500}]},
              {"timestamp":"2024-01-14T08:00:00Z","data":[
                {"阶段":"编译","阶段耗时":"4min","Heap已用峰值 (MB)":800}]}
            ]"#,
        )
        .unwrap();

    let all = store.derive(WindowPolicy::All, now()).unwrap();
    assert_eq!(all.series.compile_time, vec![60, 240]);

    let recent = store.derive(WindowPolicy::LastDays(7), now()).unwrap();
    assert_eq!(recent.series.compile_time, vec![240]);
    assert!(!recent.window_empty);

    let none = store.derive(WindowPolicy::LastDays(7), "2024-06-01T00:00:00Z".parse().unwrap());
    assert!(none.unwrap().window_empty);
}
