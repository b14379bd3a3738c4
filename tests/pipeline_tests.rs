//! End-to-end pipeline tests: raw text → repair → parse → normalize →
//! extrema. Exercises the full submission path the dashboard and the
//! `analyze` subcommand share.

use buildlens::pipeline::duration::{format_seconds, parse_duration};
use buildlens::pipeline::extrema::extrema_indices;
use buildlens::pipeline::normalize::normalize;
use buildlens::pipeline::repair::repair;
use buildlens::pipeline::{IngestError, parse_records};
use buildlens::record::BuildRecord;

// ---------------------------------------------------------------------------
// Duration contract
// ---------------------------------------------------------------------------

#[test]
fn duration_parse_family() {
    assert_eq!(parse_duration("2min 30s"), 150);
    assert_eq!(parse_duration("2min"), 120);
    assert_eq!(parse_duration("45s"), 45);
    assert_eq!(parse_duration("garbage"), 0);
}

#[test]
fn duration_format_family() {
    assert_eq!(format_seconds(125.0), "2min 05s");
    assert_eq!(format_seconds(120.0), "2min");
    assert_eq!(format_seconds(45.0), "45s");
}

// ---------------------------------------------------------------------------
// Repair contract
// ---------------------------------------------------------------------------

#[test]
fn repair_is_identity_on_well_formed_input() {
    let well_formed = r#"[{"timestamp":"2024-01-01T10:00:00Z","data":[]}]"#;
    assert_eq!(repair(well_formed), well_formed);
    assert_eq!(repair(&format!("  {well_formed}\n")), well_formed);
}

#[test]
fn concatenated_dumps_parse_as_one_sequence() {
    let text = concat!(
        r#"[{"timestamp":"2024-01-01T10:00:00Z","data":[]},"#,
        r#"{"timestamp":"2024-01-02T10:00:00Z","data":[]}]"#,
        "\n\n",
        r#"[{"timestamp":"2024-01-03T10:00:00Z","data":[]}]"#,
    );
    let records = parse_records(text).unwrap();

    assert_eq!(records.len(), 3);
    let timestamps: Vec<&str> = records.iter().map(|r| r.timestamp.as_str()).collect();
    assert_eq!(
        timestamps,
        vec![
            "2024-01-01T10:00:00Z",
            "2024-01-02T10:00:00Z",
            "2024-01-03T10:00:00Z",
        ]
    );
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

#[test]
fn empty_submission_halts_with_empty_input() {
    assert!(matches!(parse_records(""), Err(IngestError::EmptyInput)));
    assert!(matches!(
        parse_records(" \n\t "),
        Err(IngestError::EmptyInput)
    ));
}

#[test]
fn unrepairable_text_halts_with_parse_error() {
    assert!(matches!(
        parse_records("this is not json"),
        Err(IngestError::Parse(_))
    ));
    // A repair that still leaves broken JSON fails the same way.
    assert!(matches!(
        parse_records("[1,2]\n[3,"),
        Err(IngestError::Parse(_))
    ));
}

// ---------------------------------------------------------------------------
// Normalization end-to-end
// ---------------------------------------------------------------------------

#[test]
fn chinese_wire_keys_normalize_to_series() {
    let text = r#"[{"timestamp":"2024-01-01T10:00:00Z","data":[{"阶段":"编译","阶段耗时":"1min 30s","Heap已用峰值 (MB)":512}]}]"#;
    let records = parse_records(text).unwrap();
    let series = normalize(&records);

    assert_eq!(series.time, vec!["1-1 10:00"]);
    assert_eq!(series.compile_time, vec![90]);
    assert_eq!(series.compile_heap, vec![512.0]);
    assert!(series.optimize_time.is_empty());
    assert!(series.optimize_heap.is_empty());
}

#[test]
fn three_full_records_produce_equal_length_series() {
    let text = r#"[
      {"timestamp":"2024-01-01T08:00:00Z","totalTime":"2min","data":[
        {"阶段":"编译","阶段耗时":"1min 20s","Heap已用峰值 (MB)":900},
        {"阶段":"优化&打包","阶段耗时":"40s","Heap已用峰值 (MB)":1200}]},
      {"timestamp":"2024-01-02T08:00:00Z","totalTime":"1min 50s","data":[
        {"阶段":"编译","阶段耗时":"1min 10s","Heap已用峰值 (MB)":850},
        {"阶段":"优化&打包","阶段耗时":"40s","Heap已用峰值 (MB)":1180}]},
      {"timestamp":"2024-01-03T08:00:00Z","totalTime":"2min 10s","data":[
        {"阶段":"编译","阶段耗时":"1min 25s","Heap已用峰值 (MB)":910},
        {"阶段":"优化&打包","阶段耗时":"45s","Heap已用峰值 (MB)":1250}]}
    ]"#;
    let records = parse_records(text).unwrap();
    let series = normalize(&records);

    assert_eq!(series.time.len(), 3);
    assert_eq!(series.compile_time.len(), 3);
    assert_eq!(series.compile_heap.len(), 3);
    assert_eq!(series.optimize_time.len(), 3);
    assert_eq!(series.optimize_heap.len(), 3);
    assert_eq!(series.total_time.len(), 3);
    assert!(series.is_aligned());
}

#[test]
fn unparseable_duration_contributes_zero_and_continues() {
    let text = r#"[
      {"timestamp":"2024-01-01T08:00:00Z","data":[
        {"阶段":"编译","阶段耗时":"???","Heap已用峰值 (MB)":500}]},
      {"timestamp":"2024-01-02T08:00:00Z","data":[
        {"阶段":"编译","阶段耗时":"30s","Heap已用峰值 (MB)":520}]}
    ]"#;
    let records = parse_records(text).unwrap();
    let series = normalize(&records);

    assert_eq!(series.compile_time, vec![0, 30]);
    assert_eq!(series.time.len(), 2);
}

#[test]
fn opaque_config_maps_are_passed_through() {
    let text = r#"[{"timestamp":"2024-01-01T10:00:00Z","data":[],
        "buildConfigurations":{"aot":true},
        "ngCacheInfo":{"effectiveStatus":"enabled"},
        "deviceInfo":{"cores":8}}]"#;
    let records: Vec<BuildRecord> = parse_records(text).unwrap();

    let record = &records[0];
    assert!(record.build_configurations.is_some());
    assert!(record.ng_cache_info.is_some());
    assert!(record.device_info.is_some());

    let out = serde_json::to_value(record).unwrap();
    assert_eq!(out["buildConfigurations"]["aot"], true);
    assert_eq!(out["ngCacheInfo"]["effectiveStatus"], "enabled");
    assert_eq!(out["deviceInfo"]["cores"], 8);
}

// ---------------------------------------------------------------------------
// Extrema contract
// ---------------------------------------------------------------------------

#[test]
fn extrema_first_occurrence_tie_break() {
    let series = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    assert_eq!(extrema_indices(&series), Some((5, 1)));
}

#[test]
fn extrema_feed_from_normalized_series() {
    let text = r#"[
      {"timestamp":"2024-01-01T08:00:00Z","data":[
        {"阶段":"编译","阶段耗时":"30s","Heap已用峰值 (MB)":500}]},
      {"timestamp":"2024-01-02T08:00:00Z","data":[
        {"阶段":"编译","阶段耗时":"2min","Heap已用峰值 (MB)":900}]},
      {"timestamp":"2024-01-03T08:00:00Z","data":[
        {"阶段":"编译","阶段耗时":"1min","Heap已用峰值 (MB)":300}]}
    ]"#;
    let records = parse_records(text).unwrap();
    let series = normalize(&records);

    assert_eq!(extrema_indices(&series.compile_time), Some((1, 0)));
    assert_eq!(extrema_indices(&series.compile_heap), Some((1, 2)));
}
