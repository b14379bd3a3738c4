//! Build record data model — the wire format of build-performance logs.
//!
//! Records arrive as JSON arrays dumped by the build tooling. Stage
//! measurements use the log's literal Chinese field names (`阶段`,
//! `阶段耗时`, `Heap已用峰值 (MB)`); those wire names are confined to the
//! serde attributes here and classified into [`StageKind`] at ingestion so
//! the rest of the crate never touches raw key strings.
//!
//! The three configuration maps (`buildConfigurations`, `ngCacheInfo`,
//! `deviceInfo`) are opaque to the pipeline — they are carried through
//! untouched for the configuration inspector.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One build run: a timestamp, optional total duration, per-stage
/// measurements, and opaque configuration metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
    pub timestamp: String,
    /// Total build duration as a duration string (e.g. `"2min 30s"`).
    #[serde(rename = "totalTime", default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    /// Per-stage measurements, in build order.
    #[serde(default)]
    pub data: Vec<StageMeasurement>,
    /// Build configuration at the time of the run. Opaque key-value map.
    #[serde(
        rename = "buildConfigurations",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub build_configurations: Option<Map<String, Value>>,
    /// Angular cache state. Opaque key-value map.
    #[serde(rename = "ngCacheInfo", default, skip_serializing_if = "Option::is_none")]
    pub ng_cache_info: Option<Map<String, Value>>,
    /// Host machine details. Opaque key-value map.
    #[serde(rename = "deviceInfo", default, skip_serializing_if = "Option::is_none")]
    pub device_info: Option<Map<String, Value>>,
}

impl BuildRecord {
    /// Whether the record carries a non-empty `totalTime` field.
    pub fn has_total_time(&self) -> bool {
        self.total_time.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// A single stage measurement inside a build record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageMeasurement {
    /// Stage label as written by the build tooling.
    #[serde(rename = "阶段", default)]
    pub stage_name: String,
    /// Stage duration as a unit-suffixed string (e.g. `"1min 30s"`).
    #[serde(rename = "阶段耗时", default)]
    pub duration_text: String,
    /// Peak resident heap observed during the stage, in megabytes.
    #[serde(rename = "Heap已用峰值 (MB)", default)]
    pub peak_heap_mb: f64,
}

impl StageMeasurement {
    /// Classify this measurement's stage label.
    pub fn kind(&self) -> StageKind {
        StageKind::classify(&self.stage_name)
    }
}

// ---------------------------------------------------------------------------
// Stage classification
// ---------------------------------------------------------------------------

/// Recognized build stages.
///
/// Only the compile and optimize&bundle stages contribute to the chart
/// series; everything else is carried in the record but skipped by the
/// normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Compile,
    OptimizeBundle,
    Other,
}

impl StageKind {
    /// Map a wire-format stage label to its kind.
    pub fn classify(name: &str) -> Self {
        match name {
            "编译" => Self::Compile,
            "优化&打包" => Self::OptimizeBundle,
            _ => Self::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

/// Parse a record timestamp, keeping its embedded offset.
///
/// Accepts RFC 3339 (the format the build tooling writes) plus two common
/// offset-less fallbacks, which are taken at face value as UTC. Returns
/// `None` for anything else — callers decide whether that excludes the
/// record (window filtering) or degrades to the raw string (labeling).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw.trim(), fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn deserializes_record_with_chinese_stage_keys() {
        let json = r#"{
            "timestamp": "2024-01-01T10:00:00Z",
            "totalTime": "2min 05s",
            "data": [
                {"阶段": "编译", "阶段耗时": "1min 30s", "Heap已用峰值 (MB)": 512},
                {"阶段": "优化&打包", "阶段耗时": "35s", "Heap已用峰值 (MB)": 1024.5}
            ]
        }"#;
        let record: BuildRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.timestamp, "2024-01-01T10:00:00Z");
        assert!(record.has_total_time());
        assert_eq!(record.data.len(), 2);
        assert_eq!(record.data[0].kind(), StageKind::Compile);
        assert_eq!(record.data[0].duration_text, "1min 30s");
        assert_eq!(record.data[1].kind(), StageKind::OptimizeBundle);
        assert_eq!(record.data[1].peak_heap_mb, 1024.5);
    }

    #[test]
    fn config_maps_survive_roundtrip_untouched() {
        let json = r#"{
            "timestamp": "2024-01-01T10:00:00Z",
            "data": [],
            "buildConfigurations": {"aot": true, "optimization": "full"},
            "ngCacheInfo": {"effectiveStatus": "enabled"},
            "deviceInfo": {"cpu": "M2", "cores": 8}
        }"#;
        let record: BuildRecord = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&record).unwrap();

        assert_eq!(out["buildConfigurations"]["aot"], Value::Bool(true));
        assert_eq!(out["buildConfigurations"]["optimization"], "full");
        assert_eq!(out["ngCacheInfo"]["effectiveStatus"], "enabled");
        assert_eq!(out["deviceInfo"]["cores"], 8);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"timestamp": "2024-01-01T10:00:00Z"}"#;
        let record: BuildRecord = serde_json::from_str(json).unwrap();

        assert!(!record.has_total_time());
        assert!(record.data.is_empty());
        assert!(record.build_configurations.is_none());
    }

    #[test]
    fn empty_total_time_is_not_present() {
        let json = r#"{"timestamp": "t", "totalTime": "", "data": []}"#;
        let record: BuildRecord = serde_json::from_str(json).unwrap();
        assert!(!record.has_total_time());
    }

    #[test]
    fn classify_recognizes_known_stages() {
        assert_eq!(StageKind::classify("编译"), StageKind::Compile);
        assert_eq!(StageKind::classify("优化&打包"), StageKind::OptimizeBundle);
        assert_eq!(StageKind::classify("资源拷贝"), StageKind::Other);
        assert_eq!(StageKind::classify(""), StageKind::Other);
    }

    #[test]
    fn parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2024-01-01T10:00:00Z").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn parse_timestamp_keeps_embedded_offset() {
        let dt = parse_timestamp("2024-01-01T10:00:00+08:00").unwrap();
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn parse_timestamp_offsetless_fallback() {
        let dt = parse_timestamp("2024-01-01 10:30:00").unwrap();
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday-ish").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
