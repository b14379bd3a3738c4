//! Configuration inspector — the data layer behind the per-point config
//! panel.
//!
//! Hovering a chart point shows the build configuration, cache state, and
//! device info recorded for that build, with keys that changed since the
//! previous build highlighted. This module resolves a chart label back to
//! its record and computes the changed-key sets; the markup itself lives
//! in the frontend.

use serde_json::{Map, Value};

use crate::pipeline::normalize::time_label;
use crate::record::BuildRecord;

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Find the record whose formatted time label matches a chart label.
///
/// Returns the record's position too, so callers can reach the previous
/// record for diffing. First match wins when two builds share a minute.
pub fn record_at_label<'a>(
    records: &'a [BuildRecord],
    label: &str,
) -> Option<(usize, &'a BuildRecord)> {
    records
        .iter()
        .enumerate()
        .find(|(_, r)| time_label(&r.timestamp) == label)
}

// ---------------------------------------------------------------------------
// Diffing
// ---------------------------------------------------------------------------

/// Keys of `current` whose value is absent from or different in `previous`.
///
/// Compares JSON values structurally. With no previous snapshot, nothing
/// is reported as changed — the first build has no baseline.
pub fn changed_keys(
    previous: Option<&Map<String, Value>>,
    current: &Map<String, Value>,
) -> Vec<String> {
    let Some(previous) = previous else {
        return Vec::new();
    };
    current
        .iter()
        .filter(|(key, value)| previous.get(*key) != Some(value))
        .map(|(key, _)| key.clone())
        .collect()
}

/// Classify a config value as boolean-like for the frontend's styling.
///
/// Real booleans map directly; strings like `"enabled"`/`"disabled"`,
/// `"active"`/`"inactive"`, `"on"`/`"off"` map case-insensitively. Other
/// values are not boolean-like.
pub fn bool_like(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "enabled" | "active" | "on" => Some(true),
            "disabled" | "inactive" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
