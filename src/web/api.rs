//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an endpoint and returns a
//! `Response<Cursor<Vec<u8>>>` with JSON content. Core structs are
//! mirrored into `Serialize` response types so the wire shape is explicit
//! and stable.

use std::io::Cursor;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use tiny_http::{Response, StatusCode};

use crate::config::{self, BuildlensConfig};
use crate::inspect;
use crate::pipeline::duration::format_seconds;
use crate::pipeline::extrema::{extrema_indices, format_heap_gb, mean};
use crate::pipeline::filter::WindowPolicy;
use crate::record::BuildRecord;
use crate::session::SessionStore;

use super::{content_type_json, query_param};

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

/// Ingest API response.
#[derive(Serialize)]
struct IngestResponse {
    records: usize,
}

/// Series API response — everything the charts need for one window.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesResponse {
    window: String,
    window_empty: bool,
    /// False when some records lack an optimize stage or total time, so
    /// those series cannot be paired index-wise with the x-axis labels.
    aligned: bool,
    record_count: usize,
    time: Vec<String>,
    series: Vec<SeriesPayload>,
    heap_limit_mb: f64,
    show_average: bool,
}

/// One chart series with its annotation data.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesPayload {
    name: &'static str,
    unit: &'static str,
    data: Vec<f64>,
    /// First-occurrence extrema indices; the frontend suppresses the
    /// inline label at these points. Absent for an empty series.
    #[serde(skip_serializing_if = "Option::is_none")]
    max_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    average: Option<f64>,
    /// Display strings for the max/min/average markers.
    #[serde(skip_serializing_if = "Option::is_none")]
    max_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_label: Option<String>,
}

/// Record-inspector API response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordResponse {
    label: String,
    timestamp: String,
    groups: Vec<ConfigGroupResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigGroupResponse {
    title: &'static str,
    items: Vec<ConfigItemResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigItemResponse {
    key: String,
    value: Value,
    changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bool_like: Option<bool>,
}

/// Health API response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    has_data: bool,
    record_count: usize,
    default_window: String,
    config_exists: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

fn error_response(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status))
}

/// Build one series payload. Duration series format their markers via
/// `format_seconds`, heap series as gigabytes.
fn series_payload(name: &'static str, unit: &'static str, data: Vec<f64>) -> SeriesPayload {
    let extrema = extrema_indices(&data);
    let average = mean(&data);

    let display = |v: f64| -> String {
        if unit == "s" {
            format_seconds(v)
        } else {
            format_heap_gb(v)
        }
    };

    SeriesPayload {
        max_index: extrema.map(|(max, _)| max),
        min_index: extrema.map(|(_, min)| min),
        max_label: extrema.map(|(max, _)| display(data[max])),
        min_label: extrema.map(|(_, min)| display(data[min])),
        average_label: average.map(display),
        average,
        name,
        unit,
        data,
    }
}

// ---------------------------------------------------------------------------
// API handlers
// ---------------------------------------------------------------------------

/// `POST /api/ingest` — submit raw log text (file content or paste).
///
/// On success the session snapshot is replaced; on failure it is left
/// untouched and the error is reported with a 400.
pub fn post_ingest(store: &mut SessionStore, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    match store.submit(body) {
        Ok(records) => json_response(&IngestResponse { records }),
        Err(e) => Ok(error_response(400, &e.to_string())),
    }
}

/// `GET /api/series?window=<policy>` — derive chart series for a window.
pub fn get_series(
    store: &SessionStore,
    config: &BuildlensConfig,
    url: &str,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let window = query_param(url, "window")
        .unwrap_or_else(|| config.general.default_window.clone());
    let policy = WindowPolicy::parse(&window);

    let Some(view) = store.derive(policy, Utc::now()) else {
        return Ok(error_response(404, "no data ingested yet"));
    };

    let series = &view.series;
    let resp = SeriesResponse {
        window: policy.to_string(),
        window_empty: view.window_empty,
        aligned: series.is_aligned(),
        record_count: view.record_count,
        time: series.time.clone(),
        series: vec![
            series_payload(
                "compileTime",
                "s",
                series.compile_time.iter().map(|&v| v as f64).collect(),
            ),
            series_payload(
                "optimizeTime",
                "s",
                series.optimize_time.iter().map(|&v| v as f64).collect(),
            ),
            series_payload(
                "totalTime",
                "s",
                series.total_time.iter().map(|&v| v as f64).collect(),
            ),
            series_payload("compileHeap", "MB", series.compile_heap.clone()),
            series_payload("optimizeHeap", "MB", series.optimize_heap.clone()),
        ],
        heap_limit_mb: config.chart.heap_limit_mb,
        show_average: config.chart.show_average,
    };

    json_response(&resp)
}

/// `GET /api/record?label=<time label>` — configuration inspector data
/// for the build behind one chart point, diffed against the previous
/// record in the sequence.
pub fn get_record(store: &SessionStore, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let Some(label) = query_param(url, "label") else {
        return Ok(error_response(400, "missing 'label' parameter"));
    };
    let Some(records) = store.records() else {
        return Ok(error_response(404, "no data ingested yet"));
    };
    let Some((index, record)) = inspect::record_at_label(records, &label) else {
        return Ok(error_response(404, "no record at that label"));
    };

    let previous = index.checked_sub(1).map(|i| &records[i]);
    let resp = RecordResponse {
        label,
        timestamp: record.timestamp.clone(),
        groups: config_groups(record, previous),
    };

    json_response(&resp)
}

/// `GET /api/health` — session and configuration summary.
pub fn get_health(
    store: &SessionStore,
    cfg: &BuildlensConfig,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let resp = HealthResponse {
        has_data: store.has_data(),
        record_count: store.records().map(|r| r.len()).unwrap_or(0),
        default_window: cfg.general.default_window.clone(),
        config_exists: config::global_config_file()
            .map(|p| p.exists())
            .unwrap_or(false),
    };
    json_response(&resp)
}

// ---------------------------------------------------------------------------
// Config group assembly
// ---------------------------------------------------------------------------

fn config_groups(record: &BuildRecord, previous: Option<&BuildRecord>) -> Vec<ConfigGroupResponse> {
    let sections: [(&'static str, Option<&Map<String, Value>>, Option<&Map<String, Value>>); 3] = [
        (
            "Build configuration",
            record.build_configurations.as_ref(),
            previous.and_then(|p| p.build_configurations.as_ref()),
        ),
        (
            "Angular cache",
            record.ng_cache_info.as_ref(),
            previous.and_then(|p| p.ng_cache_info.as_ref()),
        ),
        (
            "Device",
            record.device_info.as_ref(),
            previous.and_then(|p| p.device_info.as_ref()),
        ),
    ];

    sections
        .into_iter()
        .filter_map(|(title, current, prev)| {
            let current = current?;
            if current.is_empty() {
                return None;
            }
            let changed = inspect::changed_keys(prev, current);
            let items = current
                .iter()
                .map(|(key, value)| ConfigItemResponse {
                    key: key.clone(),
                    value: value.clone(),
                    changed: changed.iter().any(|c| c == key),
                    bool_like: inspect::bool_like(value),
                })
                .collect();
            Some(ConfigGroupResponse { title, items })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
