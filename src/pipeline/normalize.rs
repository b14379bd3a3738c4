//! Normalization — turn raw build records into parallel chart series.
//!
//! Each call rebuilds the full [`NormalizedSeries`] from scratch; nothing
//! is mutated incrementally. Time labels are formatted from the
//! timestamp's own embedded representation — no timezone shifting is
//! applied (an earlier revision of this tool added a fixed 8-hour offset
//! before formatting; that behavior is intentionally gone).

use chrono::{Datelike, Timelike};

use crate::pipeline::duration::parse_duration;
use crate::record::{BuildRecord, StageKind, parse_timestamp};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Parallel time-series vectors derived from a record sequence.
///
/// `time`, `compile_time`, and `compile_heap` are index-aligned: one entry
/// per record containing a compile stage. `optimize_*` track records
/// containing an optimize&bundle stage, and `total_time` tracks records
/// carrying a `totalTime` field — their lengths can differ from `time` when
/// a record lacks one of those pieces (see [`NormalizedSeries::is_aligned`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSeries {
    /// "M-D HH:mm" labels, one per record with a compile stage.
    pub time: Vec<String>,
    /// Compile stage durations, whole seconds.
    pub compile_time: Vec<u64>,
    /// Optimize&bundle stage durations, whole seconds.
    pub optimize_time: Vec<u64>,
    /// Total build durations, whole seconds.
    pub total_time: Vec<u64>,
    /// Compile stage peak heap, MB.
    pub compile_heap: Vec<f64>,
    /// Optimize&bundle stage peak heap, MB.
    pub optimize_heap: Vec<f64>,
}

impl NormalizedSeries {
    /// Whether every series lines up with the x-axis labels.
    ///
    /// When false, index-aligned consumers (charts pairing `time[i]` with
    /// `optimize_time[i]`) would silently misattribute points — the
    /// dashboard surfaces this instead of guessing at padding.
    pub fn is_aligned(&self) -> bool {
        self.optimize_time.len() == self.time.len() && self.total_time.len() == self.time.len()
    }

    /// Number of records that contributed a compile stage.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Derive the chart series from records, in original sequence order.
///
/// Per record: the `totalTime` field (when present and non-empty) feeds the
/// total series; each compile-tagged stage appends the record's time label
/// plus its duration and heap; each optimize-tagged stage appends duration
/// and heap. Other stage tags are skipped. Repeated same-kind stages in one
/// record all append — no deduplication.
pub fn normalize(records: &[BuildRecord]) -> NormalizedSeries {
    let mut out = NormalizedSeries::default();

    for record in records {
        let label = time_label(&record.timestamp);

        if record.has_total_time()
            && let Some(total) = record.total_time.as_deref()
        {
            out.total_time.push(parse_duration(total));
        }

        for stage in &record.data {
            match stage.kind() {
                StageKind::Compile => {
                    out.time.push(label.clone());
                    out.compile_time.push(parse_duration(&stage.duration_text));
                    out.compile_heap.push(stage.peak_heap_mb);
                }
                StageKind::OptimizeBundle => {
                    out.optimize_time.push(parse_duration(&stage.duration_text));
                    out.optimize_heap.push(stage.peak_heap_mb);
                }
                StageKind::Other => {}
            }
        }
    }

    if !out.is_aligned() {
        eprintln!(
            "[buildlens] series length mismatch: {} labels, {} optimize points, {} totals — some records lack a stage",
            out.time.len(),
            out.optimize_time.len(),
            out.total_time.len(),
        );
    }

    out
}

/// Format a record timestamp as an "M-D HH:mm" axis label.
///
/// Month and day are unpadded, hour and minute zero-padded to two digits.
/// A timestamp that fails to parse degrades to its raw trimmed text so the
/// point stays identifiable on the axis.
pub fn time_label(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => format!(
            "{}-{} {:02}:{:02}",
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute()
        ),
        None => {
            eprintln!("[buildlens] unparseable timestamp: {raw:?}");
            raw.trim().to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
