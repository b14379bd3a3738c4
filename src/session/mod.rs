//! Session-scoped snapshot of the last successful parse.
//!
//! The hosting surface (dashboard server or CLI) owns one
//! [`SessionStore`] and passes it by reference into request handling; the
//! pipeline functions themselves stay pure. A window-policy change
//! re-derives the series from the retained snapshot without re-reading
//! the original file or textarea. A failed submission leaves the previous
//! snapshot in place.

use chrono::{DateTime, Utc};

use crate::pipeline::filter::{self, WindowPolicy};
use crate::pipeline::normalize::{self, NormalizedSeries};
use crate::pipeline::{self, IngestError};
use crate::record::BuildRecord;

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Holds the most recently parsed record list, replaced wholesale on each
/// successful submission.
#[derive(Debug, Default)]
pub struct SessionStore {
    records: Option<Vec<BuildRecord>>,
}

/// A series derivation for one window selection.
#[derive(Debug, Clone)]
pub struct DerivedView {
    pub window: WindowPolicy,
    pub series: NormalizedSeries,
    /// True when a non-identity window excluded every record.
    pub window_empty: bool,
    /// Records remaining after the window was applied.
    pub record_count: usize,
}

impl SessionStore {
    /// Ingest submitted text, replacing the retained snapshot on success.
    ///
    /// On failure the store is untouched and the previous snapshot (if
    /// any) remains available.
    pub fn submit(&mut self, text: &str) -> Result<usize, IngestError> {
        let records = pipeline::parse_records(text)?;
        let count = records.len();
        self.records = Some(records);
        Ok(count)
    }

    /// The retained snapshot, if a submission has succeeded.
    pub fn records(&self) -> Option<&[BuildRecord]> {
        self.records.as_deref()
    }

    /// Whether any snapshot is retained.
    pub fn has_data(&self) -> bool {
        self.records.is_some()
    }

    /// Re-derive the chart series for a window selection from the
    /// retained snapshot. `None` when nothing has been ingested yet.
    pub fn derive(&self, window: WindowPolicy, now: DateTime<Utc>) -> Option<DerivedView> {
        let records = self.records()?;
        let outcome = filter::apply(records, window, now);
        Some(DerivedView {
            window,
            series: normalize::normalize(&outcome.records),
            window_empty: outcome.is_empty,
            record_count: outcome.records.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECORDS: &str = r#"[
      {"timestamp":"2024-01-01T10:00:00Z","data":[
        {"阶段":"编译","阶段耗时":"1min","Heap已用峰值 (MB)":500}]},
      {"timestamp":"2024-01-09T10:00:00Z","data":[
        {"阶段":"编译","阶段耗时":"2min","Heap已用峰值 (MB)":600}]}
    ]"#;

    fn now() -> DateTime<Utc> {
        "2024-01-10T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn derive_before_submit_is_none() {
        let store = SessionStore::default();
        assert!(store.derive(WindowPolicy::All, now()).is_none());
    }

    #[test]
    fn submit_then_derive() {
        let mut store = SessionStore::default();
        assert_eq!(store.submit(TWO_RECORDS).unwrap(), 2);

        let view = store.derive(WindowPolicy::All, now()).unwrap();
        assert_eq!(view.series.compile_time, vec![60, 120]);
        assert!(!view.window_empty);
        assert_eq!(view.record_count, 2);
    }

    #[test]
    fn window_change_rederives_from_snapshot() {
        let mut store = SessionStore::default();
        store.submit(TWO_RECORDS).unwrap();

        let view = store.derive(WindowPolicy::FirstDays(7), now()).unwrap();
        assert_eq!(view.series.compile_time, vec![60]);

        let view = store.derive(WindowPolicy::LastDays(2), now()).unwrap();
        assert_eq!(view.series.compile_time, vec![120]);
    }

    #[test]
    fn failed_submission_keeps_previous_snapshot() {
        let mut store = SessionStore::default();
        store.submit(TWO_RECORDS).unwrap();

        assert!(store.submit("{broken").is_err());
        assert!(store.submit("").is_err());

        let view = store.derive(WindowPolicy::All, now()).unwrap();
        assert_eq!(view.record_count, 2);
    }

    #[test]
    fn resubmission_replaces_snapshot() {
        let mut store = SessionStore::default();
        store.submit(TWO_RECORDS).unwrap();
        store
            .submit(r#"[{"timestamp":"2024-02-01T00:00:00Z","data":[]}]"#)
            .unwrap();

        assert_eq!(store.records().unwrap().len(), 1);
    }
}
