//! Window filtering — select a sub-sequence of records by a named policy.
//!
//! Policies come from the dashboard's filter bar (`first7days`,
//! `last10times`, ...) or the CLI `--window` flag. Day windows are
//! anchored either to the first record's timestamp (`first<N>days`) or to
//! the evaluation instant (`last<N>days`); count windows truncate by
//! position. The evaluation instant is always passed in by the caller so
//! filtering stays pure and testable.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::record::{BuildRecord, parse_timestamp};

/// Shape of a window policy name: `first7days`, `last10times`, ...
static POLICY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(first|last)(\d+)(days|times)$").expect("policy regex must compile"));

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// A named rule selecting a subset of records by elapsed time or count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Keep everything.
    All,
    /// Records within `n` days of the first record's timestamp.
    FirstDays(u32),
    /// Records within `n` days before the evaluation instant.
    LastDays(u32),
    /// The first `n` records.
    FirstCount(usize),
    /// The last `n` records.
    LastCount(usize),
}

impl WindowPolicy {
    /// Parse a policy name. Unknown names fall back to [`WindowPolicy::All`]
    /// (identity — "no filter applied").
    pub fn parse(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        if let Some(caps) = POLICY_RE.captures(&name)
            && let Ok(n) = caps[2].parse::<u32>()
        {
            return match (&caps[1], &caps[3]) {
                ("first", "days") => Self::FirstDays(n),
                ("last", "days") => Self::LastDays(n),
                ("first", "times") => Self::FirstCount(n as usize),
                ("last", "times") => Self::LastCount(n as usize),
                _ => Self::All,
            };
        }
        Self::All
    }

    /// Whether this is the identity policy.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for WindowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::FirstDays(n) => write!(f, "first{n}days"),
            Self::LastDays(n) => write!(f, "last{n}days"),
            Self::FirstCount(n) => write!(f, "first{n}times"),
            Self::LastCount(n) => write!(f, "last{n}times"),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Result of applying a window policy.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub records: Vec<BuildRecord>,
    /// True iff the subset is empty AND a real filter was applied.
    /// `all` never reports empty, even for empty input — "no filter" is
    /// distinct from "filter excluded everything".
    pub is_empty: bool,
}

/// Apply a window policy to an ordered record sequence.
///
/// `now` is the evaluation instant for `last<N>days`. Records whose
/// timestamp fails to parse are excluded from day windows (there is no
/// instant to compare).
pub fn apply(records: &[BuildRecord], policy: WindowPolicy, now: DateTime<Utc>) -> FilterOutcome {
    let subset: Vec<BuildRecord> = match policy {
        WindowPolicy::All => records.to_vec(),
        WindowPolicy::FirstDays(n) => {
            let anchor = records.first().and_then(|r| parse_timestamp(&r.timestamp));
            match anchor {
                Some(anchor) => {
                    let window = Duration::days(i64::from(n));
                    records
                        .iter()
                        .filter(|r| {
                            parse_timestamp(&r.timestamp)
                                .is_some_and(|t| t.signed_duration_since(anchor) <= window)
                        })
                        .cloned()
                        .collect()
                }
                None => Vec::new(),
            }
        }
        WindowPolicy::LastDays(n) => {
            let window = Duration::days(i64::from(n));
            records
                .iter()
                .filter(|r| {
                    parse_timestamp(&r.timestamp)
                        .is_some_and(|t| now.signed_duration_since(t) <= window)
                })
                .cloned()
                .collect()
        }
        WindowPolicy::FirstCount(n) => records.iter().take(n).cloned().collect(),
        WindowPolicy::LastCount(n) => {
            let skip = records.len().saturating_sub(n);
            records.iter().skip(skip).cloned().collect()
        }
    };

    let is_empty = subset.is_empty() && !policy.is_all();
    FilterOutcome {
        records: subset,
        is_empty,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
