//! The data-normalization pipeline.
//!
//! Raw submitted text flows through the stages in order:
//!
//! 1. **Repair** — splice naively concatenated JSON array dumps.
//! 2. **Parse** — deserialize into [`crate::record::BuildRecord`]s.
//! 3. **Filter** — apply a window policy (optional, identity by default).
//! 4. **Normalize** — derive parallel chart series.
//! 5. **Extrema** — per-series max/min indices and averages.
//!
//! The whole pipeline is a single synchronous transformation: pure given
//! its input, no shared state, no partial results. A submission either
//! produces a full record list or fails with an [`IngestError`].

pub mod duration;
pub mod extrema;
pub mod filter;
pub mod normalize;
pub mod repair;

use thiserror::Error;

use crate::record::BuildRecord;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Terminal failures of a submission. Both leave any previously retained
/// snapshot untouched.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input was empty or whitespace-only after trimming.
    #[error("input is empty")]
    EmptyInput,
    /// The repaired text still isn't valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Repair and parse submitted text into an ordered record list.
///
/// Concatenated array dumps are spliced into one array before parsing, so
/// multiple appended log documents come back as a single combined sequence
/// with original order preserved.
pub fn parse_records(text: &str) -> Result<Vec<BuildRecord>, IngestError> {
    let repaired = repair::repair(text);
    if repaired.is_empty() {
        return Err(IngestError::EmptyInput);
    }
    Ok(serde_json::from_str(&repaired)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
