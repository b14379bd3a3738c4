//! Repair of concatenated JSON array dumps.
//!
//! Build logs are appended naively: each run serializes its own JSON array
//! and writes it after the previous one, producing `[...]\n[...]` — which
//! is not valid JSON. The repair pass splices adjacent arrays back into
//! one by replacing each `]` + whitespace + `[` boundary with a comma.
//!
//! Only whitespace may sit between the brackets; a span with any other
//! content (including nested brackets or a separating comma) is left
//! alone, so well-formed input passes through unchanged apart from outer
//! trimming.

use std::sync::LazyLock;

use regex::Regex;

/// An array-close followed only by whitespace and an array-open.
static SPLICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\s*\[").expect("splice regex must compile"));

/// Trim the input and splice concatenated top-level arrays into one.
///
/// Idempotent on already-valid JSON: `repair(s) == s.trim()` for any
/// well-formed single-array document.
pub fn repair(text: &str) -> String {
    SPLICE_RE.replace_all(text.trim(), ",").into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
