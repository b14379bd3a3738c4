//! Duration parsing and display formatting.
//!
//! The build tooling writes stage durations as free-form strings in one of
//! three shapes: `"2min 30s"`, `"2min"`, or `"45s"`. Parsing is lenient —
//! an unrecognized string logs a diagnostic and contributes 0 seconds
//! rather than aborting the record.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `<minutes>min[ <seconds>s]`, case-insensitive on the unit
/// suffix. The seconds group is optional ("2min" is two minutes flat).
static MIN_SEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)min\s*(\d+)?s?").expect("duration regex must compile")
});

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Convert a duration string to whole seconds.
///
/// Recognizes, in priority order:
/// 1. `"<m>min <s>s"` / `"<m>min"` — minutes with optional seconds.
/// 2. `"<s>s"` — pure seconds, when the string contains an `s` but no
///    `min` token.
///
/// Anything else logs a non-fatal diagnostic and yields 0.
pub fn parse_duration(text: &str) -> u64 {
    if let Some(caps) = MIN_SEC_RE.captures(text) {
        let minutes: u64 = caps[1].parse().unwrap_or(0);
        let seconds: u64 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        return minutes * 60 + seconds;
    }

    if text.contains('s')
        && let Ok(seconds) = text.replace('s', "").trim().parse::<u64>()
    {
        return seconds;
    }

    eprintln!("[buildlens] unparseable duration: {text:?}");
    0
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Render seconds for display: `"2min 05s"`, `"2min"`, or `"45s"`.
///
/// Rounds to the nearest whole second first, so this is not a strict
/// inverse of [`parse_duration`] — fine for chart labels.
pub fn format_seconds(seconds: f64) -> String {
    let secs = seconds.round().max(0.0) as u64;
    if secs >= 60 {
        let mins = secs / 60;
        let rem = secs % 60;
        if rem == 0 {
            format!("{mins}min")
        } else {
            format!("{mins}min {rem:02}s")
        }
    } else {
        format!("{secs}s")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
