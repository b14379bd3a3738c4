//! Configuration schema and defaults.
//!
//! Defines the TOML-serializable configuration with its three sections:
//! `[general]`, `[server]`, and `[chart]`. Every field has a built-in
//! default; users only set what they want to override.

use serde::{Deserialize, Serialize};

/// Top-level buildlens configuration.
///
/// Maps to the `~/.buildlens/config.toml` and `.buildlens.toml` file
/// schemas. Missing sections and fields fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildlensConfig {
    pub general: GeneralConfig,
    pub server: ServerConfig,
    pub chart: ChartConfig,
}

// ---------------------------------------------------------------------------
// [general]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Window policy applied when none is selected: `all`, `first7days`,
    /// `last15days`, `first10times`, ...
    pub default_window: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_window: "all".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Dashboard bind address.
    pub addr: String,
    /// Open the dashboard in the default browser on startup.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9748".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [chart]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Horizontal reference line on the heap chart (MB). The default is
    /// Node's default old-space limit; builds peaking above it are at risk
    /// of OOM.
    pub heap_limit_mb: f64,
    /// Draw the per-series average line.
    pub show_average: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            heap_limit_mb: 1433.6,
            show_average: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl BuildlensConfig {
    /// Annotated default config file content, written by
    /// `buildlens config init`.
    pub fn default_toml() -> String {
        r#"# buildlens Configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (BUILDLENS_*)
#   2. Project config (.buildlens.toml in current directory)
#   3. User global config (~/.buildlens/config.toml)
#   4. Built-in defaults

[general]
default_window = "all"    # all | first<N>days | last<N>days | first<N>times | last<N>times

[server]
addr = "127.0.0.1:9748"
open_browser = true

[chart]
heap_limit_mb = 1433.6    # Node default old-space limit reference line
show_average = true
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
