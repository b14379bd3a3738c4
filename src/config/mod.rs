//! Configuration system for buildlens.
//!
//! Layered hierarchy, later layers overriding earlier ones:
//!
//! 1. **Built-in defaults** — [`schema::BuildlensConfig::default()`]
//! 2. **User global config** — `~/.buildlens/config.toml`
//! 3. **Project local config** — `.buildlens.toml` in the working directory
//! 4. **Environment variables** — `BUILDLENS_*` (highest precedence)

pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::BuildlensConfig;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
pub fn load() -> BuildlensConfig {
    let mut config = BuildlensConfig::default();

    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }
    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    apply_env_overrides(&mut config);
    config
}

/// Load a TOML config file, returning `None` when the path is unknown,
/// the file is missing, or the content is malformed. A broken config file
/// must not take down the tool — defaults apply instead.
fn load_toml_file(path: Option<PathBuf>) -> Option<BuildlensConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".buildlens").join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".buildlens.toml"))
}

/// Path to the global config file, for display purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Path to the project config file, for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply `BUILDLENS_*` overrides:
/// - `BUILDLENS_WINDOW` — default window policy name
/// - `BUILDLENS_ADDR` — dashboard bind address
/// - `BUILDLENS_OPEN_BROWSER` — `1`/`true`/`yes`/`on`
/// - `BUILDLENS_HEAP_LIMIT_MB` — heap reference line (MB)
fn apply_env_overrides(config: &mut BuildlensConfig) {
    if let Ok(val) = std::env::var("BUILDLENS_WINDOW")
        && !val.is_empty()
    {
        config.general.default_window = val;
    }
    if let Ok(val) = std::env::var("BUILDLENS_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Ok(val) = std::env::var("BUILDLENS_OPEN_BROWSER") {
        config.server.open_browser = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("BUILDLENS_HEAP_LIMIT_MB")
        && let Ok(mb) = val.parse::<f64>()
    {
        config.chart.heap_limit_mb = mb;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// init / set / reset / show
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.buildlens/config.toml`.
///
/// Fails if the file exists unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.buildlens/ directory")?;
    }
    fs::write(&path, BuildlensConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single dotted key (`server.addr`, `chart.heap_limit_mb`, ...) in
/// the global config file, creating it from defaults if absent.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&BuildlensConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value = toml::from_str(&content).context("failed to parse config TOML")?;
    set_toml_value(&mut root, key, value)?;

    // Reject updates that would break the schema before persisting them.
    let rendered = toml::to_string_pretty(&root).context("failed to serialize config")?;
    let _: BuildlensConfig =
        toml::from_str(&rendered).with_context(|| format!("'{value}' is invalid for '{key}'"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, rendered).context("failed to write config file")?;

    Ok(())
}

/// Update a dotted key inside a TOML value tree, typed after the existing
/// value when there is one.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section, leaf)) = key.split_once('.') else {
        anyhow::bail!("config key must be '<section>.<field>', got '{key}'");
    };

    let table = root
        .get_mut(section)
        .and_then(|v| v.as_table_mut())
        .with_context(|| format!("unknown config section '{section}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => toml::Value::Integer(
            raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?,
        ),
        Some(toml::Value::Float(_)) => toml::Value::Float(
            raw_value
                .parse()
                .with_context(|| format!("expected number for '{key}', got '{raw_value}'"))?,
        ),
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults.
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective (fully resolved) config as TOML text.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("YES"));
        assert!(is_truthy("on"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn set_toml_value_updates_string() {
        let mut root: toml::Value = toml::from_str("[server]\naddr = \"127.0.0.1:9748\"\n").unwrap();
        set_toml_value(&mut root, "server.addr", "0.0.0.0:8000").unwrap();
        assert_eq!(
            root["server"]["addr"].as_str(),
            Some("0.0.0.0:8000")
        );
    }

    #[test]
    fn set_toml_value_types_after_existing_bool() {
        let mut root: toml::Value = toml::from_str("[server]\nopen_browser = true\n").unwrap();
        set_toml_value(&mut root, "server.open_browser", "no").unwrap();
        assert_eq!(root["server"]["open_browser"].as_bool(), Some(false));
    }

    #[test]
    fn set_toml_value_types_after_existing_float() {
        let mut root: toml::Value = toml::from_str("[chart]\nheap_limit_mb = 1433.6\n").unwrap();
        set_toml_value(&mut root, "chart.heap_limit_mb", "2048").unwrap();
        assert_eq!(root["chart"]["heap_limit_mb"].as_float(), Some(2048.0));
    }

    #[test]
    fn set_toml_value_rejects_unknown_section() {
        let mut root: toml::Value = toml::from_str("[server]\naddr = \"x\"\n").unwrap();
        assert!(set_toml_value(&mut root, "nonexistent.key", "v").is_err());
    }

    #[test]
    fn set_toml_value_rejects_undotted_key() {
        let mut root: toml::Value = toml::from_str("[server]\naddr = \"x\"\n").unwrap();
        assert!(set_toml_value(&mut root, "addr", "v").is_err());
    }

    #[test]
    fn show_effective_config_is_parseable() {
        let toml_str = show_effective_config().unwrap();
        let _: BuildlensConfig = toml::from_str(&toml_str).unwrap();
    }
}
