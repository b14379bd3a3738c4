//! CLI command implementations for buildlens.
//!
//! Provides subcommand handlers for:
//! - `buildlens analyze` — one-shot pipeline run over a log file or stdin
//! - `buildlens serve` — launch the web dashboard
//! - `buildlens health` — config and environment summary
//! - `buildlens config show|init|set|reset` — configuration management

use std::fs;
use std::io::Read;

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;

use crate::config;
use crate::pipeline::duration::format_seconds;
use crate::pipeline::extrema::{extrema_indices, format_heap_gb, mean};
use crate::pipeline::filter::{self, WindowPolicy};
use crate::pipeline::normalize::{self, NormalizedSeries};
use crate::pipeline;

/// Output format for `buildlens analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// buildlens analyze
// ---------------------------------------------------------------------------

/// Run the full pipeline over a file (or stdin when `input` is `None` or
/// `"-"`) and print the normalized series.
pub fn run_analyze(
    input: Option<&str>,
    window: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let text = read_input(input)?;
    let records = pipeline::parse_records(&text)?;

    let cfg = config::load();
    let policy = WindowPolicy::parse(window.unwrap_or(&cfg.general.default_window));
    let outcome = filter::apply(&records, policy, Utc::now());
    let series = normalize::normalize(&outcome.records);

    if outcome.is_empty {
        println!(
            "{}",
            format!("Window '{policy}' excludes every record.").yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_series_json(policy, &series)?,
        OutputFormat::Csv => print_series_csv(&series),
        OutputFormat::Table => {
            print_series_table(policy, records.len(), outcome.records.len(), &series)
        }
    }

    Ok(())
}

fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        Some(path) if path != "-" => {
            fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_series_table(
    policy: WindowPolicy,
    total_records: usize,
    window_records: usize,
    series: &NormalizedSeries,
) {
    println!("{}", "buildlens Analysis".bold().cyan());
    println!("{}", "=".repeat(60));
    println!("  {} {}", "Records:".bold(), total_records);
    println!(
        "  {} {} ({} in window)",
        "Window: ".bold(),
        policy,
        window_records
    );
    println!("  {} {}", "Points: ".bold(), series.len());
    if !series.is_aligned() {
        println!(
            "  {}",
            "Some records lack an optimize stage or total time — series lengths differ.".yellow()
        );
    }
    println!();

    println!("{}", "Series".bold().cyan());
    println!(
        "  {:<14} {:>6} {:>12} {:>12} {:>12}",
        "Name", "Count", "Min", "Max", "Avg"
    );
    println!("  {}", "-".repeat(58));

    print_duration_row("compile", &series.compile_time);
    print_duration_row("optimize", &series.optimize_time);
    print_duration_row("total", &series.total_time);
    print_heap_row("compile MB", &series.compile_heap);
    print_heap_row("optimize MB", &series.optimize_heap);

    if series.is_aligned() && !series.is_empty() {
        println!();
        println!("{}", "Timeline".bold().cyan());
        println!(
            "  {:<14} {:>10} {:>10} {:>10} {:>12} {:>12}",
            "Time", "Compile", "Optimize", "Total", "CompileMB", "OptimizeMB"
        );
        println!("  {}", "-".repeat(72));
        for (i, label) in series.time.iter().enumerate() {
            let line = format!(
                "  {:<14} {:>10} {:>10} {:>10} {:>12.1} {:>12.1}",
                label,
                format_seconds(series.compile_time[i] as f64),
                format_seconds(series.optimize_time[i] as f64),
                format_seconds(series.total_time[i] as f64),
                series.compile_heap[i],
                series.optimize_heap[i],
            );
            if i % 2 == 0 {
                println!("{line}");
            } else {
                println!("{}", line.dimmed());
            }
        }
    }
}

fn print_duration_row(name: &str, data: &[u64]) {
    let values: Vec<f64> = data.iter().map(|&v| v as f64).collect();
    match (extrema_indices(&values), mean(&values)) {
        (Some((max, min)), Some(avg)) => println!(
            "  {:<14} {:>6} {:>12} {:>12} {:>12}",
            name,
            data.len(),
            format_seconds(values[min]),
            format_seconds(values[max]),
            format_seconds(avg),
        ),
        _ => println!("  {:<14} {:>6} {:>12} {:>12} {:>12}", name, 0, "-", "-", "-"),
    }
}

fn print_heap_row(name: &str, data: &[f64]) {
    match (extrema_indices(data), mean(data)) {
        (Some((max, min)), Some(avg)) => println!(
            "  {:<14} {:>6} {:>12} {:>12} {:>12}",
            name,
            data.len(),
            format_heap_gb(data[min]),
            format_heap_gb(data[max]),
            format_heap_gb(avg),
        ),
        _ => println!("  {:<14} {:>6} {:>12} {:>12} {:>12}", name, 0, "-", "-", "-"),
    }
}

fn print_series_json(policy: WindowPolicy, series: &NormalizedSeries) -> Result<()> {
    let series_value = |data: &[f64]| {
        let extrema = extrema_indices(data);
        serde_json::json!({
            "data": data,
            "maxIndex": extrema.map(|(max, _)| max),
            "minIndex": extrema.map(|(_, min)| min),
            "average": mean(data),
        })
    };

    let compile_time: Vec<f64> = series.compile_time.iter().map(|&v| v as f64).collect();
    let optimize_time: Vec<f64> = series.optimize_time.iter().map(|&v| v as f64).collect();
    let total_time: Vec<f64> = series.total_time.iter().map(|&v| v as f64).collect();

    let value = serde_json::json!({
        "window": policy.to_string(),
        "aligned": series.is_aligned(),
        "time": series.time,
        "compileTime": series_value(&compile_time),
        "optimizeTime": series_value(&optimize_time),
        "totalTime": series_value(&total_time),
        "compileHeap": series_value(&series.compile_heap),
        "optimizeHeap": series_value(&series.optimize_heap),
    });

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_series_csv(series: &NormalizedSeries) {
    println!("time,compile_s,optimize_s,total_s,compile_mb,optimize_mb");
    for (i, label) in series.time.iter().enumerate() {
        let opt = |v: Option<&u64>| v.map(|v| v.to_string()).unwrap_or_default();
        let opt_f = |v: Option<&f64>| v.map(|v| v.to_string()).unwrap_or_default();
        println!(
            "{},{},{},{},{},{}",
            label,
            opt(series.compile_time.get(i)),
            opt(series.optimize_time.get(i)),
            opt(series.total_time.get(i)),
            opt_f(series.compile_heap.get(i)),
            opt_f(series.optimize_heap.get(i)),
        );
    }
}

// ---------------------------------------------------------------------------
// buildlens health
// ---------------------------------------------------------------------------

/// Check configuration files and effective settings.
pub fn run_health() -> Result<()> {
    println!("{}", "buildlens Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();

    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.buildlens/config.toml found"
        } else {
            "not found (run `buildlens config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".buildlens.toml found"
        } else {
            "none (optional)"
        },
    );
    print_health_item("Default window", true, &cfg.general.default_window);
    print_health_item("Dashboard addr", true, &cfg.server.addr);
    print_health_item(
        "Heap limit",
        true,
        &format!("{} MB", cfg.chart.heap_limit_mb),
    );

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// buildlens config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective buildlens Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");
    Ok(())
}

/// Initialize a default config file at `~/.buildlens/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} Config written to {}", "✓".green().bold(), path.display());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
