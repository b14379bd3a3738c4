use anyhow::Result;
use clap::{Parser, Subcommand};

use buildlens::{cli, config, web};

#[derive(Debug, Parser)]
#[command(name = "buildlens")]
#[command(about = "Interactive visualization for build-performance logs")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Launch the web dashboard
    Serve {
        /// Bind address (overrides config, e.g. 127.0.0.1:9748)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open the dashboard in a browser
        #[arg(long)]
        no_open: bool,
    },
    /// Run the pipeline over a log file (or stdin) and print the series
    Analyze {
        /// Input file path, or "-" for stdin
        #[arg(long, short)]
        input: Option<String>,
        /// Window policy: all, first7days, last15days, first10times, ...
        #[arg(long)]
        window: Option<String>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Check configuration files and effective settings
    Health,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective (merged) configuration
    Show,
    /// Write the annotated default config to ~/.buildlens/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a config value, e.g. `buildlens config set server.addr 0.0.0.0:8000`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Serve { addr, no_open } => {
            let mut cfg = config::load();
            if let Some(addr) = addr {
                cfg.server.addr = addr;
            }
            if no_open {
                cfg.server.open_browser = false;
            }
            web::serve(&cfg)
        }
        Commands::Analyze {
            input,
            window,
            format,
        } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_analyze(input.as_deref(), window.as_deref(), fmt)
        }
        Commands::Health => cli::run_health(),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
