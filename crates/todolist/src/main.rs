//! # Todolist CLI
//!
//! Runs the todo list web server and inspects its configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "todolist")]
#[command(version)]
#[command(about = "Minimal server-rendered todo list", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    /// Configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (default)
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Display version and build info
    Version,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let mut cfg = config::Config::load(cli.config.as_deref());

    // Command-line flags take precedence over every other source
    if let Some(level) = cli.log_level {
        cfg.log_level = level;
    }
    if cli.json_logs {
        cfg.json_logs = true;
    }

    let telemetry_config =
        todolist_telemetry::TelemetryConfig::new("todolist").with_log_level(&cfg.log_level);
    let telemetry_config = if cfg.json_logs {
        telemetry_config.with_json_logs()
    } else {
        telemetry_config
    };
    todolist_telemetry::init_logging(&telemetry_config);

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                cfg.host = host;
            }
            if let Some(port) = port {
                cfg.port = port;
            }
            commands::serve(&cfg).await?;
        },

        Commands::Version => {
            commands::version();
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                config::show_config(cli.config.as_deref());
            },
            ConfigAction::Path => {
                let path = cli
                    .config
                    .clone()
                    .unwrap_or_else(config::Config::config_path);
                println!("{}", path.display());
            },
        },
    }

    Ok(())
}
