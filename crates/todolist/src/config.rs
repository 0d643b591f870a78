//! Configuration management for the todolist CLI.
//!
//! Configuration is loaded from (in order of precedence):
//! 1. Command-line arguments
//! 2. Environment variables (TODOLIST_*)
//! 3. The bare `PORT` environment variable
//! 4. Config file (~/.config/todolist/config.toml, or `--config <path>`)
//! 5. Default values

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use todolist_server::server::DEFAULT_PORT;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level or filter directive.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json_logs: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Builds the provider stack for `path`, or the default config file.
    pub fn figment(path: Option<&Path>) -> Figment {
        let config_path = path.map_or_else(Self::config_path, Path::to_path_buf);

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::raw().only(&["port"]))
            .merge(Env::prefixed("TODOLIST_"))
    }

    /// Loads configuration from all sources.
    ///
    /// Reports configuration errors on stderr and falls back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        match Self::figment(path).extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                let config_path = path.map_or_else(Self::config_path, Path::to_path_buf);
                eprintln!("\x1b[33mWarning:\x1b[0m Configuration error, using defaults");
                eprintln!("  Config file: {}", config_path.display());
                eprintln!("  Error: {}", e);
                eprintln!();
                Config::default()
            },
        }
    }

    /// Returns the path to the default config file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("todolist")
            .join("config.toml")
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Prints the current configuration and its sources.
pub fn show_config(path: Option<&Path>) {
    let config = Config::load(path);
    let config_path = path.map_or_else(Config::config_path, Path::to_path_buf);

    println!("Todolist Configuration");
    println!("======================\n");

    println!("Config file: {}", config_path.display());
    if config_path.exists() {
        println!("Status: Found\n");
    } else {
        println!("Status: Not found (using defaults)\n");
    }

    println!("Current settings:");
    match config.to_toml() {
        Ok(rendered) => {
            for line in rendered.lines() {
                println!("  {}", line);
            }
        },
        Err(e) => eprintln!("  Failed to render configuration: {}", e),
    }

    println!("\nEnvironment variables:");
    println!("  PORT");
    println!("  TODOLIST_HOST");
    println!("  TODOLIST_PORT");
    println!("  TODOLIST_LOG_LEVEL");
    println!("  TODOLIST_JSON_LOGS");
}
