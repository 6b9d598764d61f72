//! CLI Tooling
//!
//! Command-line interface for Rover: run the server, or inspect the navigation
//! and effective configuration for a root directory.

use crate::config::{ConfigLoader, ContentMode, LoggingConfig, RoverConfig, WatchSettings};
use crate::error::ApiError;
use crate::format::{format_navigation_text, format_stats_text};
use crate::navigation::Navigation;
use crate::server::{self, ServeOptions};
use crate::tree::NavigationStats;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Rover - content navigation server
#[derive(Parser)]
#[command(name = "rover")]
#[command(about = "Serve a directory of lessons with an auto-refreshing navigation tree")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory; relative paths in the configuration resolve against it
    #[arg(long, default_value = ".")]
    pub root_dir: PathBuf,

    /// Configuration file path (layered over global and rover.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Deployment mode (html, react)
    #[arg(long, value_enum)]
    pub mode: Option<ContentMode>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags over the configured logging section
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut logging = base.clone();
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server until Ctrl-C
    Serve {
        /// Listen address
        #[arg(long)]
        host: Option<String>,
        /// Listen port
        #[arg(long)]
        port: Option<u16>,
        /// Rebuild navigation when content changes
        #[arg(long, conflicts_with = "no_watch")]
        watch: bool,
        /// Never watch, even in react mode
        #[arg(long)]
        no_watch: bool,
        /// Quiet period before a rebuild, in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
    /// Print the navigation tree
    Nav {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print category and resource counts
    Stats {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Watch decision: explicit flags win, otherwise the configured default for the mode
pub fn resolve_watch(watch: bool, no_watch: bool, settings: &WatchSettings, mode: ContentMode) -> bool {
    if watch {
        true
    } else if no_watch {
        false
    } else {
        settings.is_enabled(mode)
    }
}

/// CLI context: root directory plus the effective configuration
pub struct CliContext {
    root_dir: PathBuf,
    config: RoverConfig,
}

impl CliContext {
    /// Load configuration for `root_dir`, layering `config_path` when given
    pub fn new(
        root_dir: PathBuf,
        config_path: Option<PathBuf>,
        mode: Option<ContentMode>,
    ) -> Result<Self, ApiError> {
        let mut config = match &config_path {
            Some(path) => ConfigLoader::load_with_file(&root_dir, path)?,
            None => ConfigLoader::load(&root_dir)?,
        };
        if let Some(mode) = mode {
            config.content.mode = mode;
        }
        Ok(Self::with_config(root_dir, config))
    }

    pub fn with_config(root_dir: PathBuf, config: RoverConfig) -> Self {
        Self { root_dir, config }
    }

    pub fn config(&self) -> &RoverConfig {
        &self.config
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = match command {
            Commands::Serve {
                host,
                port,
                watch,
                no_watch,
                debounce_ms,
            } => self.handle_serve(host.clone(), *port, *watch, *no_watch, *debounce_ms),
            Commands::Nav { format } => self.handle_nav(format),
            Commands::Stats { format } => self.handle_stats(format),
            Commands::Config => self.handle_config(),
        };
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn handle_serve(
        &self,
        host: Option<String>,
        port: Option<u16>,
        watch: bool,
        no_watch: bool,
        debounce_ms: Option<u64>,
    ) -> Result<String, ApiError> {
        let mut config = self.config.clone();
        if let Some(host) = host {
            config.server.host = host;
        }
        if let Some(port) = port {
            config.server.port = port;
        }
        if let Some(debounce_ms) = debounce_ms {
            config.watch.debounce_ms = debounce_ms;
        }
        let options = ServeOptions {
            root_dir: self.root_dir.clone(),
            watch: resolve_watch(watch, no_watch, &config.watch, config.content.mode),
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ServerError(format!("Failed to start runtime: {}", e)))?;
        runtime
            .block_on(server::run(config, options))
            .map_err(|e| ApiError::ServerError(format!("{:#}", e)))?;
        Ok(String::new())
    }

    fn scan(&self) -> Result<Navigation, ApiError> {
        Ok(Navigation::from_config(&self.config.content, &self.root_dir)?)
    }

    fn handle_nav(&self, format: &str) -> Result<String, ApiError> {
        validate_format(format)?;
        let snapshot = self.scan()?.snapshot();
        if format == "json" {
            let body = json!({
                "navigation": snapshot.navigation,
                "last_updated": snapshot.last_updated_epoch(),
            });
            return Ok(serde_json::to_string_pretty(&body)?);
        }
        Ok(format_navigation_text(&snapshot.navigation))
    }

    fn handle_stats(&self, format: &str) -> Result<String, ApiError> {
        validate_format(format)?;
        let snapshot = self.scan()?.snapshot();
        if format == "json" {
            let stats = NavigationStats::from_tree(&snapshot.navigation);
            let body = json!({
                "totalCategories": stats.categories,
                "totalResources": stats.resources,
                "last_updated": snapshot.last_updated_epoch(),
            });
            return Ok(serde_json::to_string_pretty(&body)?);
        }
        Ok(format_stats_text(&snapshot))
    }

    fn handle_config(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(&self.config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render configuration: {}", e)))
    }
}

fn validate_format(format: &str) -> Result<(), ApiError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ApiError::ConfigError(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Serve { .. } => "serve",
        Commands::Nav { .. } => "nav",
        Commands::Stats { .. } => "stats",
        Commands::Config => "config",
    }
}
