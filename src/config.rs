//! Configuration
//!
//! Layered configuration for the server, content discovery, the watcher and
//! logging. See `ConfigLoader` for source precedence.

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root;

pub use crate::logging::LoggingConfig;

use crate::tree::WalkerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoverConfig {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub watch: WatchSettings,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the landing page, dashboard and other static assets
    pub static_dir: PathBuf,
    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: PathBuf::from("static"),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
        }
    }
}

/// Deployment mode: selects default extensions, roots, exclusions and URL prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    /// Static HTML lessons served through `/view/`
    #[default]
    Html,
    /// React content tree (JSX/TSX/JS/HTML) addressed through `/content/`
    React,
}

impl ContentMode {
    pub fn default_extensions(self) -> Vec<String> {
        let exts: &[&str] = match self {
            ContentMode::Html => &["html"],
            ContentMode::React => &["jsx", "tsx", "html", "js"],
        };
        exts.iter().map(|e| e.to_string()).collect()
    }

    pub fn default_roots(self) -> Vec<PathBuf> {
        match self {
            ContentMode::Html => vec![PathBuf::from("templates")],
            ContentMode::React => vec![
                PathBuf::from("rover-react/src/content"),
                PathBuf::from("templates"),
            ],
        }
    }

    pub fn default_exclude_dirs(self) -> Vec<String> {
        match self {
            ContentMode::Html => Vec::new(),
            ContentMode::React => vec!["node_modules".to_string(), "build".to_string()],
        }
    }

    pub fn url_prefix(self) -> &'static str {
        match self {
            ContentMode::Html => "/view/",
            ContentMode::React => "/content/",
        }
    }

    /// Whether watching is on when the config leaves it unset
    pub fn watches_by_default(self) -> bool {
        matches!(self, ContentMode::React)
    }
}

/// Content discovery configuration. Empty lists fall back to the mode's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub mode: ContentMode,
    pub roots: Vec<PathBuf>,
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
    /// Sort directory entries by name instead of using traversal order
    pub sort: bool,
    /// Create missing roots before watching them
    pub create_missing: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            mode: ContentMode::default(),
            roots: Vec::new(),
            extensions: Vec::new(),
            exclude_dirs: Vec::new(),
            sort: false,
            create_missing: true,
        }
    }
}

impl ContentConfig {
    /// Content roots resolved against `base`
    pub fn resolved_roots(&self, base: &Path) -> Vec<PathBuf> {
        let roots = if self.roots.is_empty() {
            self.mode.default_roots()
        } else {
            self.roots.clone()
        };
        roots.into_iter().map(|root| resolve_path(base, &root)).collect()
    }

    pub fn walker_config(&self) -> WalkerConfig {
        let extensions = if self.extensions.is_empty() {
            self.mode.default_extensions()
        } else {
            self.extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect()
        };
        let exclude_dirs = if self.exclude_dirs.is_empty() {
            self.mode.default_exclude_dirs()
        } else {
            self.exclude_dirs.clone()
        };
        WalkerConfig {
            extensions,
            exclude_dirs,
            follow_symlinks: false,
            sort: self.sort,
        }
    }

    pub fn url_prefix(&self) -> &'static str {
        self.mode.url_prefix()
    }
}

/// Watcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    /// Unset means "on in react mode, off in html mode"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    pub debounce_ms: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            enabled: None,
            debounce_ms: 1000,
        }
    }
}

impl WatchSettings {
    pub fn is_enabled(&self, mode: ContentMode) -> bool {
        self.enabled.unwrap_or_else(|| mode.watches_by_default())
    }
}

impl RoverConfig {
    /// Static directory resolved against `base`
    pub fn static_dir(&self, base: &Path) -> PathBuf {
        resolve_path(base, &self.server.static_dir)
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
