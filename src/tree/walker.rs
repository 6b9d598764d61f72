//! Content discovery: recursive directory scan with extension and directory filters

use crate::error::NavigationError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Source of relative content paths for a root directory
pub trait Discovery: Send + Sync {
    /// Relative, `/`-joined paths of matching files under `root`, in discovery order
    fn discover(&self, root: &Path) -> Result<Vec<String>, NavigationError>;
}

/// Walker configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Allowed file extensions, without the leading dot
    pub extensions: Vec<String>,
    /// Directory names skipped wherever they appear below the root
    pub exclude_dirs: Vec<String>,
    pub follow_symlinks: bool,
    /// Sort entries by file name within each directory
    pub sort: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["html".to_string()],
            exclude_dirs: Vec::new(),
            follow_symlinks: false,
            sort: false,
        }
    }
}

/// Filesystem walker producing content paths
#[derive(Debug, Clone, Default)]
pub struct ContentWalker {
    config: WalkerConfig,
}

impl ContentWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Whether a file name carries one of the allowed extensions
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.config.extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }

    /// Whether any component of `relative` is an excluded directory name
    pub fn is_excluded(&self, relative: &Path) -> bool {
        relative.components().any(|component| {
            component
                .as_os_str()
                .to_str()
                .map(|name| self.config.exclude_dirs.iter().any(|ex| ex == name))
                .unwrap_or(false)
        })
    }

    fn keep_entry(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        entry
            .file_name()
            .to_str()
            .map(|name| !self.config.exclude_dirs.iter().any(|ex| ex == name))
            .unwrap_or(true)
    }

    /// Regular files, plus symlinks whose target is a file inside the root
    fn is_content_file(entry: &DirEntry, canonical_root: Option<&Path>) -> bool {
        if entry.file_type().is_file() {
            return true;
        }
        if !entry.path_is_symlink() {
            return false;
        }
        match (dunce::canonicalize(entry.path()), canonical_root) {
            (Ok(target), Some(root)) => target.starts_with(root) && target.is_file(),
            _ => false,
        }
    }
}

impl Discovery for ContentWalker {
    fn discover(&self, root: &Path) -> Result<Vec<String>, NavigationError> {
        if !root.is_dir() {
            debug!(root = %root.display(), "Content root missing, treating as empty");
            return Ok(Vec::new());
        }

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
        if self.config.sort {
            walker = walker.sort_by_file_name();
        }

        let canonical_root: Option<PathBuf> = dunce::canonicalize(root).ok();
        let mut files = Vec::new();
        for entry in walker.into_iter().filter_entry(|e| self.keep_entry(e)) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !Self::is_content_file(&entry, canonical_root.as_deref())
                || !self.matches_extension(entry.path())
            {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let segments: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            files.push(segments.join("/"));
        }

        debug!(root = %root.display(), files = files.len(), "Discovered content");
        Ok(files)
    }
}
