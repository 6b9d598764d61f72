//! Watch events and configuration.

use crate::tree::ContentWalker;
use notify::event::{CreateKind, ModifyKind, RemoveKind};
use notify::{Event, EventKind};
use std::path::{Path, PathBuf};

/// Watch mode configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Content roots to watch recursively
    pub roots: Vec<PathBuf>,
    /// Quiet period after the last change before a rebuild fires
    pub debounce_ms: u64,
    /// Directory names whose contents never trigger a rebuild
    pub exclude_dirs: Vec<String>,
    /// Create missing roots so they can be watched
    pub create_missing: bool,
    /// Capacity of the watcher-to-debouncer channel
    pub channel_capacity: usize,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from("templates")],
            debounce_ms: 1000,
            exclude_dirs: Vec::new(),
            create_missing: true,
            channel_capacity: 64,
        }
    }
}

/// Filesystem change event for a non-directory entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    Created(PathBuf),
    Modified(PathBuf),
    Removed(PathBuf),
    Renamed { from: PathBuf, to: PathBuf },
}

impl ChangeEvent {
    /// The path the entry lives at after the change
    pub fn path(&self) -> &Path {
        match self {
            ChangeEvent::Created(p) | ChangeEvent::Modified(p) | ChangeEvent::Removed(p) => p,
            ChangeEvent::Renamed { to, .. } => to,
        }
    }
}

/// Convert a notify event into a change event.
///
/// Returns `None` for directory-level events, access events, and paths inside
/// directories the walker excludes. Exclusion is judged on the path relative
/// to the matching root, so `roots` must be in the form the backend reports
/// (absolute and canonical).
pub fn classify_event(event: &Event, roots: &[PathBuf], walker: &ContentWalker) -> Option<ChangeEvent> {
    let first = event.paths.first()?.clone();
    let change = match event.kind {
        EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => {
            return None
        }
        EventKind::Create(_) => ChangeEvent::Created(first),
        EventKind::Remove(_) => ChangeEvent::Removed(first),
        EventKind::Modify(ModifyKind::Name(_)) if event.paths.len() >= 2 => ChangeEvent::Renamed {
            from: first,
            to: event.paths[1].clone(),
        },
        EventKind::Modify(_) | EventKind::Any | EventKind::Other => ChangeEvent::Modified(first),
        EventKind::Access(_) => return None,
    };

    if change.path().is_dir() || in_excluded_dir(change.path(), roots, walker) {
        return None;
    }
    Some(change)
}

fn in_excluded_dir(path: &Path, roots: &[PathBuf], walker: &ContentWalker) -> bool {
    // Ancestors of a root never count, only directories below it
    let Some(relative) = roots.iter().find_map(|root| path.strip_prefix(root).ok()) else {
        return false;
    };
    relative
        .parent()
        .map(|parent| walker.is_excluded(parent))
        .unwrap_or(false)
}
