//! Watch daemon and runtime logic.

use super::debounce::Debouncer;
use super::events::{classify_event, ChangeEvent, WatchConfig};
use crate::error::ApiError;
use crate::navigation::Navigation;
use crate::tree::{ContentWalker, WalkerConfig};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Watch mode daemon
pub struct WatchDaemon;

impl WatchDaemon {
    /// Start watching the configured roots.
    ///
    /// Must be called from inside a tokio runtime. Changes are forwarded to a
    /// single debounce task, which rebuilds the navigation once the stream has
    /// been quiet for `debounce_ms`.
    pub fn start(navigation: Arc<Navigation>, config: WatchConfig) -> Result<WatchHandle, ApiError> {
        let roots = prepare_roots(&config)?;
        let walker = ContentWalker::new(WalkerConfig {
            exclude_dirs: config.exclude_dirs.clone(),
            ..WalkerConfig::default()
        });
        let (tx, rx) = mpsc::channel::<ChangeEvent>(config.channel_capacity.max(1));
        let filter_roots = roots.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let Some(change) = classify_event(&event, &filter_roots, &walker) else {
                    return;
                };
                debug!(event = ?change, "Change detected");
                match tx.try_send(change) {
                    // A full queue already guarantees a pending rebuild
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => {
                        debug!("Debounce task gone, dropping change event");
                    }
                }
            }
            Err(e) => warn!("Watch error: {}", e),
        })
        .map_err(|e| ApiError::WatchError(format!("Failed to create watcher: {}", e)))?;

        for root in &roots {
            watcher
                .watch(root, RecursiveMode::Recursive)
                .map_err(|e| {
                    ApiError::WatchError(format!("Failed to watch {}: {}", root.display(), e))
                })?;
            info!(root = %root.display(), "Watching content root");
        }
        let watched = roots.len();

        let debouncer = Debouncer::from_millis(config.debounce_ms);
        info!(
            roots = watched,
            debounce_ms = config.debounce_ms,
            "Watch daemon started"
        );

        let task = tokio::spawn(debouncer.run(rx, move || {
            let navigation = Arc::clone(&navigation);
            async move {
                info!("Content changed, rebuilding navigation");
                match tokio::task::spawn_blocking(move || navigation.refresh()).await {
                    Ok(_) => {}
                    Err(e) => error!("Navigation rebuild task failed: {}", e),
                }
            }
        }));

        Ok(WatchHandle {
            watcher,
            task,
        })
    }
}

/// Create or skip missing roots, then canonicalize the rest.
///
/// Backends report absolute paths, so event filtering and watch registration
/// both use the canonical form.
fn prepare_roots(config: &WatchConfig) -> Result<Vec<PathBuf>, ApiError> {
    let mut roots = Vec::with_capacity(config.roots.len());
    for root in &config.roots {
        if !root.exists() {
            if config.create_missing {
                std::fs::create_dir_all(root).map_err(|e| {
                    ApiError::WatchError(format!(
                        "Failed to create content root {}: {}",
                        root.display(),
                        e
                    ))
                })?;
                info!(root = %root.display(), "Created missing content root");
            } else {
                warn!(root = %root.display(), "Content root missing, not watching");
                continue;
            }
        }
        let canonical = dunce::canonicalize(root).map_err(|e| {
            ApiError::WatchError(format!(
                "Failed to resolve content root {}: {}",
                root.display(),
                e
            ))
        })?;
        roots.push(canonical);
    }
    Ok(roots)
}

/// Running watcher plus its debounce task
pub struct WatchHandle {
    watcher: RecommendedWatcher,
    task: JoinHandle<usize>,
}

impl WatchHandle {
    /// Stop watching and wait for the debounce task to drain.
    ///
    /// A rebuild that has been scheduled but not fired is dropped.
    pub async fn shutdown(self) -> usize {
        let WatchHandle { watcher, task } = self;
        // Dropping the watcher drops the only sender and ends the task
        drop(watcher);
        match task.await {
            Ok(fired) => {
                info!(rebuilds = fired, "Watch daemon stopped");
                fired
            }
            Err(e) => {
                error!("Debounce task failed: {}", e);
                0
            }
        }
    }
}
