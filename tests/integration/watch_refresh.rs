use rover::config::{ContentConfig, ContentMode};
use rover::navigation::Navigation;
use rover::tree::count_files;
use rover::watch::{WatchConfig, WatchDaemon};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use crate::integration::support::{sorted_config, CurrentDirGuard};

async fn wait_for<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    condition()
}

fn watch_config(temp: &TempDir) -> WatchConfig {
    WatchConfig {
        roots: vec![temp.path().join("templates")],
        debounce_ms: 100,
        ..WatchConfig::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn new_file_appears_after_debounce() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("templates");
    fs::create_dir_all(&root).unwrap();
    let navigation =
        Arc::new(Navigation::from_config(&sorted_config().content, temp.path()).unwrap());
    assert!(navigation.snapshot().navigation.is_empty());

    let handle = WatchDaemon::start(Arc::clone(&navigation), watch_config(&temp)).unwrap();
    // Give the backend a moment to register its watches
    tokio::time::sleep(Duration::from_millis(100)).await;

    fs::create_dir_all(root.join("algorithms")).unwrap();
    fs::write(root.join("algorithms/sorting.html"), "<html></html>").unwrap();
    fs::write(root.join("intro.html"), "<html></html>").unwrap();

    let nav = Arc::clone(&navigation);
    assert!(wait_for(move || count_files(&nav.snapshot().navigation) == 2).await);

    let fired = handle.shutdown().await;
    assert!(fired >= 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_root_is_created_when_allowed() {
    let temp = TempDir::new().unwrap();
    let navigation =
        Arc::new(Navigation::from_config(&sorted_config().content, temp.path()).unwrap());

    let handle = WatchDaemon::start(Arc::clone(&navigation), watch_config(&temp)).unwrap();
    assert!(temp.path().join("templates").is_dir());
    handle.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_root_is_skipped_when_creation_disabled() {
    let temp = TempDir::new().unwrap();
    let navigation =
        Arc::new(Navigation::from_config(&sorted_config().content, temp.path()).unwrap());
    let config = WatchConfig {
        create_missing: false,
        ..watch_config(&temp)
    };

    let handle = WatchDaemon::start(navigation, config).unwrap();
    assert!(!temp.path().join("templates").exists());
    assert_eq!(handle.shutdown().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn relative_root_under_excluded_ancestor_still_refreshes() {
    let temp = TempDir::new().unwrap();
    let site = temp.path().join("build/site");
    fs::create_dir_all(site.join("content")).unwrap();
    let _cwd = CurrentDirGuard::enter(&site);

    let content = ContentConfig {
        mode: ContentMode::React,
        roots: vec!["content".into()],
        sort: true,
        ..ContentConfig::default()
    };
    let base = Path::new(".");
    let navigation = Arc::new(Navigation::from_config(&content, base).unwrap());
    let config = WatchConfig {
        roots: content.resolved_roots(base),
        debounce_ms: 100,
        exclude_dirs: content.walker_config().exclude_dirs,
        ..WatchConfig::default()
    };
    assert!(config.exclude_dirs.contains(&"build".to_string()));

    let handle = WatchDaemon::start(Arc::clone(&navigation), config).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    fs::write(site.join("content/Intro.jsx"), "export default () => null;").unwrap();

    let nav = Arc::clone(&navigation);
    assert!(wait_for(move || count_files(&nav.snapshot().navigation) == 1).await);
    assert!(handle.shutdown().await >= 1);
}
