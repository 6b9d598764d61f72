use parking_lot::{const_mutex, Mutex, MutexGuard};
use rover::config::RoverConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = const_mutex(());

/// Run `f` with XDG_CONFIG_HOME pointed inside `temp_dir` so no global config leaks in
pub fn with_xdg_env<F: FnOnce()>(temp_dir: &TempDir, f: F) {
    let _guard = ENV_LOCK.lock();
    let previous = std::env::var("XDG_CONFIG_HOME").ok();
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path().join("xdg"));
    f();
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
}

/// Working directory switched for the guard's lifetime, restored on drop
pub struct CurrentDirGuard {
    previous: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CurrentDirGuard {
    pub fn enter(dir: &Path) -> Self {
        let lock = ENV_LOCK.lock();
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for CurrentDirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

/// Write each `(relative path, body)` pair under `root`
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (relative, body) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }
}

/// Default configuration with sorted discovery
pub fn sorted_config() -> RoverConfig {
    let mut config = RoverConfig::default();
    config.content.sort = true;
    config
}
