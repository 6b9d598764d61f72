//! Content Store
//!
//! Root-confined access to content files: raw reads for the route layer and
//! `<title>` metadata for listings. A relative path never resolves outside the
//! root it is looked up in.

use crate::tree::{ContentWalker, Discovery};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Metadata for one content file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetadata {
    /// `<title>` text, or the file stem when there is none
    pub title: String,
    /// Absolute path on disk
    pub path: String,
    /// Path relative to its content root
    pub relative_path: String,
}

/// Read access to files under one or more content roots
#[derive(Debug, Clone)]
pub struct ContentStore {
    roots: Vec<PathBuf>,
    walker: ContentWalker,
}

impl ContentStore {
    pub fn new(roots: Vec<PathBuf>, walker: ContentWalker) -> Self {
        Self { roots, walker }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Resolve a relative path to a regular file inside one of the roots.
    ///
    /// Roots are tried in order. Empty, absolute and `..`-bearing paths never
    /// resolve, and neither do symlinks pointing outside the root.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let relative = sanitize(relative)?;
        self.roots
            .iter()
            .find_map(|root| resolve_in_root(root, &relative))
    }

    /// Raw text of a content file; `None` when it does not exist or is not reachable
    pub fn read_raw(&self, relative: &str) -> Option<String> {
        let path = self.resolve(relative)?;
        match std::fs::read(&path) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read content");
                None
            }
        }
    }

    /// Metadata for a single relative path
    pub fn metadata(&self, relative: &str) -> Option<ContentMetadata> {
        let path = self.resolve(relative)?;
        let raw = self.read_raw(relative)?;
        let relative_path = sanitize(relative)?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Some(ContentMetadata {
            title: extract_title(&raw).unwrap_or_else(|| stem_of(&path)),
            path: path.display().to_string(),
            relative_path,
        })
    }

    /// Metadata for every discoverable file, roots in order
    pub fn list_metadata(&self) -> Vec<ContentMetadata> {
        let mut entries = Vec::new();
        for root in &self.roots {
            let files = match self.walker.discover(root) {
                Ok(files) => files,
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "Failed to list content");
                    continue;
                }
            };
            for relative in files {
                let Some(path) = resolve_in_root(root, Path::new(&relative)) else {
                    continue;
                };
                let title = std::fs::read(&path)
                    .ok()
                    .and_then(|bytes| extract_title(&String::from_utf8_lossy(&bytes)))
                    .unwrap_or_else(|| stem_of(&path));
                entries.push(ContentMetadata {
                    title,
                    path: path.display().to_string(),
                    relative_path: relative,
                });
            }
        }
        entries
    }
}

/// Keep only normal components; reject anything that could climb out of a root
fn sanitize(relative: &str) -> Option<PathBuf> {
    let normalized = relative.replace('\\', "/");
    let mut clean = PathBuf::new();
    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                debug!(path = relative, "Rejected content path");
                return None;
            }
        }
    }
    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

fn resolve_in_root(root: &Path, relative: &Path) -> Option<PathBuf> {
    let canonical_root = dunce::canonicalize(root).ok()?;
    let resolved = dunce::canonicalize(canonical_root.join(relative)).ok()?;
    if !resolved.starts_with(&canonical_root) {
        warn!(path = %relative.display(), "Content path escapes its root");
        return None;
    }
    resolved.is_file().then_some(resolved)
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn title_pattern() -> Option<&'static Regex> {
    static TITLE: OnceLock<Option<Regex>> = OnceLock::new();
    TITLE
        .get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title\s*>").ok())
        .as_ref()
}

/// Trimmed text of the first non-empty `<title>` element
pub fn extract_title(html: &str) -> Option<String> {
    let captures = title_pattern()?.captures(html)?;
    let title = captures.get(1)?.as_str().trim();
    (!title.is_empty()).then(|| title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::WalkerConfig;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, ContentStore) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("templates");
        for (relative, body) in files {
            let path = root.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        let walker = ContentWalker::new(WalkerConfig {
            sort: true,
            ..WalkerConfig::default()
        });
        let store = ContentStore::new(vec![root], walker);
        (temp, store)
    }

    #[test]
    fn test_read_raw_existing_file() {
        let (_temp, store) = store_with(&[("algorithms/sorting.html", "<body>sort</body>")]);
        assert_eq!(
            store.read_raw("algorithms/sorting.html").as_deref(),
            Some("<body>sort</body>")
        );
        assert!(store.read_raw("algorithms/missing.html").is_none());
    }

    #[test]
    fn test_parent_traversal_is_not_found() {
        let (temp, store) = store_with(&[("intro.html", "hi")]);
        fs::write(temp.path().join("secret.txt"), "secret").unwrap();

        assert!(store.read_raw("../secret.txt").is_none());
        assert!(store.read_raw("../../etc/passwd").is_none());
        assert!(store.read_raw("a/../../secret.txt").is_none());
        assert!(store.read_raw("/etc/passwd").is_none());
        assert!(store.read_raw("").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_is_refused() {
        let (temp, store) = store_with(&[("intro.html", "hi")]);
        let outside = temp.path().join("outside.html");
        fs::write(&outside, "outside").unwrap();
        std::os::unix::fs::symlink(&outside, store.roots()[0].join("link.html")).unwrap();

        assert!(store.read_raw("link.html").is_none());
    }

    #[test]
    fn test_directories_are_not_content() {
        let (_temp, store) = store_with(&[("algorithms/sorting.html", "x")]);
        assert!(store.read_raw("algorithms").is_none());
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(
            extract_title("<html><head><TITLE>\n  Binary Search \n</TITLE></head></html>"),
            Some("Binary Search".to_string())
        );
        assert_eq!(extract_title("<title></title>"), None);
        assert_eq!(extract_title("<body>no title</body>"), None);
    }

    #[test]
    fn test_metadata_falls_back_to_stem() {
        let (_temp, store) = store_with(&[
            ("graphs/bfs.html", "<title>Breadth First</title>"),
            ("graphs/dfs.html", "<body></body>"),
        ]);

        let bfs = store.metadata("graphs/bfs.html").unwrap();
        assert_eq!(bfs.title, "Breadth First");
        assert_eq!(bfs.relative_path, "graphs/bfs.html");

        let listed = store.list_metadata();
        let titles: Vec<&str> = listed.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Breadth First", "dfs"]);
    }
}
