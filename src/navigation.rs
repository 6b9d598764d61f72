//! Navigation handle
//!
//! Owns the content sources (one per root) and the navigation cache. A
//! `Navigation` is created once at startup with a full scan, shared as
//! `Arc<Navigation>` with the route layer and the watcher, and refreshed by
//! full rescans.

use crate::cache::{NavigationCache, NavigationSnapshot};
use crate::config::ContentConfig;
use crate::error::NavigationError;
use crate::tree::{ContentWalker, Discovery, NavNode, TreeBuilder};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// A content root together with how to scan it and build its tree
pub struct ContentSource {
    root: PathBuf,
    discovery: Box<dyn Discovery>,
    builder: TreeBuilder,
}

impl ContentSource {
    pub fn new(root: PathBuf, discovery: Box<dyn Discovery>, builder: TreeBuilder) -> Self {
        Self {
            root,
            discovery,
            builder,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discover files and build this root's tree
    pub fn scan(&self) -> Result<Vec<NavNode>, NavigationError> {
        let files = self.discovery.discover(&self.root)?;
        self.builder.build(&files)
    }
}

/// Navigation handle: content sources plus the cache they feed
pub struct Navigation {
    sources: Vec<ContentSource>,
    cache: NavigationCache,
}

impl Navigation {
    /// Create a navigation handle and run the initial full scan
    pub fn init(sources: Vec<ContentSource>) -> Result<Self, NavigationError> {
        let navigation = Self {
            sources,
            cache: NavigationCache::new(),
        };
        navigation.refresh()?;
        Ok(navigation)
    }

    /// Build sources for every configured root and run the initial scan
    pub fn from_config(content: &ContentConfig, base: &Path) -> Result<Self, NavigationError> {
        let walker = ContentWalker::new(content.walker_config());
        let sources = content
            .resolved_roots(base)
            .into_iter()
            .map(|root| {
                ContentSource::new(
                    root,
                    Box::new(walker.clone()),
                    TreeBuilder::new(content.url_prefix()),
                )
            })
            .collect();
        Self::init(sources)
    }

    pub fn roots(&self) -> Vec<&Path> {
        self.sources.iter().map(ContentSource::root).collect()
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<NavigationSnapshot> {
        self.cache.get()
    }

    fn scan_all(&self) -> Result<Vec<NavNode>, NavigationError> {
        let mut navigation = Vec::new();
        for source in &self.sources {
            navigation.extend(source.scan()?);
        }
        Ok(navigation)
    }

    /// Rescan every root and atomically replace the cached tree.
    ///
    /// Roots are concatenated in order. A failure leaves the previous tree in place.
    pub fn refresh(&self) -> Result<Arc<NavigationSnapshot>, NavigationError> {
        let started = Instant::now();
        let result = self.cache.rebuild(|| self.scan_all());

        match &result {
            Ok(snapshot) => info!(
                files = crate::tree::count_files(&snapshot.navigation),
                generation = snapshot.generation,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Navigation rebuilt"
            ),
            Err(e) => warn!(error = %e, "Navigation rebuild failed, keeping previous tree"),
        }
        result
    }
}
