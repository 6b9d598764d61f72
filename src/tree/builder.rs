//! Tree builder: folds discovered paths into a navigation tree

use crate::error::NavigationError;
use crate::tree::node::{FileNode, FolderNode, NavNode};
use crate::tree::path::{classify, ClassifiedPath};

/// Default URL prefix for HTML view routes
pub const DEFAULT_URL_PREFIX: &str = "/view/";

/// Navigation tree builder
///
/// Files are processed in the order they are given. Folders with the same
/// name at the same level are merged; a folder and a file sharing a name stay
/// separate siblings.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    url_prefix: String,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_URL_PREFIX)
    }
}

impl TreeBuilder {
    pub fn new(url_prefix: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
        }
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Build a tree from relative paths in discovery order
    pub fn build<I, S>(&self, paths: I) -> Result<Vec<NavNode>, NavigationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roots = Vec::new();
        for path in paths {
            let classified = classify(path.as_ref())?;
            let file = self.file_node(&classified);
            insert(&mut roots, &classified, 0, file);
        }
        Ok(roots)
    }

    /// URL for a relative path: prefix plus percent-encoded segments, `/` kept
    pub fn url_for(&self, relative_path: &str) -> String {
        let encoded: Vec<String> = relative_path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}{}", self.url_prefix, encoded.join("/"))
    }

    fn file_node(&self, classified: &ClassifiedPath) -> NavNode {
        let path = classified.relative_path();
        NavNode::File(FileNode {
            name: classified.stem().to_string(),
            url: self.url_for(&path),
            path,
        })
    }
}

fn insert(level: &mut Vec<NavNode>, classified: &ClassifiedPath, depth: usize, file: NavNode) {
    let Some(segment) = classified.folders.get(depth) else {
        level.push(file);
        return;
    };

    for node in level.iter_mut() {
        if let NavNode::Folder(folder) = node {
            if folder.name == *segment {
                insert(&mut folder.children, classified, depth + 1, file);
                return;
            }
        }
    }

    let mut folder = FolderNode {
        name: segment.clone(),
        path: classified.folder_path(depth),
        children: Vec::new(),
    };
    insert(&mut folder.children, classified, depth + 1, file);
    level.push(NavNode::Folder(folder));
}
