//! Navigation node types

use serde::{Deserialize, Serialize};

/// Folder node: one path segment shared by every file beneath it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub name: String,
    /// Slash-joined segments from the content root down to this folder
    pub path: String,
    /// First-discovered order
    pub children: Vec<NavNode>,
}

/// File node: a single piece of servable content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// File name without its last extension
    pub name: String,
    /// Full relative path, extension included
    pub path: String,
    pub url: String,
}

/// Navigation node
///
/// Serializes with a `type` tag of `"folder"` or `"file"`, which is the shape
/// the dashboard renderer consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    Folder(FolderNode),
    File(FileNode),
}

impl NavNode {
    pub fn name(&self) -> &str {
        match self {
            NavNode::Folder(folder) => &folder.name,
            NavNode::File(file) => &file.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            NavNode::Folder(folder) => &folder.path,
            NavNode::File(file) => &file.path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, NavNode::Folder(_))
    }

    /// Children of a folder; files have none
    pub fn children(&self) -> &[NavNode] {
        match self {
            NavNode::Folder(folder) => &folder.children,
            NavNode::File(_) => &[],
        }
    }
}

/// Count file nodes across a forest, recursing into folders
pub fn count_files(nodes: &[NavNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            NavNode::File(_) => 1,
            NavNode::Folder(folder) => count_files(&folder.children),
        })
        .sum()
}

/// Summary counts for a navigation tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStats {
    /// Number of top-level nodes
    pub categories: usize,
    /// Number of files anywhere in the tree
    pub resources: usize,
}

impl NavigationStats {
    pub fn from_tree(nodes: &[NavNode]) -> Self {
        Self {
            categories: nodes.len(),
            resources: count_files(nodes),
        }
    }
}
