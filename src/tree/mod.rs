//! Navigation Tree
//!
//! Mirrors the folder layout of a content root as a nested tree of folder and
//! file nodes. Discovery (`walker`) yields relative paths, the classifier
//! (`path`) splits them into segments, and the builder folds them into nodes.

pub mod builder;
pub mod node;
pub mod path;
pub mod walker;

pub use builder::TreeBuilder;
pub use node::{count_files, FileNode, FolderNode, NavNode, NavigationStats};
pub use path::{classify, ClassifiedPath};
pub use walker::{ContentWalker, Discovery, WalkerConfig};
