//! Rover: content navigation server
//!
//! Mirrors a directory of lessons as a navigation tree, serves it over HTTP,
//! and keeps it fresh with a debounced filesystem watcher.

pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod format;
pub mod logging;
pub mod navigation;
pub mod server;
pub mod tooling;
pub mod tree;
pub mod watch;
