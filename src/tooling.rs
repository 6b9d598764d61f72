//! Tooling & Integration Layer
//!
//! Command-line entry points over the navigation core and the HTTP server.

pub mod cli;

pub use cli::{resolve_watch, Cli, CliContext, Commands};
