//! Integration tests for the Rover content navigation server

mod cli_contracts;
mod http_routes;
mod navigation_scan;
mod support;
mod watch_refresh;
