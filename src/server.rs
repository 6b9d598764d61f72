//! HTTP layer
//!
//! Routes over the shared `Navigation` handle and the content store, plus the
//! static mount and CORS. `run` wires everything from configuration and serves
//! until Ctrl-C.

mod error;
mod handlers;
mod pages;

pub use error::{HttpError, HttpErrorBody, HttpErrorResponse};
pub use pages::{content_type_for, inject_back_banner, not_found_page, BACK_BANNER};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::config::RoverConfig;
use crate::content::ContentStore;
use crate::navigation::Navigation;
use crate::tree::ContentWalker;
use crate::watch::{WatchConfig, WatchDaemon};

/// State shared by every route
pub struct AppState {
    pub navigation: Arc<Navigation>,
    pub content: Arc<ContentStore>,
    pub static_dir: PathBuf,
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(
        navigation: Arc<Navigation>,
        content: ContentStore,
        static_dir: PathBuf,
        cors_origins: Vec<String>,
    ) -> Self {
        Self {
            navigation,
            content: Arc::new(content),
            static_dir,
            cors_origins,
        }
    }
}

/// Options the `serve` command resolves before starting
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub root_dir: PathBuf,
    pub watch: bool,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(handlers::landing))
        .route("/dashboard", get(handlers::dashboard))
        .route("/view/{*path}", get(handlers::view_content))
        .route("/content/{*path}", get(handlers::raw_content))
        .route("/api/navigation", get(handlers::navigation))
        .route(
            "/api/refresh",
            get(handlers::refresh).post(handlers::refresh),
        )
        .route("/api/stats", get(handlers::stats))
        .route("/api/templates", get(handlers::templates))
        .route("/health", get(handlers::health))
        .nest_service("/static", static_files)
        .layer(cors)
        .with_state(Arc::new(state))
}

/// CORS for the configured origins with credentials allowed.
///
/// Credentials rule out wildcards, so methods and headers mirror the request
/// and a `*` origin entry is dropped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            if origin == "*" {
                warn!("Ignoring wildcard CORS origin, credentials are enabled");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Build navigation and content store for `config`, rooted at `base`
pub async fn build_state(config: &RoverConfig, base: &Path) -> anyhow::Result<AppState> {
    let content = config.content.clone();
    let scan_base = base.to_path_buf();
    let navigation = tokio::task::spawn_blocking(move || Navigation::from_config(&content, &scan_base))
        .await
        .context("Initial scan task failed")?
        .context("Failed to build initial navigation")?;

    let store = ContentStore::new(
        config.content.resolved_roots(base),
        ContentWalker::new(config.content.walker_config()),
    );

    Ok(AppState::new(
        Arc::new(navigation),
        store,
        config.static_dir(base),
        config.server.cors_origins.clone(),
    ))
}

/// Serve until Ctrl-C, optionally with the watcher running alongside
pub async fn run(config: RoverConfig, options: ServeOptions) -> anyhow::Result<()> {
    let state = build_state(&config, &options.root_dir).await?;
    let navigation = Arc::clone(&state.navigation);

    let watch_handle = if options.watch {
        let walker = config.content.walker_config();
        let watch_config = WatchConfig {
            roots: config.content.resolved_roots(&options.root_dir),
            debounce_ms: config.watch.debounce_ms,
            exclude_dirs: walker.exclude_dirs,
            create_missing: config.content.create_missing,
            ..WatchConfig::default()
        };
        Some(WatchDaemon::start(navigation, watch_config).context("Failed to start watcher")?)
    } else {
        info!("File watching disabled");
        None
    };

    let bind = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(bind.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!(
        address = %addr,
        mode = ?config.content.mode,
        watch = options.watch,
        "Rover server listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(handle) = watch_handle {
        handle.shutdown().await;
    }
    info!("Rover server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
