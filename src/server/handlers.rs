use std::path::Path;
use std::sync::Arc;

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use crate::content::ContentMetadata;
use crate::server::error::HttpError;
use crate::server::pages::{content_type_for, inject_back_banner, not_found_page};
use crate::server::AppState;
use crate::tree::{NavNode, NavigationStats};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub navigation: Vec<NavNode>,
    pub last_updated: f64,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub navigation: Vec<NavNode>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_categories: usize,
    pub total_resources: usize,
    pub status: &'static str,
    pub platform_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<ContentMetadata>,
    pub count: usize,
}

async fn read_static(dir: &Path, name: &str) -> Option<String> {
    match tokio::fs::read_to_string(dir.join(name)).await {
        Ok(html) => Some(html),
        Err(e) => {
            debug!(file = name, error = %e, "Static page unavailable");
            None
        }
    }
}

fn not_found_html() -> Response {
    (StatusCode::NOT_FOUND, Html(not_found_page())).into_response()
}

pub async fn landing(State(state): State<Arc<AppState>>) -> Response {
    match read_static(&state.static_dir, "landingPage.html").await {
        Some(html) => Html(html).into_response(),
        None => Json(RootResponse {
            status: "healthy",
            message: "Rover API",
            version: env!("CARGO_PKG_VERSION"),
        })
        .into_response(),
    }
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Response {
    match read_static(&state.static_dir, "dashboard.html").await {
        Some(html) => Html(html).into_response(),
        None => not_found_html(),
    }
}

pub async fn view_content(
    State(state): State<Arc<AppState>>,
    UrlPath(path): UrlPath<String>,
) -> Response {
    match state.content.read_raw(&path) {
        Some(html) => Html(inject_back_banner(&html)).into_response(),
        None => {
            debug!(path = %path, "View target not found");
            not_found_html()
        }
    }
}

pub async fn raw_content(
    State(state): State<Arc<AppState>>,
    UrlPath(path): UrlPath<String>,
) -> Result<Response, HttpError> {
    let body = state
        .content
        .read_raw(&path)
        .ok_or_else(|| HttpError::not_found(format!("Content not found: {}", path)))?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&path))], body).into_response())
}

pub async fn navigation(State(state): State<Arc<AppState>>) -> Json<NavigationResponse> {
    let snapshot = state.navigation.snapshot();
    Json(NavigationResponse {
        navigation: snapshot.navigation.clone(),
        last_updated: snapshot.last_updated_epoch(),
    })
}

pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<Json<RefreshResponse>, HttpError> {
    let navigation = Arc::clone(&state.navigation);
    let snapshot = tokio::task::spawn_blocking(move || navigation.refresh())
        .await
        .map_err(|e| {
            error!("Refresh task failed: {}", e);
            HttpError::internal(format!("Refresh task failed: {}", e))
        })?
        .map_err(|e| HttpError::internal(format!("Error refreshing navigation: {}", e)))?;

    Ok(Json(RefreshResponse {
        status: "success",
        message: "Navigation refreshed",
        navigation: snapshot.navigation.clone(),
    }))
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let snapshot = state.navigation.snapshot();
    let stats = NavigationStats::from_tree(&snapshot.navigation);
    Json(StatsResponse {
        total_categories: stats.categories,
        total_resources: stats.resources,
        status: "24/7",
        platform_type: "Free",
    })
}

pub async fn templates(State(state): State<Arc<AppState>>) -> Result<Json<TemplatesResponse>, HttpError> {
    let content = Arc::clone(&state.content);
    let templates = tokio::task::spawn_blocking(move || content.list_metadata())
        .await
        .map_err(|e| HttpError::internal(format!("Listing task failed: {}", e)))?;
    Ok(Json(TemplatesResponse {
        count: templates.len(),
        templates,
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
