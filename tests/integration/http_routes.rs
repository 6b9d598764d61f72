use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use rover::server::{build_state, router, BACK_BANNER};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::integration::support::{sorted_config, write_files};

async fn app_for(temp: &TempDir) -> Router {
    router(build_state(&sorted_config(), temp.path()).await.unwrap())
}

async fn request(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn dashboard_flow_navigation_then_view() {
    let temp = TempDir::new().unwrap();
    write_files(
        temp.path(),
        &[
            ("static/dashboard.html", "<html><body>dash</body></html>"),
            (
                "templates/graphs/bfs.html",
                "<html><head><title>BFS</title></head><body>queue</body></html>",
            ),
        ],
    );
    let app = app_for(&temp).await;

    let (status, body) = request(app.clone(), Method::GET, "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    // The dashboard itself is served untouched
    assert_eq!(body, b"<html><body>dash</body></html>");

    let (_, body) = request(app.clone(), Method::GET, "/api/navigation").await;
    let nav: Value = serde_json::from_slice(&body).unwrap();
    let url = nav["navigation"][0]["children"][0]["url"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(url, "/view/graphs/bfs.html");

    let (status, body) = request(app, Method::GET, &url).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains(&format!("<body>{}queue", BACK_BANNER)));
}

#[tokio::test]
async fn refresh_via_get_and_concurrent_readers() {
    let temp = TempDir::new().unwrap();
    write_files(temp.path(), &[("templates/a.html", "x")]);
    let app = app_for(&temp).await;

    fs::write(temp.path().join("templates/b.html"), "y").unwrap();

    let mut tasks = Vec::new();
    for i in 0..8 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let uri = if i % 2 == 0 { "/api/refresh" } else { "/api/navigation" };
            request(app, Method::GET, uri).await
        }));
    }
    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        let len = value["navigation"].as_array().unwrap().len();
        // Readers see either the old or the new tree, never a partial one
        assert!(len == 1 || len == 2);
    }

    let (_, body) = request(app, Method::GET, "/api/stats").await;
    let stats: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(stats["totalResources"], 2);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let temp = TempDir::new().unwrap();
    let (status, _) = request(app_for(&temp).await, Method::GET, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
