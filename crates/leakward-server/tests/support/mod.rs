//! Shared helpers for API tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use leakward_core::github::GitHubClient;
use leakward_core::templates::TemplateSet;
use leakward_server::{AppState, Server};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Router backed by a GitHub client pointed at `api_url`.
pub fn app_with_github(api_url: &str) -> Router {
    let github = GitHubClient::with_api_url(api_url).expect("valid api url");
    Server::router(AppState::from_parts(TemplateSet::builtin(), github), true)
}

/// Router whose GitHub client must never be reached.
pub fn app() -> Router {
    app_with_github("http://127.0.0.1:9")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("JSON body")
}

/// Upstream stand-in: `orgs/acme` owns two repositories, everything else is 404.
pub async fn start_upstream() -> SocketAddr {
    let app = Router::new().fallback(upstream);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn upstream(uri: Uri) -> Response {
    if uri.path() == "/orgs/acme/repos" {
        let repos = json!([
            {
                "name": "api",
                "full_name": "acme/api",
                "default_branch": "main",
                "private": true,
                "updated_at": "2024-05-01T10:00:00Z"
            },
            {
                "name": "web",
                "full_name": "acme/web",
                "default_branch": null,
                "private": false,
                "updated_at": "2024-04-01T10:00:00Z"
            }
        ]);
        return axum::Json(repos).into_response();
    }
    (StatusCode::NOT_FOUND, axum::Json(json!({"message": "Not Found"}))).into_response()
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
