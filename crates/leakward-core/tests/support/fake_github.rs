//! In-process stand-in for the GitHub REST API.
//!
//! Serves repository listings and contents endpoints from fixture data and
//! records every request so tests can assert what was called.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{Json, Router};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

/// Fixture data served by the fake.
#[derive(Debug, Default, Clone)]
pub struct FakeGitHub {
    /// Organization name -> number of repositories.
    pub orgs: HashMap<String, usize>,
    /// User name -> number of repositories.
    pub users: HashMap<String, usize>,
    /// `owner/name` -> file names in `.github/workflows`. Missing means 404.
    pub workflow_dirs: HashMap<String, Vec<String>>,
    /// `owner/name` whose workflow listing returns a non-array body.
    pub malformed_dirs: Vec<String>,
    /// `owner/name` -> status answered to the file write. Default 201.
    pub put_status: HashMap<String, u16>,
    /// (`orgs/acme` or `users/dev`, page) -> forced status.
    pub page_status: HashMap<(String, u32), u16>,
}

impl FakeGitHub {
    pub fn with_org(mut self, name: &str, repos: usize) -> Self {
        self.orgs.insert(name.to_string(), repos);
        self
    }

    pub fn with_user(mut self, name: &str, repos: usize) -> Self {
        self.users.insert(name.to_string(), repos);
        self
    }

    pub fn with_workflows(mut self, repo: &str, files: &[&str]) -> Self {
        self.workflow_dirs.insert(
            repo.to_string(),
            files.iter().map(|f| f.to_string()).collect(),
        );
        self
    }

    pub fn with_malformed_dir(mut self, repo: &str) -> Self {
        self.malformed_dirs.push(repo.to_string());
        self
    }

    pub fn with_put_status(mut self, repo: &str, status: u16) -> Self {
        self.put_status.insert(repo.to_string(), status);
        self
    }

    pub fn with_page_status(mut self, listing: &str, page: u32, status: u16) -> Self {
        self.page_status.insert((listing.to_string(), page), status);
        self
    }
}

/// One request as seen by the fake.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn page(&self) -> Option<u32> {
        query_param(self.query.as_deref(), "page").and_then(|p| p.parse().ok())
    }
}

struct Shared {
    fixtures: FakeGitHub,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<Shared>>;

/// Running fake bound to an ephemeral local port.
pub struct FakeServer {
    pub base_url: String,
    state: SharedState,
}

impl FakeServer {
    pub async fn start(fixtures: FakeGitHub) -> Self {
        let state = Arc::new(Mutex::new(Shared {
            fixtures,
            requests: Vec::new(),
        }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind to ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        let app = Router::new().fallback(handle).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake github server");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn writes(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::PUT)
            .collect()
    }

    /// Listing requests whose path starts with `prefix` (e.g. `/orgs/acme`).
    pub fn listing_requests(&self, prefix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with(prefix))
            .collect()
    }
}

async fn handle(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut shared = state.lock().unwrap();
    shared.requests.push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let segments: Vec<&str> = uri.path().trim_start_matches('/').split('/').collect();
    let fixtures = &shared.fixtures;

    match (method, segments.as_slice()) {
        (Method::GET, [kind @ ("orgs" | "users"), account, "repos"]) => {
            let owners = if *kind == "orgs" {
                &fixtures.orgs
            } else {
                &fixtures.users
            };
            let page: u32 = query_param(uri.query(), "page")
                .and_then(|p| p.parse().ok())
                .unwrap_or(1);
            let per_page: usize = query_param(uri.query(), "per_page")
                .and_then(|p| p.parse().ok())
                .unwrap_or(30);

            let listing = format!("{}/{}", kind, account);
            if let Some(status) = fixtures.page_status.get(&(listing, page)) {
                return status_response(*status);
            }

            match owners.get(*account) {
                Some(total) => {
                    let start = (page as usize - 1) * per_page;
                    let end = (start + per_page).min(*total);
                    let repos: Vec<Value> = (start.min(end)..end)
                        .map(|i| repo_json(account, i))
                        .collect();
                    Json(Value::Array(repos)).into_response()
                }
                None => status_response(404),
            }
        }
        (Method::GET, ["repos", owner, name, "contents", ".github", "workflows"]) => {
            let full_name = format!("{}/{}", owner, name);
            if fixtures.malformed_dirs.contains(&full_name) {
                return Json(json!({"message": "unexpected object"})).into_response();
            }
            match fixtures.workflow_dirs.get(&full_name) {
                Some(files) => {
                    let entries: Vec<Value> = files
                        .iter()
                        .map(|f| json!({"name": f, "type": "file"}))
                        .collect();
                    Json(Value::Array(entries)).into_response()
                }
                None => status_response(404),
            }
        }
        (
            Method::PUT,
            ["repos", owner, name, "contents", ".github", "workflows", "security.yml"],
        ) => {
            let full_name = format!("{}/{}", owner, name);
            let status = fixtures.put_status.get(&full_name).copied().unwrap_or(201);
            status_response(status)
        }
        _ => status_response(404),
    }
}

fn status_response(status: u16) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"message": status.to_string()}))).into_response()
}

fn repo_json(owner: &str, index: usize) -> Value {
    json!({
        "id": index,
        "name": format!("repo-{index}"),
        "full_name": format!("{owner}/repo-{index}"),
        "default_branch": if index % 3 == 0 { Value::Null } else { json!("develop") },
        "private": index % 2 == 0,
        "updated_at": "2024-01-01T00:00:00Z",
    })
}

fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
