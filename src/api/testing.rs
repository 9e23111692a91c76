//! In-process stub of the site API
//!
//! Serves canned responses keyed by method and path and records every
//! request it receives, so tests can assert on headers, query strings and
//! bodies the client produced.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::{json, Value};

use super::ApiClient;
use crate::config::ApiConfig;
use crate::session::{MemoryTokenStore, Session};

/// A request as the stub saw it
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn body_json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    /// Decoded query parameter
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == key).then(|| {
                urlencoding::decode(&v.replace('+', " "))
                    .map(|s| s.into_owned())
                    .unwrap_or_default()
            })
        })
    }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
}

#[derive(Clone, Default)]
struct StubState {
    routes: Arc<Mutex<HashMap<(String, String), Canned>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub(crate) struct StubApi {
    addr: SocketAddr,
    state: StubState,
}

impl StubApi {
    pub async fn start() -> Self {
        let state = StubState::default();
        let app = Router::new()
            .fallback(handle)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn backend_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer `method path` with a JSON body
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.insert(method, path, Canned {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: "application/json",
            body: serde_json::to_vec(&body).unwrap(),
        })
    }

    /// Answer `method path` with raw bytes
    pub fn on_bytes(&self, method: &str, path: &str, body: &[u8]) -> &Self {
        self.insert(method, path, Canned {
            status: StatusCode::OK,
            content_type: "application/octet-stream",
            body: body.to_vec(),
        })
    }

    fn insert(&self, method: &str, path: &str, canned: Canned) -> &Self {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), canned);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            backend_url: self.backend_url(),
            ..ApiConfig::default()
        }
    }

    /// Client with a fresh, unauthenticated in-memory session
    pub fn client(&self) -> ApiClient {
        self.client_with(Arc::new(Session::open(MemoryTokenStore::boxed())))
    }

    pub fn client_with(&self, session: Arc<Session>) -> ApiClient {
        ApiClient::new(&self.api_config(), session).unwrap()
    }
}

async fn handle(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.as_str().to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body: body.to_vec(),
    });

    let canned = state
        .routes
        .lock()
        .unwrap()
        .get(&(method.as_str().to_string(), path))
        .cloned();

    match canned {
        Some(canned) => (
            canned.status,
            [(header::CONTENT_TYPE, canned.content_type)],
            canned.body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({"detail": "Not Found"})),
        )
            .into_response(),
    }
}

/// Page record as the API returns it
pub(crate) fn page_json(id: &str, slug: &str, is_homepage: bool) -> Value {
    json!({
        "id": id,
        "title": format!("Title {}", slug),
        "slug": slug,
        "content": format!("<p>{}</p>", slug),
        "is_homepage": is_homepage,
        "created_at": "2024-03-01T10:00:00"
    })
}

/// Blog post record
pub(crate) fn post_json(id: &str, slug: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "title": format!("Post {}", slug),
        "slug": slug,
        "content": "Line one\nLine two",
        "tags": tags,
        "published": true,
        "author": "admin",
        "created_at": "2024-03-02T08:30:00Z"
    })
}

/// Gallery image record
pub(crate) fn image_json(id: &str, featured: bool) -> Value {
    json!({
        "id": id,
        "title": format!("Image {}", id),
        "description": "",
        "file_url": format!("/api/uploads/{}.png", id),
        "tags": ["retro"],
        "is_featured": featured,
        "uploaded_by": "admin",
        "created_at": "2024-03-03T12:00:00"
    })
}

/// Contact message record
pub(crate) fn message_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Ada",
        "email": "ada@example.com",
        "message": "Hello there",
        "ip_address": "10.0.0.9",
        "created_at": "2024-03-04T09:15:00"
    })
}

/// List envelope with pagination
pub(crate) fn envelope(key: &str, items: Vec<Value>, current_page: u32, total_pages: u32) -> Value {
    let total = items.len();
    json!({
        key: items,
        "pagination": {
            "current_page": current_page,
            "total_pages": total_pages,
            "total_results": total
        }
    })
}
