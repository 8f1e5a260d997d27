//! In-process stand-in for the LogWatch backend.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;

/// What the mock saw for one request.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    /// Raw (still percent-encoded) path.
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

#[derive(Default)]
pub struct MockBackend {
    routes: Mutex<HashMap<(String, String), Canned>>,
    seen: Mutex<Vec<Seen>>,
}

impl MockBackend {
    pub fn json(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.insert(method, path, status, "application/json", body.to_string());
    }

    pub fn text(&self, method: &str, path: &str, status: u16, body: &str) {
        self.insert(method, path, status, "text/plain", body.to_string());
    }

    fn insert(&self, method: &str, path: &str, status: u16, content_type: &'static str, body: String) {
        self.routes.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            Canned {
                status: StatusCode::from_u16(status).unwrap(),
                content_type,
                body,
            },
        );
    }

    pub fn requests(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Seen {
        self.requests().last().cloned().expect("no request recorded")
    }
}

async fn handle(
    State(mock): State<Arc<MockBackend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let seen = Seen {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    };
    let key = (seen.method.clone(), seen.path.clone());
    mock.seen.lock().unwrap().push(seen);

    match mock.routes.lock().unwrap().get(&key).cloned() {
        Some(canned) => (
            canned.status,
            [(header::CONTENT_TYPE, canned.content_type)],
            canned.body,
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            "no route".to_string(),
        ),
    }
}

/// Start the mock on an ephemeral port. Returns its base URL.
pub async fn spawn() -> (String, Arc<MockBackend>) {
    let mock = Arc::new(MockBackend::default());
    let app = Router::new().fallback(handle).with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/", addr), mock)
}

/// A base URL nothing is listening on.
pub async fn dead_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}
