#![allow(dead_code)]

use apiclient::{
    abstract_trait::SessionStoreTrait,
    session::{FileSessionStore, Tokens},
    state::AppState,
    transport::ReqwestTransport,
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{
        HeaderMap, Method, StatusCode, Uri,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use shared::config::ClientConfig;
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tempfile::TempDir;

/// One request as the fake backend received it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

/// In-memory stand-in for the admin backend.
///
/// Accepts exactly one access token at a time; every successful refresh
/// rotates both tokens.
pub struct FakeBackend {
    tokens: Mutex<(String, String)>,
    issued: AtomicUsize,
    refresh_calls: AtomicUsize,
    refresh_delay: Duration,
    recorded: Mutex<Vec<Recorded>>,
}

impl FakeBackend {
    pub fn new(access_token: &str, refresh_token: &str) -> Arc<Self> {
        Arc::new(Self {
            tokens: Mutex::new((access_token.to_string(), refresh_token.to_string())),
            issued: AtomicUsize::new(1),
            refresh_calls: AtomicUsize::new(0),
            refresh_delay: Duration::from_millis(50),
            recorded: Mutex::new(Vec::new()),
        })
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn current_tokens(&self) -> (String, String) {
        self.tokens.lock().unwrap().clone()
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    /// Requests other than the auth endpoints.
    pub fn protected(&self) -> Vec<Recorded> {
        self.recorded()
            .into_iter()
            .filter(|r| !r.path.starts_with("/auth/"))
            .collect()
    }

    pub fn last(&self) -> Recorded {
        self.recorded().pop().expect("no request recorded")
    }

    fn rotate(&self) -> (String, String) {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let pair = (format!("T{n}"), format!("R{n}"));
        *self.tokens.lock().unwrap() = pair.clone();
        pair
    }

    fn is_authorized(&self, authorization: Option<&str>) -> bool {
        let (access, _) = self.current_tokens();
        authorization == Some(format!("Bearer {access}").as_str())
    }
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn parse_query(uri: &Uri) -> HashMap<String, String> {
    uri.query()
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn company(id: &str) -> Value {
    json!({
        "id": id.parse::<i64>().unwrap_or(0),
        "name": "Acme",
        "email": "ops@acme.io",
        "phone": "+15550100",
        "address": "1 Main St",
        "identifier": "ACME",
        "logo": { "String": "", "Valid": false },
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-01T10:00:00Z"
    })
}

fn user(id: i64) -> Value {
    json!({ "id": id, "username": "ann@acme.io", "phone": "+15550101", "company_id": 7 })
}

async fn handle(
    State(backend): State<Arc<FakeBackend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    backend.recorded.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: parse_query(&uri),
        authorization: authorization.clone(),
        content_type,
        body: body.clone(),
    });

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["auth", "login"]) => {
            if body["password"] == "wrong" {
                return reply(
                    StatusCode::UNAUTHORIZED,
                    json!({ "error": "invalid credentials" }),
                );
            }
            let (access, refresh) = ("T1".to_string(), "R1".to_string());
            *backend.tokens.lock().unwrap() = (access.clone(), refresh.clone());
            reply(
                StatusCode::OK,
                json!({ "access_token": access, "refresh_token": refresh }),
            )
        }
        ("POST", ["auth", "register"]) => {
            reply(StatusCode::CREATED, json!({ "message": "registered" }))
        }
        ("POST", ["auth", "refresh"]) => {
            backend.refresh_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(backend.refresh_delay).await;

            let (_, expected) = backend.current_tokens();
            if body["refresh_token"] != expected.as_str() {
                return reply(
                    StatusCode::UNAUTHORIZED,
                    json!({ "error": "invalid refresh token" }),
                );
            }
            let (access, refresh) = backend.rotate();
            reply(
                StatusCode::OK,
                json!({ "access_token": access, "refresh_token": refresh }),
            )
        }
        _ if !backend.is_authorized(authorization.as_deref()) => {
            reply(StatusCode::UNAUTHORIZED, json!({ "error": "token expired" }))
        }
        ("GET", ["companies"]) => reply(StatusCode::OK, json!([company("1"), company("2")])),
        ("GET", ["companies", "404"]) => {
            reply(StatusCode::NOT_FOUND, json!({ "error": "company not found" }))
        }
        ("GET", ["companies", id]) | ("PUT", ["companies", id]) => {
            reply(StatusCode::OK, company(id))
        }
        ("POST", ["companies"]) => {
            let mut created = body.clone();
            created["id"] = json!(10);
            reply(StatusCode::CREATED, created)
        }
        ("DELETE", _) => StatusCode::NO_CONTENT.into_response(),
        ("GET", ["rbac", "roles", "company", id]) => reply(
            StatusCode::OK,
            json!([{ "id": "3", "company_id": id, "name": "admin", "permissions": null }]),
        ),
        ("GET", ["rbac", "module-actions"]) => reply(StatusCode::OK, Value::Null),
        ("GET", ["users", "search"]) => reply(StatusCode::OK, json!([user(5)])),
        ("POST", ["company-users", "register"]) => reply(StatusCode::CREATED, user(6)),
        ("PUT", ["users", id]) => reply(StatusCode::OK, user(id.parse().unwrap_or(0))),
        _ => reply(StatusCode::OK, json!({ "message": "ok" })),
    }
}

pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(backend: Arc<FakeBackend>) -> Self {
        let app = Router::new().fallback(handle).with_state(backend);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A client wired to a running fake backend with a session file in a
/// temporary directory.
pub struct Harness {
    pub backend: Arc<FakeBackend>,
    pub state: AppState,
    pub session_file: PathBuf,
    _server: TestServer,
    _dir: TempDir,
}

impl Harness {
    pub async fn start(backend: Arc<FakeBackend>, tokens: Tokens) -> Self {
        let server = TestServer::spawn(backend.clone()).await;
        let dir = tempfile::tempdir().unwrap();
        let session_file = dir.path().join("session.json");

        let store = FileSessionStore::new(&session_file);
        if !tokens.is_empty() {
            store.save(&tokens).await.unwrap();
        }

        let config = ClientConfig::new(server.base_url.clone())
            .with_session_file(&session_file)
            .with_request_timeout(Duration::from_secs(5));
        let transport = ReqwestTransport::from_config(&config).unwrap();
        let state = AppState::from_parts(config, Arc::new(transport), Arc::new(store)).await;

        Self {
            backend,
            state,
            session_file,
            _server: server,
            _dir: dir,
        }
    }

    /// Tokens as currently persisted on disk.
    pub async fn persisted(&self) -> Tokens {
        FileSessionStore::new(&self.session_file)
            .load()
            .await
            .unwrap()
    }
}
