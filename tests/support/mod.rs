//! In-process stub of the authentication and heartbeat services.
//!
//! Reimplements the HTTP-visible contract the harness checks for (202 plus
//! `Set-Cookie` on sign-in, API-key and cookie gating on protected routes,
//! 500 on duplicate add-user) so the chains can be exercised hermetically
//! on an ephemeral port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use authprobe::fixtures::{ADMIN_EMAIL, ADMIN_PASSWORD, AVATAR_PNG};
use authprobe::HarnessConfig;

/// API key every stub instance is seeded with.
pub const STUB_API_KEY: &str = "stub-api-key";

/// Cookie name the stub issues at sign-in.
pub const STUB_COOKIE: &str = "stub_session_token";

#[derive(Debug, Clone)]
struct UserRecord {
    first_name: String,
    last_name: String,
    password: String,
    avatar: Option<Vec<u8>>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    sessions: HashMap<String, String>, // token -> email
}

#[derive(Clone)]
pub struct StubState {
    api_key: String,
    inner: Arc<Mutex<Inner>>,
}

impl StubState {
    fn new(api_key: &str) -> Self {
        let mut inner = Inner::default();
        // Pre-seeded admin account, avatar included so the fetch chain can
        // run without depending on the upload chain.
        inner.users.insert(
            ADMIN_EMAIL.to_string(),
            UserRecord {
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
                password: ADMIN_PASSWORD.to_string(),
                avatar: Some(AVATAR_PNG.to_vec()),
            },
        );
        Self {
            api_key: api_key.to_string(),
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Number of live sessions, for logout assertions.
    pub fn session_count(&self) -> usize {
        self.inner.lock().unwrap().sessions.len()
    }

    /// Whether a user with this email exists.
    pub fn has_user(&self, email: &str) -> bool {
        self.inner.lock().unwrap().users.contains_key(email)
    }

    /// Total number of user records, seeded admin included.
    pub fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SigninRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LogoutRequest {
    email: String,
}

#[derive(Debug, Deserialize)]
struct AddUserRequest {
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct StatusMessage {
    status: String,
    message: String,
}

// ============================================================================
// Auth helpers
// ============================================================================

fn unauthorized(msg: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": msg })),
    )
        .into_response()
}

fn api_key_ok(state: &StubState, headers: &HeaderMap) -> bool {
    headers
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == state.api_key)
        .unwrap_or(false)
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    for pair in raw.split(';') {
        if let Some((name, value)) = pair.split_once('=') {
            if name.trim() == STUB_COOKIE {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}

/// API key plus live session, or the 401 the real service answers with.
fn authorize(state: &StubState, headers: &HeaderMap) -> Result<String, Response> {
    if !api_key_ok(state, headers) {
        return Err(unauthorized("invalid api key"));
    }
    let token = session_cookie(headers).ok_or_else(|| unauthorized("no session cookie"))?;
    let inner = state.inner.lock().unwrap();
    inner
        .sessions
        .get(&token)
        .cloned()
        .ok_or_else(|| unauthorized("unknown session"))
}

fn random_token() -> String {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes).expect("OS randomness unavailable");
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// ============================================================================
// Handlers
// ============================================================================

async fn heartbeat() -> Json<serde_json::Value> {
    Json(json!({ "status": "200", "title": "Health OK" }))
}

async fn signin(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(req): Json<SigninRequest>,
) -> Response {
    if !api_key_ok(&state, &headers) {
        return unauthorized("invalid api key");
    }
    let mut inner = state.inner.lock().unwrap();
    let valid = inner
        .users
        .get(&req.email)
        .map(|u| u.password == req.password)
        .unwrap_or(false);
    if !valid {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Invalid email or password" })),
        )
            .into_response();
    }
    let token = random_token();
    inner.sessions.insert(token.clone(), req.email.clone());
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=None", STUB_COOKIE, token);
    (
        StatusCode::ACCEPTED,
        [(SET_COOKIE, cookie)],
        Json(json!({
            "status": "success",
            "message": format!("Authenticated! Logged in user: {}", req.email),
        })),
    )
        .into_response()
}

async fn logout(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(req): Json<LogoutRequest>,
) -> Response {
    let email = match authorize(&state, &headers) {
        Ok(email) => email,
        Err(resp) => return resp,
    };
    if req.email != email {
        return unauthorized("must sign in before logging out");
    }
    let token = session_cookie(&headers).unwrap();
    state.inner.lock().unwrap().sessions.remove(&token);
    (StatusCode::OK, Json(json!({ "message": "Logged out!" }))).into_response()
}

async fn list_users(State(state): State<StubState>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let inner = state.inner.lock().unwrap();
    let users: Vec<_> = inner
        .users
        .iter()
        .map(|(email, u)| {
            json!({
                "email": email,
                "first_name": u.first_name,
                "last_name": u.last_name,
            })
        })
        .collect();
    (StatusCode::OK, Json(users)).into_response()
}

async fn add_user(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(req): Json<AddUserRequest>,
) -> Response {
    let email = match authorize(&state, &headers) {
        Ok(email) => email,
        Err(resp) => return resp,
    };
    if email != ADMIN_EMAIL {
        return unauthorized("no permission to add a new user");
    }
    let mut inner = state.inner.lock().unwrap();
    if inner.users.contains_key(&req.email) {
        // The real service surfaces a duplicate email as a 500.
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(StatusMessage {
                status: "error".to_string(),
                message: format!("User {} already existed!", req.email),
            }),
        )
            .into_response();
    }
    inner.users.insert(
        req.email.clone(),
        UserRecord {
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
            avatar: None,
        },
    );
    (
        StatusCode::OK,
        Json(StatusMessage {
            status: "User added!".to_string(),
            message: format!("User {} added!", req.email),
        }),
    )
        .into_response()
}

async fn upload_avatar(
    State(state): State<StubState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let email = match authorize(&state, &headers) {
        Ok(email) => email,
        Err(resp) => return resp,
    };
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let bytes = match field.bytes().await {
                Ok(b) => b.to_vec(),
                Err(_) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "message": "No file is received" })),
                    )
                        .into_response()
                }
            };
            let mut inner = state.inner.lock().unwrap();
            if let Some(user) = inner.users.get_mut(&email) {
                user.avatar = Some(bytes);
            }
            return (
                StatusCode::OK,
                Json(json!({ "message": "Your file has been successfully uploaded." })),
            )
                .into_response();
        }
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "No file is received" })),
    )
        .into_response()
}

async fn get_avatar(
    State(state): State<StubState>,
    Path(email): Path<String>,
    headers: HeaderMap,
) -> Response {
    let session_email = match authorize(&state, &headers) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    if session_email != email {
        return unauthorized("no permission");
    }
    let inner = state.inner.lock().unwrap();
    match inner.users.get(&email).and_then(|u| u.avatar.as_ref()) {
        Some(avatar) => (
            StatusCode::OK,
            Json(json!({
                "email": email,
                "mime_type": "image/png",
                "size": avatar.len(),
            })),
        )
            .into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "Failure!",
                "message": format!("Query {} avatar failed!", email),
            })),
        )
            .into_response(),
    }
}

// ============================================================================
// Spawning
// ============================================================================

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind to ephemeral port");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Spin up an auth-service stub on a random port. The returned state allows
/// direct inspection; the base URL already includes the `/api/auth` prefix.
pub async fn spawn_auth_service() -> (String, StubState) {
    let state = StubState::new(STUB_API_KEY);
    let api = Router::new()
        .route("/heartbeat", get(heartbeat))
        .route("/signin", post(signin))
        .route("/logout", post(logout))
        .route("/listusers", get(list_users))
        .route("/adduser", post(add_user))
        .route("/upload", post(upload_avatar))
        .route("/avatar/:email", get(get_avatar))
        .with_state(state.clone());
    let app = Router::new().nest("/api/auth", api);
    let base = serve(app).await;
    (format!("{}/api/auth", base), state)
}

/// Spin up the standalone heartbeat stub on a random port.
pub async fn spawn_heartbeat_service() -> String {
    let app = Router::new().route("/heartbeat", get(heartbeat));
    serve(app).await
}

/// A harness config pointed at freshly spawned stub instances.
pub async fn stub_config() -> (HarnessConfig, StubState) {
    let (auth_base, state) = spawn_auth_service().await;
    let heartbeat_base = spawn_heartbeat_service().await;
    let config = HarnessConfig {
        auth_base_url: auth_base,
        heartbeat_base_url: heartbeat_base,
        api_key: STUB_API_KEY.to_string(),
    };
    (config, state)
}

/// Write the embedded avatar fixture to a temp file for upload tests.
pub fn avatar_file() -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().expect("create temp avatar");
    file.write_all(AVATAR_PNG).expect("write temp avatar");
    file
}
