#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use pita_api::auth::jwt::JwtConfig;
use pita_api::auth::password::hash_password;
use pita_api::config::{AdminCredentials, ServerConfig};
use pita_api::router::{build_app_router, MEDIA_URL_PREFIX};
use pita_api::state::AppState;
use pita_core::imaging::ThumbnailConfig;
use pita_core::media::MediaStorage;
use pita_mail::{MailError, Mailer, OutgoingEmail};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Build a test `ServerConfig` rooted at `media_root`.
pub fn test_config(media_root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        media_root: media_root.to_path_buf(),
        max_upload_bytes: 8 * 1024 * 1024,
        thumbnail: ThumbnailConfig::new(400, 75),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins: 15,
        },
        admin: AdminCredentials {
            username: ADMIN_USERNAME.to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).expect("hashing should succeed"),
        },
    }
}

/// How the [`RecordingMailer`] answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailOutcome {
    Deliver,
    RejectByProvider,
    RejectAddress,
    Fail,
}

/// Mailer that records every message instead of sending it.
pub struct RecordingMailer {
    outcome: Mutex<MailOutcome>,
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            outcome: Mutex::new(MailOutcome::Deliver),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_outcome(&self, outcome: MailOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    /// Messages handed to the mailer, delivered or not.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        match *self.outcome.lock().unwrap() {
            MailOutcome::Deliver => Ok(()),
            MailOutcome::RejectByProvider => Err(MailError::Api {
                status: 400,
                body: "'from' parameter is not a valid address".into(),
            }),
            MailOutcome::RejectAddress => Err(MailError::InvalidAddress("'nope'".into())),
            MailOutcome::Fail => Err(MailError::Build("connection reset".into())),
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// A router over `pool` plus the handles tests inspect.
pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
    pub media: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn media_path(&self, key: &str) -> std::path::PathBuf {
        self.media.path().join(key)
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool, a temporary media root and a recording mailer.
pub fn build_test_app(pool: SqlitePool) -> TestApp {
    let media = tempfile::tempdir().expect("tempdir should be created");
    let config = test_config(media.path());
    let mailer = Arc::new(RecordingMailer::new());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media: Arc::new(MediaStorage::new(media.path(), MEDIA_URL_PREFIX)),
        mailer: mailer.clone(),
    };

    TestApp {
        router: build_app_router(state, &config),
        mailer,
        media,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::get(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::delete(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn send_json_auth(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send_json_auth(app, Method::POST, uri, token, body).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send_json_auth(app, Method::PUT, uri, token, body).await
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, pairs: &[(&str, &str)]) -> Response {
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", form_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

fn form_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect()
}

const BOUNDARY: &str = "pita-test-boundary";

/// Send a multipart form with one `file` part and the given text fields.
pub async fn send_multipart_auth(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    file: (&str, &[u8]),
    fields: &[(&str, &str)],
) -> Response {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    let (filename, bytes) = file;
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).expect("body should be UTF-8")
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Log in as the configured admin and return the access token.
pub async fn login(app: Router) -> String {
    let body = serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD });
    let response = post_json(app, "/admin/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .expect("token should be a string")
        .to_string()
}

/// Encode a solid-colour PNG of the given size.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb([200, 80, 40]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("PNG encoding should succeed");
    out.into_inner()
}
