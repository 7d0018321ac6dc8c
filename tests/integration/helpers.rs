//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::response::Response;
use axum::routing::get;
use http::Request;
use tower::ServiceExt;

use w3gate_api::AppState;
use w3gate_api::extractors::AuthenticatedUser;
use w3gate_auth::session::hash::generate_hash_for_properties;
use w3gate_core::config::AppConfig;

/// 72-character integrity secret used across the test suite.
pub const TEST_SECRET: &str =
    "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrst";

/// A complete, valid gateway configuration for tests.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.idp.login_url = "https://idp.example.com/sso".to_string();
    config.idp.entity_id = "test-partner".to_string();
    config.idp.certificate = "MIICtestcertificate".to_string();
    config.idp.acs_url = "https://gateway.example.com/__auth".to_string();
    config.session.secret = TEST_SECRET.to_string();
    config
}

async fn landing(user: AuthenticatedUser) -> String {
    format!("Signed in as {}", user.user_id())
}

async fn protected(user: AuthenticatedUser) -> String {
    format!("hello {}", user.user_id())
}

/// Build the full gateway router over a small protected application.
pub fn test_router() -> Router {
    let config = test_config();
    config.validate().expect("test config should be valid");

    let state = AppState::new(config);
    let app_routes = Router::new()
        .route("/", get(landing))
        .route("/protected", get(protected));

    w3gate_api::build_router(state, app_routes)
}

/// Send one request through a freshly built router.
pub async fn send(request: Request<Body>) -> Response {
    test_router()
        .oneshot(request)
        .await
        .expect("router call is infallible")
}

/// A GET request, optionally carrying a `Cookie` header.
pub fn get_request(path: &str, cookie_header: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookies) = cookie_header {
        builder = builder.header("cookie", cookies);
    }
    builder.body(Body::empty()).expect("request should build")
}

/// A POST request with a urlencoded form body.
pub fn form_request(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Cookie header carrying a correctly hashed session for `user_id`.
pub fn session_cookie_header(user_id: &str, session_id: &str, expiration_ms: i64) -> String {
    let expiration = expiration_ms.to_string();
    let hash = generate_hash_for_properties(user_id, session_id, &expiration, TEST_SECRET);
    format!(
        "w3id_userid={}; w3id_sessionid={}; w3id_expiration={}; w3id_hash={}",
        urlencoding::encode(user_id),
        urlencoding::encode(session_id),
        expiration,
        hash
    )
}

/// All `Set-Cookie` header values on a response.
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(String::from)
        .collect()
}

/// Collect the response body as a string.
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body should collect");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

/// An expiration comfortably in the future.
pub fn future_ms() -> i64 {
    chrono::Utc::now().timestamp_millis() + 3_600_000
}

/// An expiration just in the past.
pub fn past_ms() -> i64 {
    chrono::Utc::now().timestamp_millis() - 1_000
}
