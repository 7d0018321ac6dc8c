//! Integration tests for the session-validation flow.

use http::StatusCode;

use crate::helpers;

#[tokio::test]
async fn no_cookies_redirects_to_login_and_records_return_path() {
    let response = helpers::send(helpers::get_request("/protected?tab=files", None)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/__auth");

    let cookies = helpers::set_cookies(&response);
    let redirect = cookies
        .iter()
        .find(|c| c.starts_with("w3id_redirect="))
        .expect("return-path cookie should be set");
    assert!(redirect.starts_with("w3id_redirect=%2Fprotected%3Ftab%3Dfiles"));
    assert!(redirect.contains("Max-Age=1800"));
}

#[tokio::test]
async fn valid_session_reaches_the_handler() {
    let header = helpers::session_cookie_header("alice", "sess-1", helpers::future_ms());
    let response = helpers::send(helpers::get_request("/protected", Some(&header))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(helpers::body_string(response).await, "hello alice");
}

#[tokio::test]
async fn principal_is_exposed_to_the_landing_handler() {
    let header = helpers::session_cookie_header("carol@example.com", "sess-9", helpers::future_ms());
    let response = helpers::send(helpers::get_request("/", Some(&header))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        helpers::body_string(response).await,
        "Signed in as carol@example.com"
    );
}

#[tokio::test]
async fn tampered_user_id_bounces_to_login() {
    // Keep the original hash but swap the principal.
    let header = helpers::session_cookie_header("alice", "sess-1", helpers::future_ms())
        .replace("w3id_userid=alice", "w3id_userid=mallory");

    let response = helpers::send(helpers::get_request("/protected", Some(&header))).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/__auth");

    let cookies = helpers::set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("w3id_redirect=")));
}

#[tokio::test]
async fn expired_session_is_wiped_and_bounced() {
    // Hash computed correctly for an expiration that has already passed.
    let header = helpers::session_cookie_header("alice", "sess-1", helpers::past_ms());
    let response = helpers::send(helpers::get_request("/protected", Some(&header))).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/__auth");

    let cookies = helpers::set_cookies(&response);
    for name in [
        "w3id_userid",
        "w3id_sessionid",
        "w3id_expiration",
        "w3id_hash",
    ] {
        let removal = cookies
            .iter()
            .find(|c| c.starts_with(&format!("{name}=")))
            .unwrap_or_else(|| panic!("{name} should be cleared"));
        assert!(removal.contains("Max-Age=0"), "{name} should expire now");
    }
}

#[tokio::test]
async fn challenge_wipes_cookies_and_redirects_to_current_path() {
    let mut header = helpers::session_cookie_header("alice", "sess-1", helpers::future_ms());
    header.push_str("; w3id_challenge=1");

    let response = helpers::send(helpers::get_request("/protected", Some(&header))).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/protected");

    let cookies = helpers::set_cookies(&response);
    let challenge = cookies
        .iter()
        .find(|c| c.starts_with("w3id_challenge="))
        .expect("challenge cookie should be cleared");
    assert!(challenge.contains("Max-Age=0"));
}

#[tokio::test]
async fn insecure_request_gets_hsts_advisory() {
    let header = helpers::session_cookie_header("alice", "sess-1", helpers::future_ms());
    let response = helpers::send(helpers::get_request("/protected", Some(&header))).await;

    // No x-forwarded-proto header means insecure; the request still goes
    // through.
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("strict-transport-security")
            .unwrap(),
        "max-age=86400"
    );
}

#[tokio::test]
async fn secure_request_has_no_hsts_advisory() {
    let header = helpers::session_cookie_header("alice", "sess-1", helpers::future_ms());
    let request = http::Request::builder()
        .method("GET")
        .uri("/protected")
        .header("cookie", header)
        .header("x-forwarded-proto", "https")
        .body(axum::body::Body::empty())
        .expect("request should build");

    let response = helpers::send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get("strict-transport-security")
            .is_none()
    );
}

#[tokio::test]
async fn valid_session_clears_stale_return_path() {
    let mut header = helpers::session_cookie_header("alice", "sess-1", helpers::future_ms());
    header.push_str("; w3id_redirect=%2Fsomewhere");

    let response = helpers::send(helpers::get_request("/protected", Some(&header))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = helpers::set_cookies(&response);
    let redirect = cookies
        .iter()
        .find(|c| c.starts_with("w3id_redirect="))
        .expect("stale return-path cookie should be cleared");
    assert!(redirect.contains("Max-Age=0"));
}

#[tokio::test]
async fn unknown_path_is_still_guarded() {
    let response = helpers::send(helpers::get_request("/no-such-route", None)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/__auth");
}

#[tokio::test]
async fn unknown_path_with_valid_session_is_404() {
    let header = helpers::session_cookie_header("alice", "sess-1", helpers::future_ms());
    let response = helpers::send(helpers::get_request("/no-such-route", Some(&header))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
