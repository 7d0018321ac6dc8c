//! Integration tests for the login and logout endpoints.

use http::StatusCode;

use crate::helpers;

#[tokio::test]
async fn login_initiation_redirects_to_the_provider() {
    let response = helpers::send(helpers::get_request("/__auth", None)).await;

    assert_eq!(response.status(), StatusCode::FOUND);

    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location header should be set");
    assert!(location.starts_with("https://idp.example.com/sso?"));
    assert!(location.contains("SAMLRequest="));
}

#[tokio::test]
async fn login_initiation_does_not_require_a_session() {
    // The auth endpoints sit outside the session guard; no return-path
    // cookie is written for them.
    let response = helpers::send(helpers::get_request("/__auth", None)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(helpers::set_cookies(&response).is_empty());
}

#[tokio::test]
async fn assertion_consumer_rejects_garbage_with_500() {
    let response =
        helpers::send(helpers::form_request("/__auth", "SAMLResponse=not-a-response")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // No session cookie may be minted on failure.
    assert!(
        !helpers::set_cookies(&response)
            .iter()
            .any(|c| c.starts_with("w3id_hash="))
    );
}

#[tokio::test]
async fn assertion_consumer_rejects_a_missing_payload() {
    let response = helpers::send(helpers::form_request("/__auth", "")).await;

    // The form is missing its one required field.
    assert_ne!(response.status(), StatusCode::OK);
    assert_ne!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn logout_sets_the_challenge_cookie() {
    let response = helpers::send(helpers::get_request("/__logout", None)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/");

    let cookies = helpers::set_cookies(&response);
    let challenge = cookies
        .iter()
        .find(|c| c.starts_with("w3id_challenge=1"))
        .expect("challenge cookie should be set");
    assert!(challenge.contains("Max-Age=604800"));
}
