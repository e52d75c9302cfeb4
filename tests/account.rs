//! Contract tests for profile registration.

use toolforge::Error;
use toolforge::account::{ProfileClient, UserIdentity};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_user() -> UserIdentity {
    UserIdentity {
        uid: "u1".into(),
        email: Some("ada@example.test".into()),
        display_name: Some("Ada".into()),
        photo_url: Some("https://img.test/ada.png".into()),
        email_verified: true,
        provider_id: Some("google.com".into()),
    }
}

#[tokio::test]
async fn signup_posts_identity_fields_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/signup"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "uid": "u1",
            "displayName": "Ada",
            "photoURL": "https://img.test/ada.png",
            "emailVerified": true,
            "providerId": "google.com"
        })))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = ProfileClient::new(server.uri());
    client.notify_signup(&sample_user()).await.unwrap();
}

#[tokio::test]
async fn signup_failure_is_surfaced_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/signup"))
        .respond_with(ResponseTemplate::new(500).set_body_string("registry down"))
        .mount(&server)
        .await;

    let client = ProfileClient::new(server.uri());
    let err = client.notify_signup(&sample_user()).await.unwrap_err();
    assert!(matches!(err, Error::Transport { status: 500, .. }));
    assert!(err.to_string().contains("registry down"));
}

#[tokio::test]
async fn logged_variant_swallows_the_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/signup"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    // Must not panic or propagate; signup continues.
    let client = ProfileClient::new(server.uri());
    client.notify_signup_logged(&sample_user()).await;
}
