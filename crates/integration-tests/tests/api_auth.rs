//! Live API tests for password authentication and sessions.
//!
//! Require a running server on `WEBIFY_TEST_URL` backed by a migrated database.

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use webify_integration_tests::{server_url, unique_email};

fn client() -> Client {
    Client::builder().cookie_store(true).build().unwrap()
}

async fn json_of(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
#[ignore = "Requires running webify-server"]
async fn test_signup_validation_messages() {
    let client = client();
    let url = format!("{}/api/auth/signup", server_url());

    let (status, body) = json_of(
        client
            .post(&url)
            .json(&json!({ "email": "a@example.com", "password": "secret1" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name, email, and password are required");

    let (status, body) = json_of(
        client
            .post(&url)
            .json(&json!({ "name": "Ada", "email": "not-an-email", "password": "secret1" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email format");

    let (status, body) = json_of(
        client
            .post(&url)
            .json(&json!({ "name": "Ada", "email": unique_email("short"), "password": "12345" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password must be at least 6 characters long");
}

#[tokio::test]
#[ignore = "Requires running webify-server"]
async fn test_signup_signin_me_signout() {
    let client = client();
    let base = server_url();
    let email = unique_email("flow");

    let response = client
        .post(format!("{base}/api/auth/signup"))
        .json(&json!({ "name": "Ada", "email": email, "password": "analytical" }))
        .send()
        .await
        .unwrap();
    assert!(response.headers().get("set-cookie").is_some());
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["email"], email.as_str());

    let (status, _) = json_of(
        client
            .post(format!("{base}/api/auth/signup"))
            .json(&json!({ "name": "Ada", "email": email, "password": "analytical" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = json_of(client.get(format!("{base}/api/auth/me")).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");
    assert!(body["createdAt"].is_string());

    let (status, body) = json_of(
        client
            .post(format!("{base}/api/auth/signout"))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully signed out");

    let (status, body) = json_of(client.get(format!("{base}/api/auth/me")).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authenticated");

    let response = client
        .post(format!("{base}/api/auth/signin"))
        .json(&json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await
        .unwrap();
    assert!(response.headers().get("set-cookie").is_none());
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, body) = json_of(
        client
            .post(format!("{base}/api/auth/signin"))
            .json(&json!({ "email": email, "password": "analytical" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sign in successful");
}

#[tokio::test]
#[ignore = "Requires running webify-server"]
async fn test_unknown_email_sets_no_cookie() {
    let client = client();
    let response = client
        .post(format!("{}/api/auth/signin", server_url()))
        .json(&json!({ "email": unique_email("nobody"), "password": "whatever" }))
        .send()
        .await
        .unwrap();

    assert!(response.headers().get("set-cookie").is_none());
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
    assert_eq!(body["success"], false);
}
