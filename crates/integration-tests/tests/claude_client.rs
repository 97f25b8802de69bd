//! Claude Messages API client against a local stub server.

#![allow(clippy::unwrap_used)]

use webify_integration_tests::{StubReply, StubServer};
use webify_server::claude::{ClaudeClient, ClaudeError, Message, StopReason, TextCompletion};

#[tokio::test]
async fn test_chat_success() {
    let stub = StubServer::start(StubReply::message("Hello from the stub"));
    let client = ClaudeClient::new(&stub.claude_config()).unwrap();

    let response = client
        .chat(vec![Message::user("hi")], Some("be brief".to_owned()))
        .await
        .unwrap();

    assert_eq!(response.text(), "Hello from the stub");
    assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
    assert_eq!(response.usage.output_tokens, 34);

    let sent: serde_json::Value = serde_json::from_str(&stub.requests.recv().unwrap()).unwrap();
    assert_eq!(sent["model"], "claude-sonnet-4-20250514");
    assert_eq!(sent["system"], "be brief");
    assert_eq!(sent["messages"][0]["role"], "user");
}

#[tokio::test]
async fn test_complete_rejects_empty_text() {
    let stub = StubServer::start(StubReply::message("   "));
    let client = ClaudeClient::new(&stub.claude_config()).unwrap();

    let err = client.complete("hi").await.unwrap_err();
    assert!(matches!(err, ClaudeError::Parse(_)));
}

#[tokio::test]
async fn test_rate_limited_reads_retry_after() {
    let stub = StubServer::start(
        StubReply::status(429, r#"{"type":"error","error":{"type":"rate_limit_error","message":"slow down"}}"#)
            .with_header("Retry-After", "7"),
    );
    let client = ClaudeClient::new(&stub.claude_config()).unwrap();

    let err = client.complete("hi").await.unwrap_err();
    assert!(matches!(err, ClaudeError::RateLimited(7)));
}

#[tokio::test]
async fn test_unauthorized() {
    let stub = StubServer::start(StubReply::status(401, "{}"));
    let client = ClaudeClient::new(&stub.claude_config()).unwrap();

    let err = client.complete("hi").await.unwrap_err();
    assert!(matches!(err, ClaudeError::Unauthorized(_)));
}

#[tokio::test]
async fn test_api_error_is_parsed() {
    let stub = StubServer::start(StubReply::status(
        400,
        r#"{"type":"error","error":{"type":"invalid_request_error","message":"max_tokens too large"}}"#,
    ));
    let client = ClaudeClient::new(&stub.claude_config()).unwrap();

    match client.complete("hi").await.unwrap_err() {
        ClaudeError::Api {
            error_type,
            message,
        } => {
            assert_eq!(error_type, "invalid_request_error");
            assert_eq!(message, "max_tokens too large");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unstructured_error_keeps_status() {
    let stub = StubServer::start(StubReply::status(503, "upstream unavailable"));
    let client = ClaudeClient::new(&stub.claude_config()).unwrap();

    match client.complete("hi").await.unwrap_err() {
        ClaudeError::Api { error_type, message } => {
            assert_eq!(error_type, "http_503");
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}
