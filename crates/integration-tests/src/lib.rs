//! Integration tests for Webify.
//!
//! # Running Tests
//!
//! ```bash
//! # Offline tests (Claude stubbed with a local HTTP server)
//! cargo test -p webify-integration-tests
//!
//! # Live API tests: start the server against a migrated database first
//! WEBIFY_TEST_URL=http://localhost:3000 cargo test -p webify-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `claude_client` - Messages API client against a stub server
//! - `assistant` - Natural-language edits end to end through the client
//! - `api_*` - Live server tests (ignored by default)

use std::io::Read;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use webify_server::config::ClaudeConfig;

/// A canned HTTP reply.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl StubReply {
    /// 200 with a Messages API body whose only text block is `text`.
    #[must_use]
    pub fn message(text: &str) -> Self {
        let body = serde_json::json!({
            "id": "msg_stub",
            "type": "message",
            "role": "assistant",
            "model": "claude-sonnet-4-20250514",
            "content": [{ "type": "text", "text": text }],
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 12, "output_tokens": 34 }
        });
        Self {
            status: 200,
            headers: vec![("Content-Type", "application/json".to_owned())],
            body: body.to_string(),
        }
    }

    /// Arbitrary status and body.
    #[must_use]
    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", "application/json".to_owned())],
            body: body.to_owned(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_owned()));
        self
    }
}

/// A stub Messages endpoint that answers every request with the same reply.
///
/// Request bodies are forwarded on [`StubServer::requests`].
pub struct StubServer {
    pub url: Url,
    pub requests: mpsc::Receiver<String>,
    shutdown: mpsc::Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StubServer {
    /// Start serving `reply` on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the listener can't be bound.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn start(reply: StubReply) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
        let url = Url::parse(&format!("http://{}/v1/messages", server.server_addr()))
            .expect("stub url");

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let (request_tx, request_rx) = mpsc::channel::<String>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let _ = request_tx.send(body);

                let mut response = tiny_http::Response::from_string(reply.body.clone())
                    .with_status_code(reply.status);
                for (name, value) in &reply.headers {
                    if let Ok(header) = tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                        response.add_header(header);
                    }
                }
                let _ = request.respond(response);
            }
        });

        Self {
            url,
            requests: request_rx,
            shutdown: shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Client config pointing at this stub.
    #[must_use]
    pub fn claude_config(&self) -> ClaudeConfig {
        ClaudeConfig {
            api_key: SecretString::from("sk-ant-stub-Q8vL2mXr7TzK"),
            model: "claude-sonnet-4-20250514".to_owned(),
            api_url: self.url.clone(),
        }
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Base URL of a running server for the ignored live tests.
#[must_use]
pub fn server_url() -> String {
    std::env::var("WEBIFY_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned())
}

/// Unique email so live tests can rerun against the same database.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}-{nanos}@example.com")
}
