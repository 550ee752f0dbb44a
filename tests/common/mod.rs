//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use bookstack_relay::config::{ConfigState, RelayConfig};
use bookstack_relay::http::HttpServer;
use bookstack_relay::lifecycle::Shutdown;

/// One request observed by a mock upstream.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    /// Request target, e.g. "/api/books?count=5".
    pub target: String,
    /// Value of the Authorization header, if sent.
    pub authorization: Option<String>,
    /// Value of the Accept header, if sent.
    pub accept: Option<String>,
}

pub type SeenRequests = Arc<Mutex<Vec<SeenRequest>>>;

/// Start a mock BookStack backend that returns a fixed status and body and
/// records every request it serves.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> (SocketAddr, SeenRequests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: SeenRequests = Arc::new(Mutex::new(Vec::new()));
    let record = seen.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let record = record.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]).to_string();

                        if let Some(request) = parse_request(&head) {
                            record.lock().await.push(request);
                        }

                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, seen)
}

fn parse_request(head: &str) -> Option<SeenRequest> {
    let mut lines = head.lines();
    let target = lines.next()?.split_whitespace().nth(1)?.to_string();

    let mut authorization = None;
    let mut accept = None;
    for line in lines {
        if let Some(value) = line.strip_prefix("authorization: ") {
            authorization = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("accept: ") {
            accept = Some(value.trim().to_string());
        }
    }

    Some(SeenRequest {
        target,
        authorization,
        accept,
    })
}

/// Relay config pointing at the given upstream address, with credentials
/// the mock can assert on.
pub fn relay_config(upstream_addr: &str, allowed_origins: &[&str]) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.upstream.bookstack_url = format!("http://{}", upstream_addr);
    config.upstream.api_token_id = "test-token-id".to_string();
    config.upstream.api_token_secret = "test-token-secret".to_string();
    config.allowed_origins = allowed_origins.iter().map(|s| s.to_string()).collect();
    config
}

/// Spawn the relay on an ephemeral port.
///
/// The returned `Shutdown` must stay alive for the duration of the test;
/// dropping it stops the server.
pub async fn start_relay(config: ConfigState) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// Plain client for talking to the relay under test.
#[allow(dead_code)]
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
