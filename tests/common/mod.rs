//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A raw-TCP mock backend that replies with a canned HTTP response.
///
/// Records how often it was hit and the head of every request it received,
/// so tests can assert on forwarded headers and on the absence of outbound
/// calls. Responses should carry `Connection: close` so each request maps to
/// one connection.
pub struct MockBackend {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicU32>,
    pub request_heads: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hit_count(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a mock backend on an ephemeral port.
pub async fn start_mock_backend(raw_response: &'static str) -> MockBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let request_heads: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let task_hits = hits.clone();
    let task_heads = request_heads.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    task_hits.fetch_add(1, Ordering::SeqCst);
                    let heads = task_heads.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let mut head = Vec::new();
                        loop {
                            match socket.read(&mut buf).await {
                                Ok(0) => break,
                                Ok(n) => {
                                    head.extend_from_slice(&buf[..n]);
                                    if head.windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                }
                                Err(_) => break,
                            }
                        }
                        heads
                            .lock()
                            .unwrap()
                            .push(String::from_utf8_lossy(&head).to_string());

                        let _ = socket.write_all(raw_response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend {
        addr,
        hits,
        request_heads,
    }
}
