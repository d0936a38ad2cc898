//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Notify};

use forwarding_gateway::config::GatewayConfig;
use forwarding_gateway::{HttpServer, Shutdown, UpstreamBase};

/// A request exactly as the mock upstream received it.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Captured {
    pub request_line: String,
    /// Header lines, names lower-cased, in arrival order.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }
}

/// Handle to a running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    pub requests: mpsc::UnboundedReceiver<Captured>,
    pub hits: Arc<AtomicUsize>,
    /// Signalled when a caller hangs up before the answer was written.
    abandoned: Arc<Notify>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn next_request(&mut self) -> Captured {
        tokio::time::timeout(Duration::from_secs(5), self.requests.recv())
            .await
            .expect("upstream never received a request")
            .expect("upstream channel closed")
    }

    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Resolves once some connection closed while its answer was still pending.
    pub async fn abandoned(&self) {
        self.abandoned.notified().await
    }
}

/// Start a mock upstream answering every connection with the raw `response`.
///
/// `response` is written verbatim, so tests control framing and header case.
pub async fn start_upstream(response: Vec<u8>) -> MockUpstream {
    start_upstream_with_delay(response, Duration::ZERO).await
}

/// Like [`start_upstream`] but waits `delay` before answering.
pub async fn start_upstream_with_delay(response: Vec<u8>, delay: Duration) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let hits = Arc::new(AtomicUsize::new(0));
    let response = Arc::new(response);
    let abandoned = Arc::new(Notify::new());

    let counter = hits.clone();
    let hung_up = abandoned.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let tx = tx.clone();
            let response = response.clone();
            let counter = counter.clone();
            let hung_up = hung_up.clone();
            tokio::spawn(async move {
                let Some(captured) = read_request(&mut socket).await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = tx.send(captured);

                let answered = tokio::select! {
                    biased;
                    _ = tokio::time::sleep(delay) => true,
                    _ = wait_for_close(&mut socket) => false,
                };
                if !answered {
                    hung_up.notify_one();
                    return;
                }
                let _ = socket.write_all(&response).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MockUpstream {
        addr,
        requests: rx,
        hits,
        abandoned,
    }
}

/// Returns when the peer closes its side or the socket fails.
async fn wait_for_close(socket: &mut TcpStream) {
    let mut scratch = [0u8; 512];
    loop {
        match socket.read(&mut scratch).await {
            Ok(0) | Err(_) => return,
            Ok(_) => continue,
        }
    }
}

async fn read_request(socket: &mut TcpStream) -> Option<Captured> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(Captured {
        request_line,
        headers,
        body,
    })
}

/// Build a raw HTTP/1.1 response with a content-length body.
#[allow(dead_code)]
pub fn raw_response(status_line: &str, headers: &[(&str, &str)], body: &[u8]) -> Vec<u8> {
    let mut out = format!("HTTP/1.1 {status_line}\r\n");
    for (k, v) in headers {
        out.push_str(&format!("{k}: {v}\r\n"));
    }
    out.push_str(&format!("Content-Length: {}\r\nConnection: close\r\n\r\n", body.len()));
    let mut bytes = out.into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

/// A running gateway bound to an ephemeral port.
pub struct Gateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl Gateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a gateway relaying to `upstream` with the given config.
pub async fn start_gateway(mut config: GatewayConfig, upstream: Option<&str>) -> Gateway {
    config.upstream.required = false;
    let upstream = upstream.map(|u| UpstreamBase::parse(u).unwrap());
    let server = HttpServer::new(config, upstream).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    Gateway { addr, shutdown }
}

/// Test client: no pooling, no system proxy, never follows redirects.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Parse a gateway JSON error body.
#[allow(dead_code)]
pub async fn json_body(res: reqwest::Response) -> serde_json::Value {
    let bytes = res.bytes().await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
